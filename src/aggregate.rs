//! Folds detections into the final [`AnalysisResult`].

use crate::*;
use crate::catalogue::{Browser, FeatureDescriptor, VersionRecord};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedFeature {
    #[serde(flatten)]
    pub feature: &'static FeatureDescriptor,
    pub snippets: Vec<CodeSnippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_features: usize,
    /// Features the legacy engine lacks or only partially supports.
    pub modern_only_features: usize,
    /// No feature is a hard "No" in the legacy engine.
    pub all_features_legacy_compatible: bool,
}
impl Summary {
    pub fn of(features: &[DetectedFeature]) -> Self {
        let legacy = || features.iter().map(|f| f.feature.support.legacy());
        Self {
            total_features: features.len(),
            modern_only_features: legacy()
                .filter(|s| catalogue::is_unsupported(s) || catalogue::is_partial(s))
                .count(),
            all_features_legacy_compatible: legacy().all(|s| !catalogue::is_unsupported(s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub features: Vec<DetectedFeature>,
    pub summary: Summary,
    pub minimum_versions: VersionRecord,
}

/// The oldest version of each engine that supports every feature: per slot,
/// the largest floor among the features, or `"No"` if none of them has one.
pub fn minimum_versions(features: &[DetectedFeature]) -> VersionRecord {
    VersionRecord::from_fn(|browser: Browser| {
        features
            .iter()
            .filter_map(|f| catalogue::version_floor(f.feature.support.get(browser)))
            .reduce(f64::max)
            .map_or(Cow::Borrowed(catalogue::UNSUPPORTED), |v| {
                Cow::Owned(format!("{v}+"))
            })
    })
}

/// Resolves each detected key against the catalogue, dropping unknown keys,
/// and computes the summary and version matrix.
pub fn aggregate(detections: Detections) -> AnalysisResult {
    let features: Vec<DetectedFeature> = detections
        .into_entries()
        .filter_map(|(key, snippets)| match catalogue::lookup(key) {
            Some(feature) => Some(DetectedFeature {
                feature,
                snippets: snippets.into_iter().collect(),
            }),
            None => {
                debug!(key, "dropping uncatalogued feature");
                None
            }
        })
        .collect();
    AnalysisResult {
        summary: Summary::of(&features),
        minimum_versions: minimum_versions(&features),
        features,
    }
}

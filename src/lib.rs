//! Finds the JavaScript language and API features used by a piece of source
//! text and works out which browser versions can run all of them.
//!
//! ```rust
//! let result = portal_solutions_featscan::analyze("const x = 1;").unwrap();
//! assert_eq!(result.features[0].feature.key, "const");
//! assert_eq!(result.minimum_versions.chrome, "49+");
//! ```
use std::{
    collections::{BTreeMap, BTreeSet},
    mem::take,
};
use swc_ecma_visit::VisitWith;
use tracing::{debug, trace};
pub mod aggregate;
pub mod catalogue;
pub mod classify;
pub mod error;
pub mod opts;
pub mod parse;
pub mod rules;
pub mod snippet;
#[cfg(test)]
mod test;
pub use aggregate::{AnalysisResult, DetectedFeature, Summary};
pub use catalogue::{Browser, FeatureDescriptor, VersionRecord};
pub use classify::{Classifier, Detections};
pub use error::{AnalysisError, Result};
pub use opts::AnalyzerOpts;
pub use snippet::{CodeSnippet, SourceLines};

/// Runs analyses with a fixed set of options. Holds no per-call state, so one
/// value can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub opts: AnalyzerOpts,
}
impl Analyzer {
    pub fn new(opts: AnalyzerOpts) -> Self {
        Self { opts }
    }
    /// Parses `src`, classifies every node and aggregates the result.
    ///
    /// A leading byte order mark is not part of the source: lines and
    /// columns are counted after it.
    ///
    /// Fails when the parser reports an error, in which case nothing
    /// detected so far is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(len = src.len()))]
    pub fn analyze(&self, src: &str) -> Result<AnalysisResult> {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        let hashbang = rules::hashbang(src);
        let lines = SourceLines::new(src);
        let parsed = parse::parse(&lines, &self.opts)?;
        let mut classifier = Classifier::new(&lines, parsed.base, self.opts.context_lines);
        if let Some(range) = hashbang {
            classifier.record_range("hashbang", range);
        }
        parsed.module.visit_with(&mut classifier);
        let result = aggregate::aggregate(classifier.detections);
        debug!(
            features = result.summary.total_features,
            legacy_compatible = result.summary.all_features_legacy_compatible,
            "analysis finished"
        );
        return Ok(result);
    }
}

/// Analyzes `src` with the default options.
pub fn analyze(src: &str) -> Result<AnalysisResult> {
    Analyzer::default().analyze(src)
}

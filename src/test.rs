use crate::*;

/// Detected keys in result order.
pub fn keys(r: &AnalysisResult) -> Vec<&'static str> {
    r.features.iter().map(|f| f.feature.key).collect()
}
/// Evidence recorded for `key`, empty when it was not detected.
pub fn snippets<'r>(r: &'r AnalysisResult, key: &str) -> &'r [CodeSnippet] {
    r.features
        .iter()
        .find(|f| f.feature.key == key)
        .map(|f| &*f.snippets)
        .unwrap_or_default()
}

macro_rules! detection_test {
    ($name:ident [$data:expr] => |$r:pat_param| $e:expr) => {
        #[test]
        fn $name() {
            match $crate::analyze($data) {
                Ok($r) => $e,
                Err(err) => panic!("{} failed to analyze: {err}", stringify!($name)),
            }
        }
    };
}
pub(crate) use detection_test;

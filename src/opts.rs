use crate::snippet::DEFAULT_CONTEXT_LINES;

/// Knobs for a single analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct AnalyzerOpts {
    /// Lines of context kept on each side of a match.
    pub context_lines: usize,
    /// Accept JSX elements in the source.
    pub jsx: bool,
}
impl Default for AnalyzerOpts {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            jsx: false,
        }
    }
}

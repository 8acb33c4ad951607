use thiserror::Error;

/// The only way an analysis can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The parser could not build a tree; no features are reported.
    #[error("source could not be parsed: {message} (line {line}, column {column})")]
    Parse {
        message: String,
        /// 1-based.
        line: usize,
        /// 0-based, in characters.
        column: usize,
    },
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

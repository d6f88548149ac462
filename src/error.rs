//! Application error types.
//!
//! Composer operations are total for user input; the variants here cover
//! loading the lexicon, configuration, clipboard access and caller bugs
//! such as out-of-range reorder indices.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Lexicon file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// A poem position outside the current sequence.
    ///
    /// Valid callers derive indices from the rendered poem, so this always
    /// points at a caller bug rather than a user mistake.
    #[error("Index {index} out of range for poem of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Poem length at the time of the call.
        len: usize,
    },

    /// System clipboard unavailable or rejected the write
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn index_out_of_range_reports_both_numbers() {
        let err = Error::IndexOutOfRange { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn config_error_includes_hint() {
        let err = Error::config("lexicon not found", "Set CLIPPINGS_LEXICON");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("CLIPPINGS_LEXICON")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn io_conversion_has_no_path() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io { path: None, .. }));
    }
}

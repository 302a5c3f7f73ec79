//! Error types for the normalizer
//!
//! Rules themselves are infallible; everything here is either a per-file
//! I/O condition reported by the processor or a configuration problem.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Normalizer error types
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("File {} does not exist!", path.display())]
    FileNotFound { path: PathBuf },

    /// Existing path could not be read; the file is left untouched
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Normalized content could not be written back
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not UTF-8 text (binary, NUL bytes, other encodings)
    #[error("Refusing to process {}: {reason}", path.display())]
    UnsupportedEncoding { path: PathBuf, reason: String },

    /// Rule name not recognized in a config file or on the command line
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    /// Config file unreadable or malformed
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Path of the file this error concerns, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::FileNotFound { path }
            | Error::Read { path, .. }
            | Error::Write { path, .. }
            | Error::UnsupportedEncoding { path, .. }
            | Error::Config { path, .. } => Some(path),
            Error::UnknownRule(_) => None,
        }
    }

    /// Stable kind name used in machine-readable reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::FileNotFound { .. } => "file_not_found",
            Error::Read { .. } => "read_error",
            Error::Write { .. } => "write_error",
            Error::UnsupportedEncoding { .. } => "unsupported_encoding",
            Error::UnknownRule(_) => "unknown_rule",
            Error::Config { .. } => "config_error",
        }
    }
}

/// Result type alias for normalizer operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message_matches_progress_format() {
        let err = Error::FileNotFound {
            path: PathBuf::from("rtl/top.vhd"),
        };
        assert_eq!(err.to_string(), "File rtl/top.vhd does not exist!");
        assert_eq!(err.kind(), "file_not_found");
    }

    #[test]
    fn test_write_error_keeps_source() {
        let err = Error::Write {
            path: PathBuf::from("a.vhd"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("a.vhd"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.path(), Some(std::path::Path::new("a.vhd")));
    }

    #[test]
    fn test_unknown_rule_has_no_path() {
        let err = Error::UnknownRule("tabs".into());
        assert_eq!(err.to_string(), "Unknown rule 'tabs'");
        assert!(err.path().is_none());
    }
}

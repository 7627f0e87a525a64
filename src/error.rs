//! Error taxonomy.
//!
//! [`StartupError`] aborts the program before the selection flow starts.
//! [`BackendError`] is always recoverable: the review loop turns it into a
//! status message and keeps going.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Fatal conditions detected before the interactive session begins.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "Language file not found: {}\n\n\
         Create it with one language name per line, e.g.:\n  English\n  French",
        path.display()
    )]
    MissingLanguages { path: PathBuf },

    #[error("No languages found in {}", path.display())]
    EmptyLanguages { path: PathBuf },

    #[error("Failed to read language file {}: {source}", path.display())]
    UnreadableLanguages {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error(
        "Terminal window too small ({width}x{height}). \
         Please resize to at least {min_width}x{min_height}."
    )]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

impl StartupError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::MissingLanguages { .. }
            | Self::EmptyLanguages { .. }
            | Self::UnreadableLanguages { .. }
            | Self::InvalidConfig { .. } => exitcode::CONFIG,
            Self::TerminalTooSmall { .. } => exitcode::UNAVAILABLE,
        }
    }
}

/// Failures of the translation backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no response after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("invalid response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_exit_codes() {
        let missing = StartupError::MissingLanguages {
            path: PathBuf::from("languages.txt"),
        };
        assert_eq!(missing.exit_code(), exitcode::CONFIG);

        let small = StartupError::TerminalTooSmall {
            width: 40,
            height: 10,
            min_width: 80,
            min_height: 20,
        };
        assert_eq!(small.exit_code(), exitcode::UNAVAILABLE);
        assert!(small.to_string().contains("40x10"));
    }

    #[test]
    fn test_backend_error_messages() {
        let err = BackendError::Status {
            status: 404,
            body: "model not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 404: model not found"
        );

        let timeout = BackendError::Timeout(Duration::from_secs(30));
        assert_eq!(timeout.to_string(), "no response after 30s");
    }
}

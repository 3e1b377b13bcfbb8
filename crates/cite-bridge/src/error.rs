//! Error types for the record and bibliography translation layer.

use crate::record::RecordId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cite-bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mapping records, formatting bibliographies
/// or resolving locale data.
#[derive(Debug, Error)]
pub enum Error {
    /// A record identifier did not resolve to a record in the store.
    #[error("record {id} does not exist")]
    InvalidRecord { id: RecordId },

    /// The bibliography formatter was asked for an output format it cannot produce.
    #[error("unsupported bibliography format '{format}' (expected text, html or rtf)")]
    UnsupportedFormat { format: String },

    /// No locale data could be loaded, not even for the default locale.
    #[error(
        "no locale data could be found for '{locale}'; \
         ensure the locales directory exists and is populated"
    )]
    LocaleDataMissing { locale: String },

    /// A locale definition was retrieved but could not be parsed.
    #[error("failed to parse locale '{locale}': {message}")]
    LocaleParse { locale: String, message: String },

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Failed to read an input file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON input.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error belongs to locale resolution.
    pub fn is_locale_error(&self) -> bool {
        matches!(
            self,
            Error::LocaleDataMissing { .. } | Error::LocaleParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = Error::InvalidRecord { id: RecordId(42) };
        assert_eq!(err.to_string(), "record 42 does not exist");
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = Error::UnsupportedFormat {
            format: "latex".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("'latex'"), "Got: {}", display);
    }

    #[test]
    fn test_locale_error_classification() {
        let missing = Error::LocaleDataMissing {
            locale: "en-US".to_string(),
        };
        assert!(missing.is_locale_error());
        assert!(missing.to_string().contains("'en-US'"));

        let config = Error::Config {
            message: "bad".to_string(),
        };
        assert!(!config.is_locale_error());
    }
}

//! Error types for warmpath.
//!
//! Library crates use [`WarmpathError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::UrlKind;

/// Top-level error type for all warmpath operations.
#[derive(Debug, thiserror::Error)]
pub enum WarmpathError {
    /// A user-supplied identifier was blank.
    #[error("{kind} identifier is empty")]
    EmptyIdentifier { kind: UrlKind },

    /// Not a vanity name or a same-site `/in/<vanity>` URL.
    #[error("invalid profile identifier: {input:?} (expected a vanity name or a /in/<vanity> URL)")]
    ProfileFormat { input: String },

    /// No activity id could be recovered.
    #[error("invalid post identifier: {input:?} (expected an activity id, urn or post URL)")]
    ActivityFormat { input: String },

    /// No company slug could be recovered.
    #[error("invalid company identifier: {input:?} (expected a slug or a /company/<slug> URL)")]
    CompanyFormat { input: String },

    /// Navigation target outside the configured site.
    #[error("refusing to navigate off-site: {url}")]
    OffSite { url: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed structured input (JSON, HTML snapshot, etc.).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Batch fetch failure reported by a batch source.
    #[error("fetch error: {0}")]
    Fetch(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WarmpathError>;

impl WarmpathError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is one of the malformed-identifier errors.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(
            self,
            Self::EmptyIdentifier { .. }
                | Self::ProfileFormat { .. }
                | Self::ActivityFormat { .. }
                | Self::CompanyFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = WarmpathError::config("delay.min_ms exceeds delay.max_ms");
        assert_eq!(err.to_string(), "config error: delay.min_ms exceeds delay.max_ms");

        let err = WarmpathError::EmptyIdentifier {
            kind: UrlKind::Profile,
        };
        assert_eq!(err.to_string(), "profile identifier is empty");

        let err = WarmpathError::OffSite {
            url: "https://evil.example/".into(),
        };
        assert!(err.to_string().contains("evil.example"));
    }

    #[test]
    fn invalid_identifier_family() {
        assert!(
            WarmpathError::ProfileFormat {
                input: "x/y".into()
            }
            .is_invalid_identifier()
        );
        assert!(
            WarmpathError::ActivityFormat { input: "".into() }.is_invalid_identifier()
        );
        assert!(
            !WarmpathError::OffSite {
                url: "https://evil.example/".into()
            }
            .is_invalid_identifier()
        );
        assert!(!WarmpathError::Fetch("timeout".into()).is_invalid_identifier());
    }
}

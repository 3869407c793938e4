//! addonStartup manifest error types

use thiserror::Error;

/// Manifest-specific error type
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Payload is not valid JSON, or a section failed to serialize
    #[error("invalid manifest JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload is not UTF-8 text
    #[error("manifest is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Top-level JSON value is not an object
    #[error("manifest root is not a JSON object")]
    NotAnObject,

    /// A node inside a known section has an unexpected shape
    #[error("unexpected manifest shape in {section} at {key}: {reason}")]
    Schema {
        /// Section key (`app-profile`, ...)
        section: String,
        /// Offending field or add-on identifier
        key: String,
        /// What was found instead
        reason: String,
    },

    /// Base path could not be turned into a file URL
    #[error("cannot build file URL for {section} from base path {path}")]
    InvalidBasePath {
        /// Section key
        section: String,
        /// Base path supplied by the caller
        path: String,
    },
}

impl ManifestError {
    /// Whether this is a schema error (the JSON parsed but had the wrong shape)
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::NotAnObject | Self::Schema { .. })
    }

    pub(crate) fn schema(
        section: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Schema {
            section: section.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

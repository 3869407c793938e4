//! Error types for the portable launcher.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use std::path::PathBuf;
use thiserror::Error;
use waterfox_formats::addon_startup::ManifestError;
use waterfox_formats::mozlz4::MozLz4Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Portable root directory does not exist
    #[error("Portable root not found: {0}")]
    RootNotFound(PathBuf),

    /// Profile name cannot be used as a folder name
    #[error("Invalid profile name '{name}': {reason}")]
    InvalidProfile {
        /// The rejected profile name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// Root could not be derived from the running executable
    #[error("Cannot determine portable root: {0}")]
    NoRoot(#[source] std::io::Error),
}

/// Errors while patching `addonStartup.json.lz4`.
///
/// Each variant names the stage that failed.
#[derive(Debug, Error)]
pub enum AddonPatchError {
    /// Container could not be read or decoded
    #[error("Failed to decode {path}: {source}")]
    Decode {
        /// Container path
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: MozLz4Error,
    },

    /// Decoded manifest could not be rewritten
    #[error("Failed to rewrite add-on paths in {path}: {source}")]
    Rewrite {
        /// Container path
        path: PathBuf,
        /// Underlying manifest error
        #[source]
        source: ManifestError,
    },

    /// Rewritten manifest could not be encoded or written back
    #[error("Failed to write {path}: {source}")]
    Encode {
        /// Container path
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: MozLz4Error,
    },
}

/// Launcher runtime errors.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to create a folder
    #[error("Failed to create folder {path}: {source}")]
    CreateFolder {
        /// Folder path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON in a policies or state file
    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        /// File path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Add-on path patch failed
    #[error("Add-on path patch failed: {0}")]
    AddonPatch(#[from] AddonPatchError),

    /// Browser process could not be started
    #[error("Failed to launch {path}: {source}")]
    Spawn {
        /// Executable path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

//! Launcher configuration management.
//!
//! Configuration is built once at startup from CLI arguments and environment
//! variables, then passed by reference to every preparation step.
//!
//! # Configuration Sources
//!
//! - CLI arguments (`--root`, `--profile`, etc.)
//! - Environment variables (`WATERFOX_PORTABLE_ROOT`, etc.)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use waterfox_portable::LauncherConfig;
//!
//! let config = LauncherConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! let paths = config.paths().expect("Cannot resolve portable root");
//! println!("Profile folder: {}", paths.profile_dir(&config.profile).display());
//! ```

use crate::error::ConfigError;
use crate::paths::AppPaths;
use clap::{Parser, ValueEnum};
use std::path::{Component, Path, PathBuf};

/// Browser executable name, relative to `<root>/app`.
#[cfg(windows)]
pub const DEFAULT_PROCESS: &str = "waterfox.exe";
/// Browser executable name, relative to `<root>/app`.
#[cfg(not(windows))]
pub const DEFAULT_PROCESS: &str = "waterfox";

/// How install paths inside `addonStartup.json.lz4` are migrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AddonPathStrategy {
    /// Set `path` and every `rootURI` of the known sections
    #[default]
    Rewrite,
    /// Replace the previous root with the current one across the whole manifest
    Substitute,
}

/// Launcher configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waterfox-portable",
    about = "Portable launcher for Waterfox",
    version
)]
pub struct LauncherConfig {
    /// Portable root (defaults to the folder containing this executable)
    #[arg(long, env = "WATERFOX_PORTABLE_ROOT")]
    pub root: Option<PathBuf>,

    /// Profile name, stored under `<root>/data/profile/<name>`
    #[arg(long, env = "WATERFOX_PORTABLE_PROFILE", default_value = "default")]
    pub profile: String,

    /// Allow several browser instances (passes `--no-remote`)
    #[arg(long, env = "WATERFOX_PORTABLE_MULTIPLE_INSTANCES")]
    pub multiple_instances: bool,

    /// Add-on install path migration strategy
    #[arg(
        long,
        value_enum,
        env = "WATERFOX_PORTABLE_ADDON_PATHS",
        default_value_t = AddonPathStrategy::Rewrite
    )]
    pub addon_paths: AddonPathStrategy,

    /// Browser executable, relative to `<root>/app`
    #[arg(long, env = "WATERFOX_PORTABLE_PROCESS", default_value = DEFAULT_PROCESS)]
    pub process: String,

    /// Prepare the profile without starting the browser
    #[arg(long)]
    pub no_launch: bool,

    /// Extra arguments forwarded to the browser
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub browser_args: Vec<String>,
}

impl LauncherConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration rooted at `root` with every other option at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            profile: "default".to_string(),
            multiple_instances: false,
            addon_paths: AddonPathStrategy::default(),
            process: DEFAULT_PROCESS.to_string(),
            no_launch: false,
            browser_args: Vec::new(),
        }
    }

    /// Portable root, falling back to the executable's folder.
    ///
    /// The result is always absolute with `.` and `..` resolved, since it
    /// ends up inside `file:///` URIs and in the launcher state.
    pub fn resolve_root(&self) -> Result<PathBuf, ConfigError> {
        if let Some(root) = &self.root {
            return absolute_root(root);
        }
        let exe = std::env::current_exe().map_err(ConfigError::NoRoot)?;
        let folder = exe.parent().ok_or_else(|| {
            ConfigError::NoRoot(std::io::Error::other(format!(
                "{} has no parent folder",
                exe.display()
            )))
        })?;
        absolute_root(folder)
    }

    /// Folder layout derived from the resolved root.
    pub fn paths(&self) -> Result<AppPaths, ConfigError> {
        Ok(AppPaths::new(self.resolve_root()?))
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - An explicit root does not exist
    /// - The profile name is empty or is not a single folder name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root
            && !root.is_dir()
        {
            return Err(ConfigError::RootNotFound(root.clone()));
        }

        let invalid = |reason: &str| ConfigError::InvalidProfile {
            name: self.profile.clone(),
            reason: reason.to_string(),
        };
        if self.profile.trim().is_empty() {
            return Err(invalid("must not be empty"));
        }
        if self.profile.contains(['/', '\\']) || self.profile == "." || self.profile == ".." {
            return Err(invalid("must be a single folder name"));
        }

        Ok(())
    }
}

/// Make `root` absolute against the working directory and fold away `.` and
/// `..` components lexically.
fn absolute_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(root).map_err(ConfigError::NoRoot)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LauncherConfig::try_parse_from(["waterfox-portable"]).unwrap();
        assert_eq!(config.profile, "default");
        assert_eq!(config.addon_paths, AddonPathStrategy::Rewrite);
        assert_eq!(config.process, DEFAULT_PROCESS);
        assert!(!config.multiple_instances);
        assert!(config.browser_args.is_empty());
    }

    #[test]
    fn test_forwarded_arguments() {
        let config = LauncherConfig::try_parse_from([
            "waterfox-portable",
            "--profile",
            "work",
            "--addon-paths",
            "substitute",
            "--multiple-instances",
            "--",
            "-private-window",
            "https://example.org",
        ])
        .unwrap();

        assert_eq!(config.profile, "work");
        assert_eq!(config.addon_paths, AddonPathStrategy::Substitute);
        assert!(config.multiple_instances);
        assert_eq!(config.browser_args, ["-private-window", "https://example.org"]);
    }

    #[test]
    fn test_validate_profile_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LauncherConfig::with_root(dir.path());
        assert!(config.validate().is_ok());

        for bad in ["", "  ", "..", "a/b", r"a\b"] {
            config.profile = bad.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidProfile { .. })),
                "profile {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = LauncherConfig::with_root(dir.path().join("missing"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_explicit_root_is_used() {
        let config = LauncherConfig::with_root("/portable");
        assert_eq!(config.resolve_root().unwrap(), PathBuf::from("/portable"));
        assert_eq!(config.paths().unwrap().root, PathBuf::from("/portable"));
    }

    #[test]
    fn test_relative_root_made_absolute() {
        let cwd = std::env::current_dir().unwrap();

        let config = LauncherConfig::with_root("portable/./data/..");
        let root = config.resolve_root().unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, cwd.join("portable"));

        let config = LauncherConfig::with_root(".");
        assert_eq!(config.paths().unwrap().root, cwd);
    }

    #[test]
    fn test_parent_components_resolved() {
        let config = LauncherConfig::with_root("/media/usb/apps/../Waterfox Portable/.");
        assert_eq!(
            config.resolve_root().unwrap(),
            PathBuf::from("/media/usb/Waterfox Portable")
        );
    }
}

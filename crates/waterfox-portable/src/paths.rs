//! Portable folder layout.
//!
//! ```text
//! <root>/
//!   app/                    browser installation
//!     browser/features/     system add-ons
//!     defaults/pref/        autoconfig.js
//!     distribution/         policies.json
//!   data/
//!     profile/<name>/       browser profile
//!     crashreporter/
//!     plugins/
//!     policies.json         user policy overrides
//!     portapp.json          launcher state
//! ```

use std::path::{Path, PathBuf};

/// Container file holding the add-on startup manifest.
pub const ADDON_STARTUP_FILE: &str = "addonStartup.json.lz4";

/// Every path the launcher touches, derived from the portable root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Portable root
    pub root: PathBuf,
    /// Browser installation (`<root>/app`)
    pub app: PathBuf,
    /// Portable data (`<root>/data`)
    pub data: PathBuf,
}

impl AppPaths {
    /// Layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            app: root.join("app"),
            data: root.join("data"),
            root,
        }
    }

    /// Profile folder for `profile`.
    pub fn profile_dir(&self, profile: &str) -> PathBuf {
        self.data.join("profile").join(profile)
    }

    /// Extensions folder inside a profile.
    pub fn profile_extensions_dir(profile_dir: &Path) -> PathBuf {
        profile_dir.join("extensions")
    }

    /// System add-on folder of the installation.
    pub fn features_dir(&self) -> PathBuf {
        self.app.join("browser").join("features")
    }

    /// Crash reporter data folder.
    pub fn crashreporter_dir(&self) -> PathBuf {
        self.data.join("crashreporter")
    }

    /// Plugin folder.
    pub fn plugins_dir(&self) -> PathBuf {
        self.data.join("plugins")
    }

    /// Enterprise policies folder of the installation.
    pub fn distribution_dir(&self) -> PathBuf {
        self.app.join("distribution")
    }

    /// Default preferences folder of the installation.
    pub fn pref_dir(&self) -> PathBuf {
        self.app.join("defaults").join("pref")
    }

    /// User policy overrides.
    pub fn custom_policies_file(&self) -> PathBuf {
        self.data.join("policies.json")
    }

    /// Launcher state file.
    pub fn state_file(&self) -> PathBuf {
        self.data.join("portapp.json")
    }

    /// Browser executable.
    pub fn process(&self, name: &str) -> PathBuf {
        self.app.join(name)
    }
}

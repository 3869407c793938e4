//! Portable launcher for Waterfox.
//!
//! This crate keeps a Waterfox installation and its profile together in one
//! movable folder:
//! - creates the portable data, profile, crash report and plugin folders
//! - writes enterprise policies and autoconfig into the installation
//! - migrates add-on install paths in `addonStartup.json.lz4` after a move
//! - starts the browser with a portable environment
//!
//! # Architecture
//!
//! - `config`: Configuration loading and validation
//! - `paths`: Portable folder layout
//! - `addons`: Add-on path migration entry point
//! - `policies` / `autoconfig`: Files written into the installation
//! - `environment`: Browser process environment
//! - `state`: State remembered between runs
//! - `launcher`: Preparation and launch orchestration
//!
//! # Example
//!
//! ```no_run
//! use waterfox_portable::{Launcher, LauncherConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = LauncherConfig::from_args();
//!     config.validate()?;
//!
//!     let launcher = Launcher::new(config)?;
//!     launcher.run()?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

// Module declarations
pub mod addons;
pub mod autoconfig;
pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod paths;
pub mod policies;
pub mod state;

// Re-exports for public API
pub use addons::{AddonPatchRequest, PatchOutcome, update_addon_startup};
pub use config::{AddonPathStrategy, LauncherConfig};
pub use error::{AddonPatchError, ConfigError, LauncherError};
pub use launcher::Launcher;
pub use paths::AppPaths;
pub use state::LauncherState;

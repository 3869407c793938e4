//! File formats touched by the Waterfox portable launcher
//!
//! This crate provides parsing and building support for the profile files
//! that embed absolute installation paths and therefore have to be rewritten
//! whenever the portable installation is moved.
//!
//! # Supported Formats
//!
//! - **mozLz4**: Mozilla's legacy single-block LZ4 container (`*.json.lz4`,
//!   `*.jsonlz4`), a fixed magic, a little-endian size and one raw LZ4 block
//! - **addonStartup**: The decoded `addonStartup.json` manifest describing
//!   where each add-on scope lives on disk
//!
//! # Example
//!
//! ```no_run
//! use waterfox_formats::addon_startup::{AddonStartup, InstallPaths};
//! use waterfox_formats::mozlz4;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let container = "profile/addonStartup.json.lz4";
//! let payload = mozlz4::read_file(container)?;
//!
//! let mut manifest = AddonStartup::parse(&payload)?;
//! manifest.rewrite_install_paths(&InstallPaths::new(
//!     "D:/Portable/data/profile/default/extensions",
//!     "D:/Portable/app/browser/features",
//! ))?;
//!
//! mozlz4::write_file(container, &manifest.to_vec()?)?;
//! # Ok(())
//! # }
//! ```
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Mozilla-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::needless_pass_by_value)] // Configuration types
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![warn(missing_docs)]

/// addonStartup.json manifest model and install path rewriting
///
/// The manifest lists every add-on scope (`app-global`, `app-profile`,
/// `app-system-defaults`, ...) together with the directory it was loaded
/// from and one `rootURI` per add-on. Those values are absolute, so moving
/// the portable installation silently disables every add-on until they are
/// rewritten.
///
/// See the [`addon_startup`] module for the two rewrite strategies.
pub mod addon_startup;
pub mod mozlz4;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

//! Waterfox Portable binary entry point.
//!
//! This is a thin wrapper around the waterfox-portable library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Prepares the portable profile
//! 4. Launches the browser and forwards its exit code
//!
//! For library usage, see the waterfox-portable crate documentation.

use anyhow::Result;
use waterfox_portable::{Launcher, LauncherConfig};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse configuration from CLI args
    let config = LauncherConfig::from_args();

    tracing::info!(
        "Configuration loaded: root={:?}, profile={}, addon_paths={:?}",
        config.root,
        config.profile,
        config.addon_paths
    );

    // Validate configuration
    config.validate()?;

    let launcher = Launcher::new(config)?;
    tracing::info!("Portable root: {}", launcher.paths().root.display());

    if let Some(status) = launcher.run()? {
        if !status.success() {
            tracing::warn!("Browser exited with {status}");
        }
        if let Some(code) = status.code()
            && code != 0
        {
            std::process::exit(code);
        }
    }

    Ok(())
}

//! Autoconfig files that lock the browser into portable behaviour.

use crate::error::LauncherError;
use crate::paths::AppPaths;
use std::fs;
use std::path::Path;

/// Contents of `<app>/defaults/pref/autoconfig.js`.
pub const AUTOCONFIG_JS: &str = r#"//
pref("general.config.filename", "portapps.cfg");
pref("general.config.obscure_value", 0);"#;

/// Contents of `<app>/portapps.cfg`.
pub const PORTAPPS_CFG: &str = r#"// Extensions scopes
lockPref("extensions.enabledScopes", 4);
lockPref("extensions.autoDisableScopes", 3);

// Don't show 'know your rights' on first run
pref("browser.rights.3.shown", true);

// Don't show WhatsNew on first run after every update
pref("browser.startup.homepage_override.mstone", "ignore");
"#;

/// Write both autoconfig files, creating the preferences folder.
pub fn write_autoconfig(paths: &AppPaths) -> Result<(), LauncherError> {
    let pref_dir = paths.pref_dir();
    fs::create_dir_all(&pref_dir).map_err(|source| LauncherError::CreateFolder {
        path: pref_dir.clone(),
        source,
    })?;

    write(&pref_dir.join("autoconfig.js"), AUTOCONFIG_JS)?;
    write(&paths.app.join("portapps.cfg"), PORTAPPS_CFG)
}

fn write(path: &Path, contents: &str) -> Result<(), LauncherError> {
    fs::write(path, contents).map_err(|source| LauncherError::Write {
        path: path.to_path_buf(),
        source,
    })
}

//! Browser process environment.
//!
//! The variables are applied to the child process only; the launcher's own
//! environment is never modified.

use crate::paths::AppPaths;
use std::ffi::OsString;

/// Environment for the browser process: crash reporting, telemetry, the
/// maintenance service and the updater are disabled, and crash data and
/// plugins live inside the portable data folder.
pub fn browser_environment(paths: &AppPaths) -> Vec<(&'static str, OsString)> {
    vec![
        ("MOZ_CRASHREPORTER", "0".into()),
        (
            "MOZ_CRASHREPORTER_DATA_DIRECTORY",
            paths.crashreporter_dir().into_os_string(),
        ),
        ("MOZ_CRASHREPORTER_DISABLE", "1".into()),
        ("MOZ_CRASHREPORTER_NO_REPORT", "1".into()),
        ("MOZ_DATA_REPORTING", "0".into()),
        ("MOZ_MAINTENANCE_SERVICE", "0".into()),
        ("MOZ_PLUGIN_PATH", paths.plugins_dir().into_os_string()),
        ("MOZ_UPDATER", "0".into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_browser_environment() {
        let paths = AppPaths::new("/portable");
        let env: HashMap<_, _> = browser_environment(&paths).into_iter().collect();

        assert_eq!(env.len(), 8);
        assert_eq!(env["MOZ_UPDATER"], "0");
        assert_eq!(env["MOZ_CRASHREPORTER_DISABLE"], "1");
        assert_eq!(env["MOZ_PLUGIN_PATH"], paths.plugins_dir().into_os_string());
        assert_eq!(
            env["MOZ_CRASHREPORTER_DATA_DIRECTORY"],
            paths.crashreporter_dir().into_os_string()
        );
    }
}

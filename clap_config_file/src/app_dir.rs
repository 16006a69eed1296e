//! Platform-conventional per-application configuration directories.

use camino::Utf8PathBuf;

#[cfg(not(any(unix, target_os = "redox")))]
use directories::BaseDirs;
#[cfg(any(unix, target_os = "redox"))]
use xdg::BaseDirectories;

/// Turn an application name into a directory name: words joined by `-`,
/// lower-cased.
#[cfg(any(unix, target_os = "redox"))]
fn posixify(app_name: &str) -> String {
    app_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Returns the directory holding configuration for `app_name`.
///
/// On Unix this is `$XDG_CONFIG_HOME/<app-name>` (falling back to
/// `~/.config`), with the name lower-cased and whitespace replaced by `-`.
/// Elsewhere it is the platform configuration directory joined with the
/// name. Returns `None` when no home directory can be determined or the
/// directory is not valid UTF-8.
#[must_use]
pub fn app_config_dir(app_name: &str) -> Option<Utf8PathBuf> {
    #[cfg(any(unix, target_os = "redox"))]
    let dir = {
        let xdg_dirs = BaseDirectories::new();
        xdg_dirs.get_config_home()?.join(posixify(app_name))
    };

    #[cfg(not(any(unix, target_os = "redox")))]
    let dir = BaseDirs::new()?.config_dir().join(app_name);

    Utf8PathBuf::from_path_buf(dir).ok()
}

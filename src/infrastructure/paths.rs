//! Path helpers for locating the durable data directory.
//!
//! The saved-jobs file and the optional log file live under a per-user data
//! directory. Paths from configuration may start with `~`, which is expanded
//! against `$HOME`.

use std::path::PathBuf;

/// Application directory name under the platform data root.
const APP_DIR: &str = "jobboard";

/// Returns the default data directory.
///
/// Resolves to `$HOME/.local/share/jobboard`. When `HOME` is unset (service
/// accounts, some CI sandboxes) it falls back to `./.jobboard` in the working
/// directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".").join(format!(".{APP_DIR}")),
        |home| PathBuf::from(home).join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or a tilde with no `HOME` to expand to, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use jobboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        assert_eq!(expand_tilde("/var/lib/jobs"), PathBuf::from("/var/lib/jobs"));
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn data_dir_ends_with_app_name() {
        let dir = default_data_dir();
        let name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.ends_with(APP_DIR));
    }
}

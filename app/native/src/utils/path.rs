//! Expansion of user-supplied paths.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
///
/// Absolute and relative paths are returned unchanged; surrounding
/// whitespace is trimmed and an empty string yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::new();
    }
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `path` and, if still relative, joins it onto `base_dir`.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);
    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }
    base_dir.join(expanded)
}

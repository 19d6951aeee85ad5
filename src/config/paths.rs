//! Tilde (`~`) expansion for configured paths.

use std::path::{Path, PathBuf};

/// Replace a leading `~` with the home directory.
///
/// Paths without a leading `~`, or systems without a home directory, are
/// returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

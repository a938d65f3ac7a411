use std::path::PathBuf;

use dirs_next::home_dir;

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Paths without a tilde prefix are returned untouched; when the home
/// directory cannot be determined the original path is kept as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

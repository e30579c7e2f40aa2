// Cache path utilities.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/package-lens on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "package-lens").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted key/value store.
pub fn store_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path() {
        // Path construction only, nothing touches the filesystem
        if let Some(path) = store_path() {
            assert!(path.ends_with("store.json"));
            assert_eq!(path.parent(), cache_dir().as_deref());
        }
    }
}

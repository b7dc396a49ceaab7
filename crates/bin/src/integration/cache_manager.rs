//! The rsrank price and profile cache on disk.
//!
//! One SQLite file holds close history per symbol and interval plus
//! sector/industry profiles, shared by every `rank` run. `RSRANK_CACHE_DIR`
//! moves it, e.g. to keep separate caches per universe.

use rsrank_data::{DataError, SqliteCache};
use std::path::PathBuf;

/// Environment variable overriding the cache directory.
const CACHE_DIR_ENV: &str = "RSRANK_CACHE_DIR";

const DB_FILE: &str = "rsrank.db";

/// Cache directory: `override_dir` if set and non-empty, otherwise the
/// platform cache dir (`~/.cache/rsrank`, `~/Library/Caches/rsrank`,
/// `%LOCALAPPDATA%\rsrank`).
fn resolve_cache_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rsrank")
        })
}

/// Path of the cache database.
pub(crate) fn cache_path() -> PathBuf {
    resolve_cache_dir(std::env::var_os(CACHE_DIR_ENV).map(PathBuf::from)).join(DB_FILE)
}

/// Open the cache, creating its directory if needed.
pub(crate) fn open_cache() -> Result<SqliteCache, DataError> {
    let path = cache_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    SqliteCache::new(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_wins() {
        let dir = resolve_cache_dir(Some(PathBuf::from("/tmp/rs-cache")));
        assert_eq!(dir, PathBuf::from("/tmp/rs-cache"));
    }

    #[test]
    fn test_empty_override_falls_back() {
        let dir = resolve_cache_dir(Some(PathBuf::new()));
        assert!(dir.ends_with("rsrank"));
        assert_eq!(dir, resolve_cache_dir(None));
    }
}

//! Versioned flag cache document.
//!
//! One configuration run produces one cache document: the flag-group table
//! plus enough context (schema version, host identity, timestamp) for a
//! consumer to decide whether the cached flags still apply. The file is
//! truncated and rewritten on every run.

use crate::error::{CacheError, Result};
use crate::flags::FlagTable;
use crate::host::HostInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current cache schema version.
pub const CACHE_SCHEMA_VERSION: &str = "1.0.0";

/// Default cache file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "scons.cache";

/// Complete flag cache for one configuration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlagCache {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// ISO 8601 timestamp of when the probes ran.
    pub generated_at: String,

    /// Host the flags were probed on.
    pub host: HostInfo,

    /// Flag groups registered during the run.
    pub groups: FlagTable,
}

impl FlagCache {
    /// Wrap a finished flag table into a cache document.
    pub fn new(host: HostInfo, groups: FlagTable) -> Self {
        Self {
            schema_version: CACHE_SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            host,
            groups,
        }
    }

    /// Load a cache document from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| CacheError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| CacheError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write the cache document to `path`, replacing any prior contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialize {
            reason: e.to_string(),
        })?;

        fs::write(path, contents).map_err(|e| CacheError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Verify the document's schema version matches this build.
    pub fn check_schema(&self) -> Result<()> {
        if self.schema_version != CACHE_SCHEMA_VERSION {
            return Err(CacheError::VersionMismatch {
                expected: CACHE_SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FlagGroup;
    use crate::host::OsFamily;

    fn sample_cache() -> FlagCache {
        let mut groups = FlagTable::new();
        groups.insert(
            "mad",
            FlagGroup::new(vec!["-lmad".to_string(), "-I/usr/include".to_string()])
                .with_origin("pkg-config --libs --cflags mad"),
        );
        groups.insert("math", FlagGroup::new(vec!["-lm".to_string()]));

        FlagCache::new(
            HostInfo {
                os: OsFamily::Linux,
                arch: "x86_64".to_string(),
            },
            groups,
        )
    }

    #[test]
    fn test_new_stamps_schema_version() {
        let cache = sample_cache();
        assert_eq!(cache.schema_version, CACHE_SCHEMA_VERSION);
        assert!(cache.check_schema().is_ok());
        assert!(!cache.generated_at.is_empty());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);

        let cache = sample_cache();
        cache.save(&path).unwrap();

        let loaded = FlagCache::load(&path).unwrap();
        assert_eq!(loaded, cache);
        assert_eq!(loaded.groups.get("mad").unwrap().flags[0], "-lmad");
    }

    #[test]
    fn test_save_overwrites_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        std::fs::write(&path, "stale garbage").unwrap();

        sample_cache().save(&path).unwrap();

        let loaded = FlagCache::load(&path).unwrap();
        assert!(loaded.groups.contains("mad"));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FlagCache::load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, CacheError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let err = FlagCache::load(&path).unwrap_err();
        assert!(matches!(err, CacheError::Parse { .. }));
    }

    #[test]
    fn test_save_to_unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened for writing as a file
        let err = sample_cache().save(dir.path()).unwrap_err();
        assert!(matches!(err, CacheError::Write { .. }));
    }

    #[test]
    fn test_schema_mismatch_detected() {
        let mut cache = sample_cache();
        cache.schema_version = "0.0.1".to_string();

        let err = cache.check_schema().unwrap_err();
        assert!(matches!(err, CacheError::VersionMismatch { .. }));
    }
}

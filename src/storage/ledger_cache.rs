//! Local cache of ledger entries
//!
//! Keeps the entries pulled from the ledger API in `ledger_cache.json` so a
//! report can be rebuilt without the network. A refresh replaces one month
//! wholesale: entries deleted upstream must disappear locally too.
//!
//! Every save writes a temp file and renames it over the cache. The file
//! being replaced is kept as `ledger_cache.json.bak`, so one bad import can
//! be rolled back by hand.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::SplitError;
use crate::models::ReportPeriod;
use crate::services::LedgerEntry;

/// Serializable cache data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CacheData {
    entries: Vec<LedgerEntry>,
}

/// Outcome of a month replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceResult {
    pub removed: usize,
    pub stored: usize,
}

/// Repository for cached ledger entries, keyed by ledger id
pub struct LedgerCache {
    path: PathBuf,
    data: RwLock<BTreeMap<u64, LedgerEntry>>,
}

impl LedgerCache {
    /// Create a cache backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Copy of the cache as it was before the last save
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data = read_cache_file(&self.path, &self.backup_path())?;

        let mut data = self.data.write().map_err(|e| {
            SplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for entry in file_data.entries {
            data.insert(entry.id, entry);
        }

        debug!(path = %self.path.display(), count = data.len(), "loaded ledger cache");
        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(|e| {
            SplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| a.entry.date.cmp(&b.entry.date).then(a.id.cmp(&b.id)));

        write_cache_file(&self.path, &self.backup_path(), &CacheData { entries })
    }

    /// Replace every entry of a period with fresh entries
    ///
    /// Entries dated in `period` are removed first; then `entries` are
    /// upserted by id.
    pub fn replace_period(
        &self,
        period: &ReportPeriod,
        entries: Vec<LedgerEntry>,
    ) -> Result<ReplaceResult, SplitError> {
        let mut data = self.data.write().map_err(|e| {
            SplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = data.len();
        data.retain(|_, cached| !period.contains(cached.entry.date));
        let removed = before - data.len();

        let stored = entries.len();
        for entry in entries {
            data.insert(entry.id, entry);
        }

        info!(%period, removed, stored, "replaced cached ledger entries");
        Ok(ReplaceResult { removed, stored })
    }

    /// Entries dated within the inclusive range, oldest first
    pub fn entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, SplitError> {
        let data = self.data.read().map_err(|e| {
            SplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<_> = data
            .values()
            .filter(|e| e.entry.date >= start && e.entry.date <= end)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.entry.date.cmp(&b.entry.date).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Number of cached entries
    pub fn count(&self) -> Result<usize, SplitError> {
        let data = self.data.read().map_err(|e| {
            SplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

fn read_cache_file(path: &Path, backup: &Path) -> Result<CacheData, SplitError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CacheData::default()),
        Err(e) => {
            return Err(SplitError::Storage(format!(
                "Failed to read ledger cache {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&contents).map_err(|e| {
        SplitError::Storage(format!(
            "Ledger cache {} is corrupt ({}); restore {} or re-run `cache import`",
            path.display(),
            e,
            backup.display()
        ))
    })
}

fn write_cache_file(path: &Path, backup: &Path, data: &CacheData) -> Result<(), SplitError> {
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| SplitError::Storage(format!("Failed to serialize ledger cache: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Same directory as the cache so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;

    if path.exists() {
        fs::copy(path, backup).map_err(|e| {
            SplitError::Storage(format!("Failed to back up {}: {}", path.display(), e))
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SplitError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote ledger cache");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RawEntry};
    use tempfile::TempDir;

    fn ledger_entry(id: u64, y: i32, m: u32, d: u32, amount: i64) -> LedgerEntry {
        LedgerEntry {
            id,
            entry: RawEntry::new(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                "Food_A",
                Money::from_units(amount),
            ),
        }
    }

    fn create_cache() -> (TempDir, LedgerCache) {
        let temp_dir = TempDir::new().unwrap();
        let cache = LedgerCache::new(temp_dir.path().join("data").join("ledger_cache.json"));
        cache.load().unwrap();
        (temp_dir, cache)
    }

    #[test]
    fn test_replace_period_drops_stale_entries() {
        let (_temp_dir, cache) = create_cache();
        let jan = ReportPeriod::monthly(2025, 1).unwrap();

        cache
            .replace_period(
                &jan,
                vec![
                    ledger_entry(1, 2025, 1, 3, 100),
                    ledger_entry(2, 2025, 1, 9, 200),
                    ledger_entry(3, 2024, 12, 30, 300),
                ],
            )
            .unwrap();

        // Entry 2 was deleted upstream; entry 1 changed amount
        let result = cache
            .replace_period(&jan, vec![ledger_entry(1, 2025, 1, 3, 150)])
            .unwrap();
        assert_eq!(result, ReplaceResult { removed: 2, stored: 1 });

        let all = cache
            .entries_between(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .unwrap();
        let ids: Vec<u64> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(all[1].entry.amount.units(), 150);
    }

    #[test]
    fn test_entries_between_is_inclusive() {
        let (_temp_dir, cache) = create_cache();
        let jan = ReportPeriod::monthly(2025, 1).unwrap();
        cache
            .replace_period(
                &jan,
                vec![
                    ledger_entry(5, 2025, 1, 31, 1),
                    ledger_entry(4, 2025, 1, 1, 1),
                    ledger_entry(6, 2025, 1, 15, 1),
                ],
            )
            .unwrap();

        let entries = cache
            .entries_between(jan.start_date(), jan.end_date())
            .unwrap();
        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 6, 5]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, cache) = create_cache();
        let jan = ReportPeriod::monthly(2025, 1).unwrap();
        cache
            .replace_period(&jan, vec![ledger_entry(1, 2025, 1, 3, 100)])
            .unwrap();
        cache.save().unwrap();

        let reloaded = LedgerCache::new(temp_dir.path().join("data").join("ledger_cache.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp_dir, cache) = create_cache();
        assert_eq!(cache.count().unwrap(), 0);
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_save_keeps_previous_cache_as_backup() {
        let (temp_dir, cache) = create_cache();
        let jan = ReportPeriod::monthly(2025, 1).unwrap();

        cache
            .replace_period(&jan, vec![ledger_entry(1, 2025, 1, 3, 100)])
            .unwrap();
        cache.save().unwrap();
        assert!(!cache.backup_path().exists());

        cache
            .replace_period(&jan, vec![ledger_entry(2, 2025, 1, 4, 200)])
            .unwrap();
        cache.save().unwrap();

        let backup = LedgerCache::new(cache.backup_path());
        backup.load().unwrap();
        let ids: Vec<u64> = backup
            .entries_between(jan.start_date(), jan.end_date())
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1]);
        assert!(!temp_dir.path().join("data").join("ledger_cache.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_cache_names_file_and_backup() {
        let (_temp_dir, cache) = create_cache();
        fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        fs::write(cache.path(), "not json at all").unwrap();

        let err = cache.load().unwrap_err();
        assert!(matches!(err, SplitError::Storage(_)));
        let message = err.to_string();
        assert!(message.contains("ledger_cache.json is corrupt"));
        assert!(message.contains("ledger_cache.json.bak"));
    }
}

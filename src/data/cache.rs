use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::correlation::CorrelationMatrix;
use super::loader::{load_table, LoadError};
use super::model::{NumericTable, Table};
use super::numeric::select_numeric;

// ---------------------------------------------------------------------------
// Dataset – everything derived from one file
// ---------------------------------------------------------------------------

/// A loaded file with its numeric sub-table and correlation matrix.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub table: Table,
    pub numeric: NumericTable,
    pub matrix: CorrelationMatrix,
}

impl Dataset {
    /// Read `path`, keep its numeric columns and correlate every pair.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let table = load_table(path)?;
        let numeric = select_numeric(&table);
        let matrix = CorrelationMatrix::from_table(&numeric);

        log::info!(
            "Loaded {} rows x {} columns from {} ({} numeric: {:?})",
            table.n_rows(),
            table.n_columns(),
            path.display(),
            numeric.n_columns(),
            numeric.column_names()
        );

        Ok(Dataset {
            path: path.to_path_buf(),
            table,
            numeric,
            matrix,
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetCache – memoized loads keyed by path
// ---------------------------------------------------------------------------

/// Keeps every successfully loaded [`Dataset`] for the life of the process.
/// Entries only go away through [`DatasetCache::invalidate`]. Failed loads
/// are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        if let Some(hit) = self.lock().get(path) {
            log::debug!("cache hit for {}", path.display());
            return Ok(Arc::clone(hit));
        }

        let loaded = Arc::new(Dataset::load(path)?);

        // Another caller may have filled the slot meanwhile; first one wins.
        let mut entries = self.lock();
        let entry = entries.entry(path.to_path_buf()).or_insert(loaded);
        Ok(Arc::clone(entry))
    }

    /// Drop the entry for `path` so the next load reads the file again.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.lock().remove(path).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Dataset>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extrema::find_extrema;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_selects_numeric_columns_and_correlates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "abc.csv",
            "label,A,B,C\nw,1,2,4\nx,2,4,3\ny,3,6,2\nz,4,8,1\n",
        );

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.table.n_columns(), 4);
        assert_eq!(ds.numeric.column_names(), vec!["A", "B", "C"]);
        assert_eq!(ds.matrix.labels(), ["A", "B", "C"]);

        let ex = find_extrema(&ds.matrix).unwrap();
        assert_eq!((ex.max.first.as_str(), ex.max.second.as_str()), ("A", "B"));
        assert_eq!(ex.max.coefficient, 1.0);
        assert_eq!((ex.min.first.as_str(), ex.min.second.as_str()), ("A", "C"));
        assert_eq!(ex.min.coefficient, -1.0);
    }

    #[test]
    fn repeated_loads_hit_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "x.csv", "a,b\n1,3\n2,1\n3,2\n");
        let cache = DatasetCache::new();

        let first = cache.load(&path).unwrap();
        // The file is gone; a second load must not touch the disk.
        std::fs::remove_file(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.matrix, second.matrix);
        assert_eq!(cache.lock().len(), 1);
    }

    #[test]
    fn invalidate_forces_a_fresh_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "x.csv", "a,b\n1,1\n2,2\n3,3\n");
        let cache = DatasetCache::new();

        let before = cache.load(&path).unwrap();
        assert_eq!(before.matrix.get(0, 1), 1.0);

        write_csv(&dir, "x.csv", "a,b\n1,3\n2,2\n3,1\n");
        assert_eq!(cache.load(&path).unwrap().matrix.get(0, 1), 1.0);

        assert!(cache.invalidate(&path));
        assert_eq!(cache.load(&path).unwrap().matrix.get(0, 1), -1.0);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DatasetCache::new();

        assert!(matches!(
            cache.load(&path),
            Err(LoadError::FileNotFound { .. })
        ));
        assert!(cache.lock().is_empty());

        write_csv(&dir, "late.csv", "a,b\n1,2\n2,4\n");
        assert!(cache.load(&path).is_ok());
        assert_eq!(cache.lock().len(), 1);
    }

    #[test]
    fn single_numeric_column_has_no_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "one.csv", "name,score\nkim,3\nlee,5\n");
        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.matrix.dim(), 1);
        assert!(find_extrema(&ds.matrix).is_err());
    }
}

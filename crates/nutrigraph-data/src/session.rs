//! Load-once access to the cleaned table.
//!
//! The table is read on first access and shared read-only for the rest of the
//! process. A failed load is not cached, so a later call retries.

use crate::io::read_cleaned;
use crate::record::CleanedTable;
use nutrigraph_common::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

static GLOBAL_SESSION: OnceCell<DataSession> = OnceCell::new();

/// A cleaned file and its lazily loaded contents.
#[derive(Debug)]
pub struct DataSession {
    path: PathBuf,
    table: OnceCell<Arc<CleanedTable>>,
}

impl DataSession {
    /// A session over `path`; nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// The process-wide session. The first caller fixes the path; later
    /// callers get the same session regardless of the path they pass.
    pub fn global(path: &Path) -> &'static DataSession {
        GLOBAL_SESSION.get_or_init(|| {
            debug!(path = %path.display(), "initialising global data session");
            DataSession::new(path)
        })
    }

    /// Path of the cleaned file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the table has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The cleaned table, reading it on first call.
    pub fn table(&self) -> Result<Arc<CleanedTable>> {
        self.table
            .get_or_try_init(|| {
                let table = read_cleaned(&self.path)?;
                info!(rows = table.len(), "Loaded cleaned data from {}", self.path.display());
                Ok(Arc::new(table))
            })
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::write_cleaned;
    use crate::record::fixtures::record;

    #[test]
    fn test_loads_once_and_shares_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        write_cleaned(&path, &CleanedTable::new(vec![record(2020, "AL", "C", "Q", 1.0)])).unwrap();

        let session = DataSession::new(&path);
        assert!(!session.is_loaded());
        let first = session.table().unwrap();
        assert!(session.is_loaded());

        std::fs::remove_file(&path).unwrap();
        let second = session.table().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        let session = DataSession::new(&path);

        assert!(session.table().unwrap_err().is_missing_input());
        assert!(!session.is_loaded());

        write_cleaned(&path, &CleanedTable::default()).unwrap();
        assert!(session.table().unwrap().is_empty());
    }
}

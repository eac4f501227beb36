//! redb-based job store
//!
//! Values land exactly as the upstream order system wrote them (JSON
//! strings), so this layer never parses job payloads. TTLs live in a
//! side table keyed by job key; expired rows are invisible to reads
//! and scans and are physically removed by the purge task.

use super::{JobStore, ScanPage, StoreResult, StoreUnavailable};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Job table: key = job key, value = JSON
const JOBS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("print_jobs");

/// Expiry side table: key = job key, value = expiry instant (epoch millis)
const EXPIRATIONS_TABLE: TableDefinition<&str, i64> = TableDefinition::new("print_job_expirations");

#[derive(Debug, Error)]
pub enum RedbStoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RedbStoreError> for StoreUnavailable {
    fn from(err: RedbStoreError) -> Self {
        StoreUnavailable::new(err.to_string())
    }
}

/// Embedded [`JobStore`] backend
#[derive(Clone)]
pub struct RedbJobStore {
    db: Arc<Database>,
}

impl RedbJobStore {
    /// Open or create the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RedbStoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, RedbStoreError> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    fn init_tables(db: Database) -> Result<Self, RedbStoreError> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(JOBS_TABLE)?;
            let _ = write_txn.open_table(EXPIRATIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn scan_page_sync(
        &self,
        prefix: &str,
        cursor: u64,
        count: usize,
    ) -> Result<ScanPage, RedbStoreError> {
        let now = now_millis();
        let page_size = count.max(1);
        let read_txn = self.db.begin_read()?;
        let jobs = read_txn.open_table(JOBS_TABLE)?;
        let expirations = read_txn.open_table(EXPIRATIONS_TABLE)?;

        let mut keys = Vec::new();
        let mut next = None;
        // Index over live (non-expired) matches only, so cursors stay
        // valid after a purge removes dead rows.
        let mut live_index: u64 = 0;

        for result in jobs.range(prefix..)? {
            let (key, _) = result?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }

            let expired = match expirations.get(key)? {
                Some(at) => at.value() <= now,
                None => false,
            };
            if expired {
                continue;
            }

            if live_index >= cursor {
                if keys.len() == page_size {
                    next = Some(live_index);
                    break;
                }
                keys.push(key.to_string());
            }
            live_index += 1;
        }

        Ok(ScanPage { keys, next })
    }

    fn get_sync(&self, key: &str) -> Result<Option<String>, RedbStoreError> {
        let now = now_millis();
        let read_txn = self.db.begin_read()?;
        let expirations = read_txn.open_table(EXPIRATIONS_TABLE)?;

        if let Some(at) = expirations.get(key)? {
            if at.value() <= now {
                return Ok(None);
            }
        }

        let jobs = read_txn.open_table(JOBS_TABLE)?;
        Ok(jobs.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn put_sync(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), RedbStoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut jobs = write_txn.open_table(JOBS_TABLE)?;
            jobs.insert(key, value)?;

            let mut expirations = write_txn.open_table(EXPIRATIONS_TABLE)?;
            match ttl {
                Some(ttl) => {
                    expirations.insert(key, now_millis() + ttl.as_millis() as i64)?;
                }
                None => {
                    // Overwriting an expiring job with a permanent one
                    // must drop the stale deadline
                    expirations.remove(key)?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete_sync(&self, key: &str) -> Result<(), RedbStoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut jobs = write_txn.open_table(JOBS_TABLE)?;
            jobs.remove(key)?;

            let mut expirations = write_txn.open_table(EXPIRATIONS_TABLE)?;
            expirations.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn purge_expired_sync(&self) -> Result<usize, RedbStoreError> {
        let now = now_millis();
        let write_txn = self.db.begin_write()?;
        let mut purged = 0;
        {
            let mut jobs = write_txn.open_table(JOBS_TABLE)?;
            let mut expirations = write_txn.open_table(EXPIRATIONS_TABLE)?;

            let mut to_delete = Vec::new();
            for result in expirations.iter()? {
                let (key, at) = result?;
                if at.value() <= now {
                    to_delete.push(key.value().to_string());
                }
            }

            for key in &to_delete {
                jobs.remove(key.as_str())?;
                expirations.remove(key.as_str())?;
                purged += 1;
            }
        }
        write_txn.commit()?;
        Ok(purged)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[async_trait]
impl JobStore for RedbJobStore {
    async fn scan_page(&self, prefix: &str, cursor: u64, count: usize) -> StoreResult<ScanPage> {
        Ok(self.scan_page_sync(prefix, cursor, count)?)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_sync(key)?)
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        Ok(self.put_sync(key, value, ttl)?)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        Ok(self.delete_sync(key)?)
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        Ok(self.purge_expired_sync()?)
    }
}

//! Shared job store interface
//!
//! The relay treats the store as an external collaborator: jobs are created
//! by the upstream order system; this side only scans, reads and deletes.
//! Two backends exist:
//! - [`RedbJobStore`] - embedded redb database, the deployment backend
//! - [`MemoryJobStore`] - in-memory map for tests and development
//!
//! Both honor the same paged-scan contract: [`JobStore::scan_page`] returns
//! one page and a continuation cursor; [`JobStore::scan_by_prefix`] drains
//! pages until the backend signals completion, so a result is never cut off
//! at a page boundary.

pub mod memory;
pub mod redb;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use memory::MemoryJobStore;
pub use redb::RedbJobStore;

/// Keys requested per scan page
pub const SCAN_COUNT: usize = 100;

/// Store transport failure
///
/// Every backend fault maps to this one error; the relay does not retry
/// internally (retry policy is a deployment concern).
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct StoreUnavailable {
    reason: String,
}

impl StoreUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreUnavailable>;

/// One page of a prefix scan
///
/// `next` carries the continuation cursor; `None` means the scan is
/// complete. Key order within and across pages is backend-defined.
#[derive(Debug, Clone)]
pub struct ScanPage {
    pub keys: Vec<String>,
    pub next: Option<u64>,
}

/// Key-value store operations the relay needs
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch one page of keys matching `prefix`, starting at `cursor`
    /// (0 = first page)
    async fn scan_page(&self, prefix: &str, cursor: u64, count: usize) -> StoreResult<ScanPage>;

    /// Read a value; absent keys are `Ok(None)`, not an error
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, optionally with a time-to-live
    ///
    /// The relay's request paths never write; this exists for the seed
    /// utility and tests, mirroring the set-with-TTL the upstream order
    /// system uses.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Delete a key; deleting an absent key succeeds
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Physically remove entries whose TTL has elapsed, returning the count
    async fn purge_expired(&self) -> StoreResult<usize>;

    /// Scan all keys matching `prefix`, draining pagination to completion
    async fn scan_by_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut cursor = 0;

        loop {
            let page = self.scan_page(prefix, cursor, SCAN_COUNT).await?;
            keys.extend(page.keys);
            match page.next {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(keys)
    }
}

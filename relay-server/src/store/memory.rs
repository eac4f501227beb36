//! In-memory job store for tests and development

use super::{JobStore, ScanPage, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: String,
    /// Expiry instant in epoch milliseconds; `None` never expires
    expires_at: Option<i64>,
}

impl StoredEntry {
    fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// Map-backed [`JobStore`]
///
/// Keys iterate in lexicographic order, which keeps scan pages stable
/// across calls. Expired entries stay in the map until [`purge_expired`]
/// runs but are invisible to reads and scans.
///
/// [`purge_expired`]: JobStore::purge_expired
#[derive(Clone, Default)]
pub struct MemoryJobStore {
    entries: Arc<RwLock<BTreeMap<String, StoredEntry>>>,
    page_limit: Option<usize>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of keys served per scan page, regardless of the
    /// requested count. Lets tests force multi-page scans without
    /// seeding hundreds of jobs.
    pub fn with_page_limit(limit: usize) -> Self {
        Self {
            entries: Arc::default(),
            page_limit: Some(limit),
        }
    }

    fn effective_count(&self, requested: usize) -> usize {
        match self.page_limit {
            Some(limit) => requested.min(limit).max(1),
            None => requested.max(1),
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn scan_page(&self, prefix: &str, cursor: u64, count: usize) -> StoreResult<ScanPage> {
        let now = now_millis();
        let entries = self.entries.read().await;

        let live: Vec<&String> = entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired(now))
            .map(|(key, _)| key)
            .collect();

        let offset = cursor as usize;
        let page_size = self.effective_count(count);
        let keys: Vec<String> = live
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|key| (*key).clone())
            .collect();

        let consumed = offset + keys.len();
        let next = (consumed < live.len()).then_some(consumed as u64);

        Ok(ScanPage { keys, next })
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = now_millis();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let expires_at = ttl.map(|ttl| now_millis() + ttl.as_millis() as i64);
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        let now = now_millis();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}

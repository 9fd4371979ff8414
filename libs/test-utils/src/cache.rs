use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use redis_connection::{CacheError, CacheResult, CacheStore};
use tokio::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: Bytes,
    pub ttl: Duration,
}

#[derive(Default)]
struct State {
    entries: HashMap<String, StoredEntry>,
    gets: usize,
    sets: usize,
    read_failure: Option<String>,
    write_failure: Option<String>,
}

/// In-memory cache store that remembers every write and its TTL and can be
/// told to fail reads or writes.
#[derive(Clone, Default)]
pub struct RecordingCacheStore {
    state: Arc<Mutex<State>>,
}

impl RecordingCacheStore {
    pub fn new() -> Self { Self::default() }

    /// Every `get` fails with a store error (not a miss).
    pub fn failing_reads(reason: &str) -> Self {
        let store = Self::default();
        store
            .state
            .try_lock()
            .expect("fresh store is unlocked")
            .read_failure = Some(reason.to_string());
        store
    }

    /// Every `set` fails; reads behave normally.
    pub fn failing_writes(reason: &str) -> Self {
        let store = Self::default();
        store
            .state
            .try_lock()
            .expect("fresh store is unlocked")
            .write_failure = Some(reason.to_string());
        store
    }

    pub async fn seed(&self, key: &str, value: impl Into<Bytes>, ttl: Duration) {
        self.state.lock().await.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.into(),
                ttl,
            },
        );
    }

    pub async fn entry(&self, key: &str) -> Option<StoredEntry> {
        self.state.lock().await.entries.get(key).cloned()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub async fn get_count(&self) -> usize { self.state.lock().await.gets }

    pub async fn set_count(&self) -> usize { self.state.lock().await.sets }
}

#[async_trait]
impl CacheStore for RecordingCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        let mut state = self.state.lock().await;
        state.gets += 1;
        if let Some(reason) = &state.read_failure {
            return Err(CacheError::Unavailable(reason.clone()));
        }
        Ok(state.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(
        &self, key: &str, value: Bytes, ttl: Duration,
    ) -> CacheResult<()> {
        let mut state = self.state.lock().await;
        state.sets += 1;
        if let Some(reason) = &state.write_failure {
            return Err(CacheError::Unavailable(reason.clone()));
        }
        state
            .entries
            .insert(key.to_string(), StoredEntry { value, ttl });
        Ok(())
    }
}

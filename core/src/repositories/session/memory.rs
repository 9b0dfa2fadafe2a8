//! In-process implementation of SessionStore
//!
//! Backs single-instance deployments (`CACHE_BACKEND=memory`) and the test
//! suites. Expiry is measured with `tokio::time::Instant`, so paused-clock
//! tests can move past TTLs with `tokio::time::advance`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::StoreError;

use super::r#trait::SessionStore;

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Session store held in process memory
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
    unavailable: AtomicBool,
    timing_out: AtomicBool,
}

/// Timeout reported while [`InMemorySessionStore::set_timing_out`] is on
const SIMULATED_TIMEOUT_MS: u64 = 500;

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every subsequent call fail with `StoreError::Timeout`
    pub fn set_timing_out(&self, timing_out: bool) {
        self.timing_out.store(timing_out, Ordering::SeqCst);
    }

    /// Remaining TTL of a live key, `None` when absent or persistent
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .and_then(|entry| entry.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.timing_out.load(Ordering::SeqCst) {
            return Err(StoreError::Timeout {
                millis: SIMULATED_TIMEOUT_MS,
            });
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "in-memory store switched off".to_string(),
            });
        }
        Ok(())
    }

    fn wrong_type(key: &str) -> StoreError {
        StoreError::Unavailable {
            message: format!("WRONGTYPE operation against key '{}'", key),
        }
    }

    /// Drop the entry if it has expired, then hand back the live one
    fn live_entry<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
        now: Instant,
    ) -> Option<&'a mut Entry> {
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        entries.get_mut(key)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        if ttl.is_zero() {
            entries.remove(key);
            return Ok(());
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: Value::Text(value.to_string()),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        match Self::live_entry(&mut entries, key, Instant::now()) {
            None => Ok(None),
            Some(Entry { value: Value::Text(text), .. }) => Ok(Some(text.clone())),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let now = Instant::now();

        Ok(entries.remove(key).is_some_and(|entry| entry.is_live(now)))
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        Ok(Self::live_entry(&mut entries, key, Instant::now()).is_some())
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        match Self::live_entry(&mut entries, key, Instant::now()) {
            Some(Entry { value: Value::Hash(fields), .. }) => {
                fields.insert(field.to_string(), value.to_string());
            }
            Some(_) => return Err(Self::wrong_type(key)),
            None => {
                let fields = HashMap::from([(field.to_string(), value.to_string())]);
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: Value::Hash(fields),
                        expires_at: None,
                    },
                );
            }
        }
        Ok(())
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        match Self::live_entry(&mut entries, key, Instant::now()) {
            None => Ok(None),
            Some(Entry { value: Value::Hash(fields), .. }) => Ok(fields.get(field).cloned()),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        let removed = match Self::live_entry(&mut entries, key, Instant::now()) {
            None => return Ok(false),
            Some(Entry { value: Value::Hash(fields), .. }) => {
                let removed = fields.remove(field).is_some();
                if !fields.is_empty() {
                    return Ok(removed);
                }
                removed
            }
            Some(_) => return Err(Self::wrong_type(key)),
        };

        // An empty hash no longer exists
        entries.remove(key);
        Ok(removed)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let now = Instant::now();

        if Self::live_entry(&mut entries, key, now).is_none() {
            return Ok(false);
        }
        if ttl.is_zero() {
            entries.remove(key);
            return Ok(true);
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Some(now + ttl);
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

//! The query cache.
//!
//! Reads are cached by [`CacheKey`] and concurrent reads for the same key are
//! coalesced into a single network call. Writes never go through the cache;
//! they describe their consequences as [`CacheCommand`]s which
//! [`QueryCache::apply`] executes against the cached entries.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::{watch, Mutex, RwLock};

use crate::clients::HttpError;

mod commands;
mod key;

pub use commands::CacheCommand;
pub use key::CacheKey;

type FetchResult = Result<serde_json::Value, HttpError>;
type InFlightReceiver = watch::Receiver<Option<FetchResult>>;

/// Either run the fetch or wait on whoever already is.
enum FetchRole {
    Leader(watch::Sender<Option<FetchResult>>),
    Follower(InFlightReceiver),
}

/// Concurrent read-through cache keyed by [`CacheKey`].
///
/// Entries hold raw JSON; typed deserialization happens at the resource
/// layer. The cache never expires entries on its own; staleness is handled
/// by explicit invalidation commands and by rebuilding around a fresh
/// operation index.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<CacheKey, serde_json::Value>>,
    in_flight: Mutex<HashMap<CacheKey, InFlightReceiver>>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryCache>();
};

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached entry for `key`, or runs `fetch` to populate it.
    ///
    /// Concurrent callers for the same key share a single fetch: the first
    /// caller becomes the leader and runs `fetch`; the rest wait and receive
    /// a copy of the leader's outcome. Only successful results are cached:
    /// a shared failure is reported to every waiter but the next read
    /// fetches again.
    ///
    /// # Errors
    ///
    /// Propagates the fetch's [`HttpError`], cloned to each waiter.
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, fetch: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult>,
    {
        if let Some(hit) = self.entries.read().await.get(key) {
            return Ok(hit.clone());
        }

        let role = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(key) {
                Some(receiver) => FetchRole::Follower(receiver.clone()),
                None => {
                    let (sender, receiver) = watch::channel(None);
                    in_flight.insert(key.clone(), receiver);
                    FetchRole::Leader(sender)
                }
            }
        };

        match role {
            FetchRole::Leader(sender) => {
                let result = fetch().await;
                if let Ok(value) = &result {
                    self.entries.write().await.insert(key.clone(), value.clone());
                }
                self.in_flight.lock().await.remove(key);
                // Waiters may all have dropped; a send error is fine.
                let _ = sender.send(Some(result.clone()));
                result
            }
            FetchRole::Follower(mut receiver) => loop {
                let settled = receiver.borrow_and_update().clone();
                if let Some(result) = settled {
                    return result;
                }
                if receiver.changed().await.is_err() {
                    // The leader is gone. Its final send (if any) is still
                    // readable from the channel.
                    return receiver.borrow().clone().unwrap_or_else(|| {
                        Err(HttpError::Network {
                            message: "coalesced request was abandoned".to_string(),
                        })
                    });
                }
            },
        }
    }

    /// Returns a copy of the cached entry for `key`, if present.
    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        self.entries.read().await.get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any existing entry.
    pub async fn set(&self, key: CacheKey, value: serde_json::Value) {
        self.entries.write().await.insert(key, value);
    }

    /// Removes the entry for `key`, returning it if it was present.
    pub async fn remove(&self, key: &CacheKey) -> Option<serde_json::Value> {
        self.entries.write().await.remove(key)
    }

    /// Replaces the entry for `key` only when one already exists.
    ///
    /// Returns true when a replacement happened.
    pub async fn update_if_present(&self, key: &CacheKey, value: serde_json::Value) -> bool {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(existing) => {
                *existing = value;
                true
            }
            None => false,
        }
    }

    /// Drops every entry belonging to `operation_id`.
    pub async fn invalidate_operation(&self, operation_id: &str) {
        self.entries
            .write()
            .await
            .retain(|key, _| key.operation_id() != operation_id);
    }

    /// Drops all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true when the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Executes cache mutation commands in order.
    pub async fn apply(&self, commands: Vec<CacheCommand>) {
        for command in commands {
            match command {
                CacheCommand::UpsertDetail { key, item } => {
                    self.update_if_present(&key, item).await;
                }
                CacheCommand::InsertIntoLists {
                    operation_id,
                    item,
                    id_field,
                } => {
                    self.patch_operation(&operation_id, |page| {
                        insert_into_page(page, &item, &id_field);
                    })
                    .await;
                }
                CacheCommand::ReplaceInLists {
                    operation_id,
                    item,
                    id_field,
                } => {
                    self.patch_operation(&operation_id, |page| {
                        replace_in_page(page, &item, &id_field);
                    })
                    .await;
                }
                CacheCommand::RemoveFromLists {
                    operation_id,
                    id_field,
                    id,
                } => {
                    self.patch_operation(&operation_id, |page| {
                        remove_from_page(page, &id_field, &id);
                    })
                    .await;
                }
                CacheCommand::RemoveDetail { key } => {
                    self.remove(&key).await;
                }
                CacheCommand::InvalidateLists { operation_id } => {
                    self.invalidate_operation(&operation_id).await;
                }
            }
        }
    }

    /// Applies `patch` to every cached entry of `operation_id`.
    async fn patch_operation<F>(&self, operation_id: &str, mut patch: F)
    where
        F: FnMut(&mut serde_json::Value),
    {
        let mut entries = self.entries.write().await;
        for (key, value) in entries.iter_mut() {
            if key.operation_id() == operation_id {
                patch(value);
            }
        }
    }
}

fn page_items(page: &mut serde_json::Value) -> Option<&mut Vec<serde_json::Value>> {
    page.get_mut("Items")?.as_array_mut()
}

fn insert_into_page(page: &mut serde_json::Value, item: &serde_json::Value, id_field: &str) {
    let Some(items) = page_items(page) else {
        return;
    };
    let id = item.get(id_field);
    let already_present =
        id.is_some() && items.iter().any(|existing| existing.get(id_field) == id);
    if !already_present {
        items.push(item.clone());
    }
}

fn replace_in_page(page: &mut serde_json::Value, item: &serde_json::Value, id_field: &str) {
    let Some(items) = page_items(page) else {
        return;
    };
    let Some(id) = item.get(id_field) else {
        return;
    };
    for existing in items.iter_mut() {
        if existing.get(id_field) == Some(id) {
            *existing = item.clone();
        }
    }
}

fn remove_from_page(page: &mut serde_json::Value, id_field: &str, id: &str) {
    let Some(items) = page_items(page) else {
        return;
    };
    items.retain(|existing| existing.get(id_field).and_then(|v| v.as_str()) != Some(id));
}

//! Cache mutation commands.
//!
//! Successful writes describe their cache consequences as explicit commands
//! instead of mutating the cache inline. The resource layer builds a command
//! list from the operation that ran, and [`QueryCache::apply`] executes it;
//! tests can assert on the commands themselves.
//!
//! [`QueryCache::apply`]: crate::cache::QueryCache::apply

use crate::cache::key::CacheKey;

/// A single cache consequence of a successful write.
#[derive(Clone, Debug)]
pub enum CacheCommand {
    /// Replace the detail entry at `key` with `item`, but only when an entry
    /// already exists. A write never fabricates a detail entry for an item
    /// nobody has read.
    UpsertDetail {
        /// The detail cache key.
        key: CacheKey,
        /// The item as returned by the server.
        item: serde_json::Value,
    },
    /// Append `item` to every cached list page of `operation_id` that does
    /// not already contain an item with the same `id_field` value.
    /// Idempotent: replaying the command leaves pages unchanged.
    InsertIntoLists {
        /// The list operation whose pages are patched.
        operation_id: String,
        /// The created item.
        item: serde_json::Value,
        /// Name of the identifying field, normally `ID`.
        id_field: String,
    },
    /// Replace, in every cached list page of `operation_id`, the item whose
    /// `id_field` matches the item's. Pages without a match are untouched.
    ReplaceInLists {
        /// The list operation whose pages are patched.
        operation_id: String,
        /// The updated item.
        item: serde_json::Value,
        /// Name of the identifying field, normally `ID`.
        id_field: String,
    },
    /// Remove, from every cached list page of `operation_id`, items whose
    /// `id_field` equals `id`.
    RemoveFromLists {
        /// The list operation whose pages are patched.
        operation_id: String,
        /// Name of the identifying field, normally `ID`.
        id_field: String,
        /// The removed item's identifier.
        id: String,
    },
    /// Drop the detail entry at `key`.
    RemoveDetail {
        /// The detail cache key.
        key: CacheKey,
    },
    /// Drop every cached page of `operation_id`. Used when list membership
    /// cannot be patched precisely.
    InvalidateLists {
        /// The list operation whose pages are dropped.
        operation_id: String,
    },
}

//! Durable snapshot of the commerce store.
//!
//! Only `{cart, wishlist}` survive a restart; identity, auth readiness and
//! the search query are re-derived each session and never serialized. The
//! write-through hook is split from the mutation logic so cart semantics and
//! persistence can be tested independently.

use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;

/// Namespace key for the serialized snapshot in local durable storage.
pub const STORAGE_KEY: &str = "gibson-collections-storage";

/// Local durable key-value storage collaborator.
pub trait KeyValue {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

impl<K: KeyValue + ?Sized> KeyValue for &mut K {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value)
    }
}

/// The durable subset of store state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cart: Vec<CartLine>,
    pub wishlist: Vec<String>,
}

/// Receives a snapshot after every cart/wishlist mutation.
pub trait SnapshotSink {
    fn persist(&mut self, snapshot: &Snapshot);
}

/// No-op sink for callers that want pure in-memory state.
impl SnapshotSink for () {
    fn persist(&mut self, _snapshot: &Snapshot) {}
}

/// Writes each snapshot as JSON under [`STORAGE_KEY`]. Store mutations are
/// total, so a serialization failure is logged and swallowed rather than
/// surfaced to the caller.
pub struct KvSink<K: KeyValue> {
    kv: K,
}

impl<K: KeyValue> KvSink<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn into_inner(self) -> K {
        self.kv
    }
}

impl<K: KeyValue> SnapshotSink for KvSink<K> {
    fn persist(&mut self, snapshot: &Snapshot) {
        match serde_json::to_string(snapshot) {
            Ok(blob) => self.kv.set(STORAGE_KEY, blob),
            Err(err) => tracing::warn!(%err, "failed to serialize commerce snapshot"),
        }
    }
}

/// Reads the persisted snapshot once at startup. Absent or malformed data
/// falls back to an empty snapshot, never an error.
pub fn load_snapshot(kv: &impl KeyValue) -> Snapshot {
    let Some(blob) = kv.get(STORAGE_KEY) else {
        return Snapshot::default();
    };
    match serde_json::from_str(&blob) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(%err, "malformed commerce snapshot, starting empty");
            Snapshot::default()
        }
    }
}

/// In-memory key-value store for tests.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: std::collections::HashMap<String, String>,
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

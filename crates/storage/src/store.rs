//! The key/value persistence port.

use async_trait::async_trait;

/// Injected persistence port for small client-side state.
///
/// Values are stored as strings; structured values are JSON-encoded by the
/// typed facade ([`crate::ClientStore`]). The store is single-writer from
/// the perspective of one open session — no cross-process coordination is
/// attempted (a write in one session does not notify another).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key has never been written.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write (insert or replace) a value.
    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove a key; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

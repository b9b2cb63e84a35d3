//! `mizan-storage` — durable client-side key/value persistence.
//!
//! The console keeps a small amount of cross-session state on the client:
//! the auth token, the cached user profile, the selected institution id, a
//! cached institution list, the cached company display name, and two legacy
//! tax flags used as an offline fallback. This crate models that storage as
//! an injected port (`KeyValueStore`) so the backing can be swapped (secure
//! storage, a different on-disk format, an in-memory store for tests)
//! without touching business logic.

pub mod facade;
pub mod keys;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use facade::ClientStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::KeyValueStore;

//! In-process storage backend.
//!
//! [`MemoryStore`] implements every repository trait over one set of tables
//! guarded by a single mutex. Each trait call holds the lock for its whole
//! duration, so every call is atomic with respect to every other call,
//! including the guarded loan insert and the cascading user delete.
//!
//! Used when `STORAGE_BACKEND=memory` and by integration tests that do not
//! need PostgreSQL. Data does not survive a restart.

mod store;

pub use store::MemoryStore;

//! # Storage Layer
//!
//! Records live as a single JSON array under one key of a key-value backend.
//! [`RecordStore`] owns that key and applies the retention policy; the
//! [`KvBackend`] trait is the only thing that knows where bytes end up.
//!
//! ## Read Path
//!
//! Every [`RecordStore::load`] does three things:
//!
//! 1. **Parse**: read the key and deserialize the array one entry at a time.
//!    A missing key is an empty collection. A value that is not a JSON array
//!    is logged and also treated as empty. An entry that cannot be read as a
//!    record is skipped with a warning. A backend failure is returned to the
//!    caller, so nothing is ever saved over a collection that was not read.
//! 2. **Purge**: drop soft-deleted records whose retention window has elapsed
//!    (or that have no `deletedAt` at all).
//! 3. **Write-back**: persist the survivors immediately, so a purge is durable
//!    and the next `load` never sees the purged records again. Skipped when
//!    the value was not an array or any entry was skipped.
//!
//! ## Write Path
//!
//! [`RecordStore::save`] overwrites the whole array. `create`, `soft_delete`
//! and `patch` only build new values; callers persist them with `save`.
//!
//! ## Consistency
//!
//! `load` → mutate → `save` is not atomic. The store is single-writer: two
//! processes (or two terminal sessions) working on the same key race, and the
//! last `save` wins. This is a known gap, not something the store guards.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── blogs.json          # The record collection
//! └── blogadmin.toml      # Optional configuration
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::KvBackend;
pub use record_store::{RecordStore, DEFAULT_STORAGE_KEY};

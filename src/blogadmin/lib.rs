//! # Blogadmin Architecture
//!
//! Blogadmin is a **UI-agnostic blog administration library**: posts are
//! created, listed, edited and soft-deleted through a small API, and kept as
//! one JSON array in a key-value backend. The bundled terminal client is just
//! one caller.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, render.rs)                          │
//! │  - Parses arguments, validates uploads, prints results      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - load → change → save, returns structured CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: retention purge on every load               │
//! │  - KvBackend: FsBackend (production), MemBackend (testing)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Delete and Purge
//!
//! Deleting a post only flags it (`isDeleted`, `deletedAt`). Flagged posts
//! disappear from listings immediately and from storage on the first load
//! after the retention window (7 days by default). There is no undelete.
//!
//! ## Determinism
//!
//! The store never reads the wall clock or generates ids itself. A
//! [`clock::Clock`] and an [`ids::IdGenerator`] are injected, so tests can
//! step a [`clock::ManualClock`] across the retention boundary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Record store and key-value backends
//! - [`model`]: `BlogRecord`, `NewRecord`, `RecordPatch`
//! - [`query`]: Filtering and pagination helpers
//! - [`retention`]: Purge rule for soft-deleted posts
//! - [`validate`]: Image upload checks for callers
//! - [`config`]: Configuration management
//! - [`clock`], [`ids`]: Injected time and identity sources
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod query;
pub mod retention;
pub mod store;
pub mod validate;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

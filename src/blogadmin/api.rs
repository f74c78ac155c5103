//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UIs. It dispatches, and that's it: filtering, retention
//! and persistence rules live in `commands/` and `store/`.
//!
//! ## Generic Over the Store's Collaborators
//!
//! `BlogApi<B, C, G>` is generic over the backend, clock and id generator:
//! - Production: `BlogApi<FsBackend>` (system clock, UUID ids)
//! - Testing: `BlogApi<MemBackend, ManualClock, SequentialIds>`

use crate::clock::{Clock, SystemClock};
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::model::{NewRecord, RecordPatch};
use crate::store::{KvBackend, RecordStore};

pub use crate::commands::list::ListFilter;
pub use crate::commands::{CmdMessage, DisplayRecord, MessageLevel, Page};

pub struct BlogApi<B: KvBackend, C: Clock = SystemClock, G: IdGenerator = UuidGenerator> {
    store: RecordStore<B, C, G>,
}

impl<B: KvBackend, C: Clock, G: IdGenerator> BlogApi<B, C, G> {
    pub fn new(store: RecordStore<B, C, G>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<B, C, G> {
        &self.store
    }

    pub fn create_post(&self, data: NewRecord) -> Result<CmdResult> {
        commands::create::run(&self.store, data)
    }

    pub fn list_posts(&self, filter: ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn view_post(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn update_post(&self, id: &str, patch: &RecordPatch) -> Result<CmdResult> {
        commands::update::run(&self.store, id, patch)
    }

    pub fn delete_post(&self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, id)
    }
}

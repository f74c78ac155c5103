use crate::clock::Clock;
use crate::commands::{require, CmdResult, DisplayRecord};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::store::{KvBackend, RecordStore};

/// Fetches one post by id. Soft-deleted posts that have not been purged yet
/// are still returned.
pub fn run<B: KvBackend, C: Clock, G: IdGenerator>(
    store: &RecordStore<B, C, G>,
    id: &str,
) -> Result<CmdResult> {
    let records = store.load()?;
    let record = require(&records, id)?.clone();
    Ok(CmdResult::default().with_listed_records(vec![DisplayRecord::new(
        record,
        store.retention(),
    )]))
}

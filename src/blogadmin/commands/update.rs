use crate::clock::Clock;
use crate::commands::{require, CmdMessage, CmdResult, DisplayRecord};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::RecordPatch;
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend, C: Clock, G: IdGenerator>(
    store: &RecordStore<B, C, G>,
    id: &str,
    patch: &RecordPatch,
) -> Result<CmdResult> {
    let records = store.load()?;
    require(&records, id)?;

    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let records = store.patch(records, id, patch);
    store.save(&records)?;

    let updated = require(&records, id)?.clone();
    result.add_message(CmdMessage::success(format!(
        "Post updated: {}",
        updated.title
    )));
    result
        .affected_records
        .push(DisplayRecord::new(updated, store.retention()));
    Ok(result)
}

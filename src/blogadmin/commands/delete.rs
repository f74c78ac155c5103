use crate::clock::Clock;
use crate::commands::{require, CmdMessage, CmdResult, DisplayRecord};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend, C: Clock, G: IdGenerator>(
    store: &RecordStore<B, C, G>,
    id: &str,
) -> Result<CmdResult> {
    let records = store.load()?;
    let already_deleted = require(&records, id)?.is_deleted;

    let mut result = CmdResult::default();
    let records = if already_deleted {
        records
    } else {
        let records = store.soft_delete(records, id);
        store.save(&records)?;
        records
    };

    let record = require(&records, id)?.clone();
    if already_deleted {
        result.add_message(CmdMessage::warning(format!(
            "Post already deleted: {}",
            record.title
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Post deleted: {}",
            record.title
        )));
    }
    result
        .affected_records
        .push(DisplayRecord::new(record, store.retention()));
    Ok(result)
}

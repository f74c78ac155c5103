use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, DisplayRecord};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::NewRecord;
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend, C: Clock, G: IdGenerator>(
    store: &RecordStore<B, C, G>,
    data: NewRecord,
) -> Result<CmdResult> {
    let mut records = store.load()?;
    let record = store.create(data);
    records.push(record.clone());
    store.save(&records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post created: {}",
        record.title
    )));
    result
        .affected_records
        .push(DisplayRecord::new(record, store.retention()));
    Ok(result)
}

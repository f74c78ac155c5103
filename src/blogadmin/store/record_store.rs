use super::backend::KvBackend;
use crate::clock::{Clock, SystemClock};
use crate::error::{BlogError, Result, StorageReadError};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::model::{BlogRecord, NewRecord, RecordPatch};
use crate::retention::RetentionPolicy;

pub const DEFAULT_STORAGE_KEY: &str = "blogs";

/// The record store: one JSON array under one key, with lazy purge on read.
pub struct RecordStore<B: KvBackend, C: Clock = SystemClock, G: IdGenerator = UuidGenerator> {
    backend: B,
    clock: C,
    ids: G,
    key: String,
    retention: RetentionPolicy,
}

impl<B: KvBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            clock: SystemClock,
            ids: UuidGenerator,
            key: DEFAULT_STORAGE_KEY.to_string(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl<B: KvBackend, C: Clock, G: IdGenerator> RecordStore<B, C, G> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RecordStore<B, C2, G> {
        RecordStore {
            backend: self.backend,
            clock,
            ids: self.ids,
            key: self.key,
            retention: self.retention,
        }
    }

    pub fn with_ids<G2: IdGenerator>(self, ids: G2) -> RecordStore<B, C, G2> {
        RecordStore {
            backend: self.backend,
            clock: self.clock,
            ids,
            key: self.key,
            retention: self.retention,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Reads the stored collection as-is: no purge, no write-back.
    ///
    /// A key that was never written reads as an empty collection. Entries
    /// that cannot be read as a record are skipped with a warning; the rest
    /// of the collection is kept.
    pub fn read(&self) -> Result<Vec<BlogRecord>> {
        self.read_entries().map(|(records, _)| records)
    }

    // Backend failures are returned as is. A value that is not a JSON array
    // becomes `StorageReadError::Malformed`.
    fn read_entries(&self) -> Result<(Vec<BlogRecord>, usize)> {
        let raw = match self.backend.get(&self.key)? {
            Some(raw) => raw,
            None => return Ok((Vec::new(), 0)),
        };
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(StorageReadError::Malformed)?;

        let mut records = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<BlogRecord>(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping unreadable record");
                    skipped += 1;
                }
            }
        }
        Ok((records, skipped))
    }

    /// Loads the collection, purging expired soft-deleted records.
    ///
    /// The surviving collection is written back before returning, so a purge
    /// is durable. A stored value that is not a JSON array is logged and
    /// treated as empty. Nothing is written back in that case, or when any
    /// entry had to be skipped, so the stored value stays intact until the
    /// next `save`.
    ///
    /// Backend read failures are returned: callers must not `save` over a
    /// collection they could not read.
    pub fn load(&self) -> Result<Vec<BlogRecord>> {
        let (records, skipped) = match self.read_entries() {
            Ok(read) => read,
            Err(BlogError::StorageRead(e)) => {
                tracing::warn!(key = %self.key, error = %e, "treating unreadable collection as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let (kept, purged) = self.retention.retain(records, self.clock.now());
        if purged > 0 {
            tracing::debug!(key = %self.key, purged, "purged expired records");
        }

        if skipped > 0 {
            tracing::warn!(key = %self.key, skipped, "not writing back a partially read collection");
        } else if let Err(e) = self.save(&kept) {
            tracing::warn!(key = %self.key, error = %e, "write-back after load failed");
        }
        Ok(kept)
    }

    /// Replaces the stored collection with `records`, verbatim.
    ///
    /// There is no merge and no version check. Two clients doing
    /// load → mutate → save concurrently will lose one side's changes.
    pub fn save(&self, records: &[BlogRecord]) -> Result<()> {
        let content = serde_json::to_string(records)?;
        self.backend.set(&self.key, &content)?;
        tracing::debug!(key = %self.key, count = records.len(), "saved collection");
        Ok(())
    }

    /// Builds a new active record with a fresh id and creation time.
    /// Nothing is persisted; append it to a loaded collection and `save`.
    pub fn create(&self, data: NewRecord) -> BlogRecord {
        BlogRecord::from_new(self.ids.next_id(), self.clock.now(), data)
    }

    /// Returns `records` with the record matching `id` soft-deleted at now.
    ///
    /// Deleting an already deleted record keeps its first `deletedAt`. An
    /// unknown id leaves the collection unchanged.
    pub fn soft_delete(&self, mut records: Vec<BlogRecord>, id: &str) -> Vec<BlogRecord> {
        let now = self.clock.now();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.mark_deleted(now);
        }
        records
    }

    /// Returns `records` with `patch` applied to the record matching `id`.
    pub fn patch(&self, mut records: Vec<BlogRecord>, id: &str, patch: &RecordPatch) -> Vec<BlogRecord> {
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            patch.apply(record);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ids::SequentialIds;
    use crate::model::{BlogStatus, RecordState};
    use crate::store::mem_backend::MemBackend;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn store_with(backend: MemBackend) -> (RecordStore<MemBackend, ManualClock, SequentialIds>, ManualClock) {
        let clock = ManualClock::new(start());
        let store = RecordStore::with_backend(backend)
            .with_clock(clock.clone())
            .with_ids(SequentialIds::new());
        (store, clock)
    }

    #[test]
    fn load_of_empty_backend_is_empty() {
        let (store, _) = store_with(MemBackend::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn create_assigns_identity_and_does_not_persist() {
        let (store, _) = store_with(MemBackend::new());
        let record = store.create(NewRecord::titled("Hello"));
        assert_eq!(record.id, "rec-1");
        assert_eq!(record.created_at, start());
        assert_eq!(record.status, BlogStatus::Draft);
        assert!(!record.is_deleted);
        assert_eq!(store.backend().raw(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn save_then_load_preserves_order() {
        let (store, _) = store_with(MemBackend::new());
        let records: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|t| store.create(NewRecord::titled(*t)))
            .collect();
        store.save(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn soft_delete_marks_only_the_target() {
        let (store, clock) = store_with(MemBackend::new());
        let records = vec![
            store.create(NewRecord::titled("a")),
            store.create(NewRecord::titled("b")),
        ];
        clock.advance(Duration::hours(1));

        let updated = store.soft_delete(records.clone(), "rec-2");
        assert_eq!(updated[0], records[0]);
        assert_eq!(updated[1].state(), RecordState::SoftDeleted);
        assert_eq!(updated[1].deleted_at, Some(start() + Duration::hours(1)));
    }

    #[test]
    fn soft_delete_twice_keeps_first_timestamp() {
        let (store, clock) = store_with(MemBackend::new());
        let records = vec![store.create(NewRecord::titled("a"))];

        let once = store.soft_delete(records, "rec-1");
        clock.advance(Duration::days(3));
        let twice = store.soft_delete(once.clone(), "rec-1");
        assert_eq!(once, twice);
    }

    #[test]
    fn soft_delete_unknown_id_is_noop() {
        let (store, _) = store_with(MemBackend::new());
        let records = vec![store.create(NewRecord::titled("a"))];
        assert_eq!(store.soft_delete(records.clone(), "nope"), records);
    }

    #[test]
    fn load_purges_expired_and_persists_removal() {
        let (store, clock) = store_with(MemBackend::new());
        let records = vec![
            store.create(NewRecord::titled("keep")),
            store.create(NewRecord::titled("drop")),
        ];
        let records = store.soft_delete(records, "rec-2");
        store.save(&records).unwrap();

        clock.advance(Duration::days(7));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "keep");

        let persisted = store.read().unwrap();
        assert_eq!(persisted, loaded);
    }

    #[test]
    fn load_keeps_deleted_within_window() {
        let (store, clock) = store_with(MemBackend::new());
        let records = store.soft_delete(vec![store.create(NewRecord::titled("a"))], "rec-1");
        store.save(&records).unwrap();

        clock.advance(Duration::days(6));
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn load_drops_deleted_records_without_timestamp() {
        let raw = r#"[
            {"id": "a", "title": "ok", "createdAt": "2024-05-01T09:00:00Z"},
            {"id": "b", "title": "broken", "createdAt": "2024-05-01T09:00:00Z", "isDeleted": true}
        ]"#;
        let (store, _) = store_with(MemBackend::new().with_raw(DEFAULT_STORAGE_KEY, raw));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a");
    }

    #[test]
    fn malformed_collection_reads_as_empty_without_overwrite() {
        let (store, _) = store_with(MemBackend::new().with_raw(DEFAULT_STORAGE_KEY, "{not json"));
        assert!(store.read().is_err());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.backend().raw(DEFAULT_STORAGE_KEY).as_deref(), Some("{not json"));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn failed_write_back_still_returns_filtered_view() {
        let (store, clock) = store_with(MemBackend::new());
        let records = store.soft_delete(vec![store.create(NewRecord::titled("a"))], "rec-1");
        store.save(&records).unwrap();

        clock.advance(Duration::days(10));
        store.backend().set_simulate_write_error(true);
        assert!(store.load().unwrap().is_empty());
        // The purge did not stick, so the raw record is still there.
        assert_eq!(store.read().unwrap().len(), 1);
    }

    #[test]
    fn save_surfaces_backend_errors() {
        let (store, _) = store_with(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        assert!(store.save(&[]).is_err());
    }

    #[test]
    fn custom_key_and_retention() {
        let (store, clock) = store_with(MemBackend::new());
        let store = store.with_key("posts").with_retention(RetentionPolicy::days(1));
        let records = store.soft_delete(vec![store.create(NewRecord::titled("a"))], "rec-1");
        store.save(&records).unwrap();
        assert!(store.backend().raw("posts").is_some());
        assert!(store.backend().raw(DEFAULT_STORAGE_KEY).is_none());

        clock.advance(Duration::days(1));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn patch_updates_matching_record() {
        let (store, _) = store_with(MemBackend::new());
        let records = vec![
            store.create(NewRecord::titled("a")),
            store.create(NewRecord::titled("b")),
        ];
        let patch = RecordPatch {
            title: Some("b2".into()),
            ..Default::default()
        };
        let updated = store.patch(records, "rec-2", &patch);
        assert_eq!(updated[0].title, "a");
        assert_eq!(updated[1].title, "b2");
    }

    #[test]
    fn one_bad_record_does_not_empty_the_collection() {
        let raw = r#"[
            {"id": "a", "title": "first", "createdAt": "2024-05-01T09:00:00Z"},
            {"id": "b", "title": "second", "createdAt": "2024-05-01T09:00:00Z"},
            {"id": "c", "title": "binned", "createdAt": "2024-05-01T09:00:00Z", "isDeleted": true, "deletedAt": ""}
        ]"#;
        let (store, _) = store_with(MemBackend::new().with_raw(DEFAULT_STORAGE_KEY, raw));

        let loaded = store.load().unwrap();
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.read().unwrap(), loaded);
    }

    #[test]
    fn unreadable_entries_are_skipped_without_write_back() {
        let raw = r#"[
            {"id": "a", "title": "ok", "createdAt": "2024-05-01T09:00:00Z"},
            {"id": "b", "title": "no creation time"},
            42
        ]"#;
        let (store, _) = store_with(MemBackend::new().with_raw(DEFAULT_STORAGE_KEY, raw));

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a");
        assert_eq!(store.backend().write_count(), 0);
        assert_eq!(store.backend().raw(DEFAULT_STORAGE_KEY).as_deref(), Some(raw));
    }

    #[test]
    fn backend_read_failure_is_returned_not_emptied() {
        let (store, _) = store_with(MemBackend::new());
        store.save(&[store.create(NewRecord::titled("a"))]).unwrap();
        store.backend().set_simulate_read_error(true);

        assert!(store.load().is_err());
        assert!(store.read().is_err());
        assert_eq!(store.backend().write_count(), 1);
    }
}

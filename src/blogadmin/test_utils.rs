use crate::clock::ManualClock;
use crate::ids::SequentialIds;
use crate::model::NewRecord;
use crate::store::mem_backend::MemBackend;
use crate::store::RecordStore;
use chrono::{DateTime, TimeZone, Utc};

pub type TestStore = RecordStore<MemBackend, ManualClock, SequentialIds>;

/// A deterministic store: in-memory backend, sequential ids, and a manual
/// clock starting at [`TestEnv::start`].
pub struct TestEnv {
    pub store: TestStore,
    pub clock: ManualClock,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }

    pub fn with_backend(backend: MemBackend) -> Self {
        let clock = ManualClock::new(Self::start());
        let store = RecordStore::with_backend(backend)
            .with_clock(clock.clone())
            .with_ids(SequentialIds::new());
        Self { store, clock }
    }

    /// Persists one draft per title, in order, and returns their ids.
    pub fn seed(&self, titles: &[&str]) -> Vec<String> {
        let mut records = match self.store.load() {
            Ok(records) => records,
            Err(e) => panic!("loading test store failed: {}", e),
        };
        let mut ids = Vec::new();
        for title in titles {
            let record = self.store.create(NewRecord::titled(*title));
            ids.push(record.id.clone());
            records.push(record);
        }
        if let Err(e) = self.store.save(&records) {
            panic!("seeding test store failed: {}", e);
        }
        ids
    }
}

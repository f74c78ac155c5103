use std::cell::Cell;
use uuid::Uuid;

/// Source of record identifiers. Ids are opaque strings to the rest of the crate.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs, the production generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`rec-1`, `rec-2`, ...) for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("rec-{}", n)
    }
}

use super::backend::KvBackend;
use crate::error::{BlogError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `KvBackend` trait on `&self` without paying for a lock.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw value, e.g. data written by another client or corrupt JSON.
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation, e.g. an unreadable file.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(BlogError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(BlogError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("blogs").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let backend = MemBackend::new();
        backend.set("blogs", "[]").unwrap();
        assert_eq!(backend.get("blogs").unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn simulated_write_error() {
        let backend = MemBackend::new().with_raw("blogs", "[1]");
        backend.set_simulate_write_error(true);
        assert!(backend.set("blogs", "[]").is_err());
        assert_eq!(backend.raw("blogs").as_deref(), Some("[1]"));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn simulated_read_error() {
        let backend = MemBackend::new().with_raw("blogs", "[]");
        backend.set_simulate_read_error(true);
        assert!(backend.get("blogs").is_err());
        backend.set_simulate_read_error(false);
        assert_eq!(backend.get("blogs").unwrap().as_deref(), Some("[]"));
    }
}

use super::StorageBackend;
use crate::error::{Result, SpotsError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the application is
/// single-threaded, which lets `StorageBackend` keep `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_unavailable: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (e.g. a full quota).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make every operation fail, as when storage is disabled entirely.
    pub fn set_simulate_unavailable(&self, simulate: bool) {
        *self.simulate_unavailable.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value, bypassing any normalization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Test helper to inspect the raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if *self.simulate_unavailable.borrow() {
            return Err(SpotsError::Store("Simulated unavailable storage".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        if *self.simulate_write_error.borrow() {
            return Err(SpotsError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

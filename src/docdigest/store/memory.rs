use super::KeyValueStore;
use crate::error::{DigestError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` so the `KeyValueStore` trait can take `&self` everywhere.
#[derive(Default)]
pub struct MemStore {
    entries: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    write_budget: RefCell<Option<usize>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, for testing error paths.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Allow `writes` more successful `set` calls, then fail every later one.
    /// `None` lifts the limit.
    pub fn set_write_budget(&self, writes: Option<usize>) {
        *self.write_budget.borrow_mut() = writes;
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DigestError::Store("Simulated write error".to_string()));
        }
        if let Some(budget) = self.write_budget.borrow_mut().as_mut() {
            if *budget == 0 {
                return Err(DigestError::Store("Write budget exhausted".to_string()));
            }
            *budget -= 1;
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

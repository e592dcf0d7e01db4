use super::backend::StateBackend;
use crate::error::{Result, TierError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded,
/// which lets the `StateBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to seed a raw value, bypassing the write-error switch.
    pub fn seed(&self, key: &str, text: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
    }
}

impl StateBackend for MemBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(TierError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_location() {
        let backend = MemBackend::new();
        assert_eq!(backend.load("k").unwrap(), None);
        backend.save("k", "v").unwrap();
        assert_eq!(backend.load("k").unwrap(), Some("v".to_string()));
        backend.save("k", "w").unwrap();
        assert_eq!(backend.load("k").unwrap(), Some("w".to_string()));
        assert_eq!(backend.location("k"), PathBuf::from("memory://k"));
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.save("k", "old").unwrap();
        backend.set_simulate_write_error(true);
        assert!(matches!(backend.save("k", "new"), Err(TierError::Io(_))));
        assert_eq!(backend.load("k").unwrap(), Some("old".to_string()));
    }
}

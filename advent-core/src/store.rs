//! Persistence seam for the revealed set.

use crate::revealed::RevealedSet;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// String-keyed persistent store holding the revealed set.
/// Platform-specific implementations should provide this.
pub trait RevealedStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be accessed.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Read the revealed set, treating unreadable or malformed state as empty.
pub fn load_revealed<S: RevealedStore + ?Sized>(store: &S, key: &str) -> RevealedSet {
    match store.read(key) {
        Ok(raw) => RevealedSet::load(raw.as_deref()),
        Err(err) => {
            log::warn!("revealed state unavailable under {key}: {err}");
            RevealedSet::new()
        }
    }
}

/// Persist the revealed set as an ascending JSON array.
///
/// # Errors
///
/// Propagates the store's write error.
pub fn save_revealed<S: RevealedStore + ?Sized>(
    store: &S,
    key: &str,
    revealed: &RevealedSet,
) -> Result<(), S::Error> {
    store.write(key, &revealed.to_json())
}

/// In-memory store shared between clones, used by tests and the tester.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any validation.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl RevealedStore for MemoryStore {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

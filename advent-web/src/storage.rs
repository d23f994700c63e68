//! `localStorage` binding for the revealed set.

use crate::dom;
use advent_core::RevealedStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage write failed: {0}")]
    Write(String),
}

/// Reads and writes go straight to `window.localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalRevealedStore;

impl RevealedStore for LocalRevealedStore {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage =
            dom::local_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage =
            dom::local_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::Write(dom::js_error_message(&e)))
    }
}

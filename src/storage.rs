//! Key-value persistence collaborator shared by all stores.
//!
//! Values are JSON documents. Stores read their key once at construction and
//! write the whole document back after every mutation.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::Error;

/// Storage key for the interest map.
pub const INTERESTS_KEY: &str = "user_interests";
/// Storage key for the summary history.
pub const SUMMARY_HISTORY_KEY: &str = "summary_history";
/// Storage key for the news source list.
pub const SOURCES_KEY: &str = "news_sources";

/// Blob store addressed by string keys.
///
/// Methods take `&self` so one backend can be shared (via `Rc`) by every
/// store in a single-threaded session.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the value stored under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// In-process storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load and decode a JSON document, falling back to `default` when the key
/// is absent, unreadable, or malformed.
pub(crate) fn load_or_default<T, F>(storage: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read from storage, using defaults");
            return default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed stored data, using defaults");
            default()
        }
    }
}

/// Encode and write a JSON document, logging instead of failing.
///
/// Returns whether the write succeeded so callers can report it.
pub(crate) fn save_logged<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> bool {
    let result = serde_json::to_string(value)
        .map_err(Error::from)
        .and_then(|json| storage.put(key, &json));

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to persist to storage");
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    /// Storage whose writes always fail and whose reads return a fixed value.
    #[derive(Default)]
    pub struct FailingStorage {
        pub stored: Option<String>,
    }

    impl KeyValueStore for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Ok(self.stored.clone())
        }

        fn put(&self, key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::InvalidInput(format!("storage quota exceeded for {key}")))
        }
    }
}

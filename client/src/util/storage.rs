//! Browser `localStorage` as a guard key/value backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Credentials written at login and read by route guards live in
//! `localStorage`, under the key names from the guard table. This module is
//! the only place that touches `web_sys::Storage` for them.
//!
//! TRADE-OFFS
//! ==========
//! During SSR there is no browser storage: reads report nothing stored (so
//! the server renders the loading placeholder) and writes fail loudly.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use guard::{KeyValueStore, KeyedStore, StoreError};

/// `window.localStorage`, resolved on every call so a revoked storage
/// permission surfaces as an error instead of a stale handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

/// Credential store used by every guard and login flow in the app.
pub type BrowserStore = KeyedStore<LocalStorage>;

#[must_use]
pub fn browser_store() -> BrowserStore {
    KeyedStore::new(LocalStorage)
}

#[cfg(feature = "hydrate")]
fn storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_owned()))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            storage()?
                .get_item(key)
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Write { key: key.to_owned(), reason: format!("{e:?}") })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = value;
            Err(StoreError::Write { key: key.to_owned(), reason: unavailable_on_server() })
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Write { key: key.to_owned(), reason: format!("{e:?}") })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StoreError::Write { key: key.to_owned(), reason: unavailable_on_server() })
        }
    }
}

#[cfg(any(test, not(feature = "hydrate")))]
fn unavailable_on_server() -> String {
    "browser storage is not available on the server".to_owned()
}

//! Credential persistence behind an injected capability.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps credentials in `localStorage`, the CLI in a JSON file,
//! tests in memory. All three are flat string key/value stores, so the only
//! backend seam is [`KeyValueStore`]. [`KeyedStore`] layers the guard table's
//! key names on top and is the single place those names are read or written.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::kind::PrincipalKind;
use crate::principal::{Credential, Principal};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be opened at all.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode principal: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Flat string storage with the shape of the browser's `Storage` API.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the key cannot be removed.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Credential access used by the guard and the login/logout flows.
pub trait CredentialStore {
    /// Stored credential for `kind`. Unreadable or blank entries read as `None`.
    fn get(&self, kind: PrincipalKind) -> Option<Credential>;

    /// Persist a credential and, when known, the principal it belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if either entry cannot be written.
    fn set(&self, credential: &Credential, principal: Option<&Principal>) -> Result<(), StoreError>;

    /// Remove the credential and the cached principal for `kind`.
    ///
    /// # Errors
    ///
    /// Returns the first removal error; removal of the other entry is still attempted.
    fn clear(&self, kind: PrincipalKind) -> Result<(), StoreError>;

    /// Principal cached at login, if present and decodable.
    fn cached_principal(&self, kind: PrincipalKind) -> Option<Principal>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn get(&self, kind: PrincipalKind) -> Option<Credential> {
        (**self).get(kind)
    }
    fn set(&self, credential: &Credential, principal: Option<&Principal>) -> Result<(), StoreError> {
        (**self).set(credential, principal)
    }
    fn clear(&self, kind: PrincipalKind) -> Result<(), StoreError> {
        (**self).clear(kind)
    }
    fn cached_principal(&self, kind: PrincipalKind) -> Option<Principal> {
        (**self).cached_principal(kind)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Rc<T> {
    fn get(&self, kind: PrincipalKind) -> Option<Credential> {
        (**self).get(kind)
    }
    fn set(&self, credential: &Credential, principal: Option<&Principal>) -> Result<(), StoreError> {
        (**self).set(credential, principal)
    }
    fn clear(&self, kind: PrincipalKind) -> Result<(), StoreError> {
        (**self).clear(kind)
    }
    fn cached_principal(&self, kind: PrincipalKind) -> Option<Principal> {
        (**self).cached_principal(kind)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn get(&self, kind: PrincipalKind) -> Option<Credential> {
        (**self).get(kind)
    }
    fn set(&self, credential: &Credential, principal: Option<&Principal>) -> Result<(), StoreError> {
        (**self).set(credential, principal)
    }
    fn clear(&self, kind: PrincipalKind) -> Result<(), StoreError> {
        (**self).clear(kind)
    }
    fn cached_principal(&self, kind: PrincipalKind) -> Option<Principal> {
        (**self).cached_principal(kind)
    }
}

// =============================================================================
// KEYED STORE
// =============================================================================

/// [`CredentialStore`] over any [`KeyValueStore`], using the guard table's keys.
#[derive(Clone, Debug, Default)]
pub struct KeyedStore<B> {
    backend: B,
}

impl<B: KeyValueStore> KeyedStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: KeyValueStore> CredentialStore for KeyedStore<B> {
    fn get(&self, kind: PrincipalKind) -> Option<Credential> {
        let key = kind.spec().token_key;
        match self.backend.get_item(key) {
            Ok(raw) => raw.and_then(|token| Credential::new(kind, token)),
            Err(e) => {
                tracing::warn!(%kind, key, error = %e, "credential read failed; treating as absent");
                None
            }
        }
    }

    fn set(&self, credential: &Credential, principal: Option<&Principal>) -> Result<(), StoreError> {
        let spec = credential.kind.spec();
        self.backend.set_item(spec.token_key, &credential.token)?;
        match principal {
            Some(principal) => {
                let raw = serde_json::to_string(principal)?;
                self.backend.set_item(spec.principal_key, &raw)
            }
            // A principal cached for a previous token would describe someone else.
            None => self.backend.remove_item(spec.principal_key),
        }
    }

    fn clear(&self, kind: PrincipalKind) -> Result<(), StoreError> {
        let spec = kind.spec();
        let token = self.backend.remove_item(spec.token_key);
        let principal = self.backend.remove_item(spec.principal_key);
        token.and(principal)
    }

    fn cached_principal(&self, kind: PrincipalKind) -> Option<Principal> {
        let key = kind.spec().principal_key;
        let raw = self.backend.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(principal) => Some(principal),
            Err(e) => {
                tracing::warn!(%kind, key, error = %e, "cached principal is not valid JSON");
                None
            }
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory [`KeyValueStore`]. Used by tests and as the SSR stand-in.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `(key, value)` pairs.
    #[must_use]
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = items
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { items: RefCell::new(map) }
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<B: KeyValueStore + ?Sized> KeyValueStore for &B {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

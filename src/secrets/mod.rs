//! Credential store
//!
//! Holds the API keys used by the upstream clients. A `SecretStore` is a cheap
//! handle: clones share the same map, so a key replaced through the gateway is
//! seen by every client on its next call.

use crate::error::SecretError;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Shared name -> value map of credentials
#[derive(Clone, Default)]
pub struct SecretStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl SecretStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load credentials from a `.env` style file.
    ///
    /// A missing file yields an empty store; a malformed one is an error.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::new();

        if !path.exists() {
            warn!("Credential file {} not found, starting empty", path.display());
            return Ok(store);
        }

        // Deprecated upstream, but it is the only dotenv entry point that
        // parses without writing into the process environment.
        #[allow(deprecated)]
        let entries = dotenv::from_path_iter(path)
            .with_context(|| format!("Failed to open credential file {}", path.display()))?;

        for entry in entries {
            let (name, value) = entry
                .with_context(|| format!("Malformed credential file {}", path.display()))?;
            store.set(name, value);
        }

        info!(
            "Loaded {} credentials from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Copy the named variables from the process environment, overriding
    /// anything already stored under the same name.
    pub fn with_process_env<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if let Ok(value) = std::env::var(name) {
                debug!("Credential {} taken from process environment", name);
                self.set(name, value);
            }
        }
        self
    }

    /// Store or overwrite a credential
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let replaced = self.write().insert(name.clone(), value.into()).is_some();
        if replaced {
            info!("Credential {} has been replaced", name);
        } else {
            info!("Credential {} has been set up", name);
        }
    }

    /// Current value of a credential
    pub fn get(&self, name: &str) -> Result<String, SecretError> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Sorted credential names, never values
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("names", &self.names())
            .finish()
    }
}

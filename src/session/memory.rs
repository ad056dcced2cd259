//! In-memory session store

use std::collections::HashMap;
use std::sync::RwLock;

use super::{SessionError, SessionResult, SessionStore};

/// Session store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> SessionResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.entries
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?
            .clear();
        Ok(())
    }
}

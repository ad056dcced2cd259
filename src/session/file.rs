//! File-backed session store
//!
//! Keeps every key in one JSON object at `<dir>/session.json`. Writes go to
//! a temporary file first and are renamed into place, so a reader never sees
//! a half-written session.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{SessionError, SessionResult, SessionStore};

const SESSION_FILE: &str = "session.json";

/// Session store persisted to a directory
#[derive(Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Open (without creating) a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding the session file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(self.path()) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!("{}.tmp", SESSION_FILE));
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, self.path())?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> SessionResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;

        // Writes never depend on a readable previous session
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(path = ?self.path(), error = %e, "Discarding unreadable session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for (key, value) in entries {
            all.insert((*key).to_string(), value.clone());
        }
        self.write_all(&all)?;

        tracing::trace!(path = ?self.path(), keys = entries.len(), "Session written");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;

        match std::fs::remove_file(self.path()) {
            Ok(()) => {
                tracing::debug!(path = ?self.path(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::sample_result;
    use crate::session::AnalysisSession;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert!(store.get("documentName").unwrap().is_none());
        assert!(AnalysisSession::load(&store).unwrap().is_none());
    }

    #[test]
    fn test_separate_instances_share_state() {
        let dir = tempdir().unwrap();
        let writer = FileSessionStore::new(dir.path());
        AnalysisSession::new("lease.pdf", sample_result())
            .save(&writer)
            .unwrap();

        // A fresh store over the same directory stands in for the next page load
        let reader = FileSessionStore::new(dir.path());
        let loaded = AnalysisSession::load(&reader).unwrap().unwrap();
        assert_eq!(loaded.document_name, "lease.pdf");
        assert_eq!(loaded.result, sample_result());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.clear().unwrap();
        store.set_many(&[("k", "v".to_string())]).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        assert!(store.get("k").unwrap().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_save() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{truncated").unwrap();
        let store = FileSessionStore::new(dir.path());

        assert!(matches!(store.get("documentName"), Err(SessionError::Serialization(_))));

        AnalysisSession::new("lease.pdf", sample_result())
            .save(&store)
            .unwrap();

        let loaded = AnalysisSession::load(&store).unwrap().unwrap();
        assert_eq!(loaded.document_name, "lease.pdf");
        assert_eq!(loaded.result, sample_result());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.set_many(&[("k", "v".to_string())]).unwrap();

        assert!(dir.path().join(SESSION_FILE).exists());
        assert!(!dir.path().join("session.json.tmp").exists());
    }
}

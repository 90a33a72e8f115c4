use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Name of the application data directory under the platform data dir.
const APP_DIR: &str = "debate-chat";

/// File holding the raw credential string. Absence means "logged out".
const CREDENTIAL_FILE: &str = "api_key";

/// Persistent slot for the session credential.
///
/// Lifecycle: a new store starts in the loading state; [`SessionStore::init`]
/// reads the persisted value exactly once, after which `get` reflects the
/// last `set`/`clear`. Only this type writes the slot.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    value: Option<String>,
    loaded: bool,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, value: None, loaded: false }
    }

    /// Store backed by the platform data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().context("Could not determine the user data directory")?;
        Ok(Self::new(data_dir.join(APP_DIR).join(CREDENTIAL_FILE)))
    }

    /// Read the persisted credential. Idempotent: the slot is only read the
    /// first time.
    pub fn init(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        if self.path.exists() {
            let raw = fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read credential from {}", self.path.display()))?;
            let trimmed = raw.trim();
            self.value = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
        }
        self.loaded = true;
        Ok(())
    }

    /// True until the initial read has happened.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Last-read credential, or `None` while loading or logged out.
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Persist a credential and update the in-memory value.
    pub fn set(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, value)
            .with_context(|| format!("Failed to write credential to {}", self.path.display()))?;
        self.value = Some(value.to_string());
        self.loaded = true;
        Ok(())
    }

    /// Remove the persisted credential and reset the in-memory value.
    pub fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        self.value = None;
        self.loaded = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("api_key"))
    }

    #[test]
    fn test_new_store_is_loading_until_init() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(store.is_loading());
        assert_eq!(store.get(), None);

        store.init().unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_persists_and_init_reads_it_back() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.init().unwrap();
        store.set("sk-test-123").unwrap();
        assert_eq!(store.get(), Some("sk-test-123"));

        // Fresh store over the same path sees the persisted value
        let mut reopened = store_in(&dir);
        reopened.init().unwrap();
        assert_eq!(reopened.get(), Some("sk-test-123"));
    }

    #[test]
    fn test_set_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.init().unwrap();
        store.set("  sk-test-123\n").unwrap();
        assert_eq!(store.get(), Some("sk-test-123"));
    }

    #[test]
    fn test_clear_removes_file_and_value() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.init().unwrap();
        store.set("sk-test-123").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(), None);
        assert!(!dir.path().join("api_key").exists());

        let mut reopened = store_in(&dir);
        reopened.init().unwrap();
        assert_eq!(reopened.get(), None);
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.init().unwrap();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_init_treats_empty_file_as_logged_out() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("api_key"), "  \n").unwrap();

        let mut store = store_in(&dir);
        store.init().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = SessionStore::new(dir.path().join("nested").join("dir").join("api_key"));
        store.init().unwrap();
        store.set("sk-test-123").unwrap();
        assert_eq!(store.get(), Some("sk-test-123"));
    }
}

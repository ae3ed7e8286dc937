use aes_gcm::{aead::KeyInit, Aes256Gcm, Key};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::config::{load_config, Config};
use super::crypto::{load_or_generate_key, open, seal};
use super::utils::{ensure_dir, restrict_file};
use crate::api::StoreError;

/// String-keyed, string-valued persistent storage.
///
/// Implementations are synchronous; reads never fail; a missing or
/// unreadable backing store simply yields `None`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and embedders that manage persistence themselves.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Encrypted on-disk store.
///
/// The whole map is serialized to JSON, sealed with AES-256-GCM and written
/// base64-encoded to a single file. Entries are cached in memory and the
/// file is rewritten on every mutation. The cache only changes once the
/// write has succeeded.
pub struct FileStore {
    path: PathBuf,
    cipher: Aes256Gcm,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: PathBuf, cipher: Aes256Gcm) -> Self {
        let entries = match read_entries(&path, &cipher) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable store");
                BTreeMap::new()
            }
        };
        Self {
            path,
            cipher,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_vec(entries)?;
        let encoded = seal(&self.cipher, &json).map_err(StoreError::Crypto)?;
        fs::write(&self.path, encoded)?;
        restrict_file(&self.path);
        Ok(())
    }
}

fn read_entries(path: &Path, cipher: &Aes256Gcm) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let encoded = fs::read_to_string(path)?;
    let plaintext = open(cipher, &encoded).map_err(StoreError::Crypto)?;
    Ok(serde_json::from_slice(&plaintext)?)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

/// Runtime context holding paths, configuration and the store cipher.
pub struct AppCtx {
    pub base_dir: PathBuf,
    pub store_path: PathBuf,
    pub config: Config,
    pub cipher: Aes256Gcm,
}

impl AppCtx {
    /// Initializes the context under `~/.content-studio`.
    pub fn init() -> Result<Self, String> {
        let home =
            env::var("HOME").map_err(|_| "Unable to determine HOME directory".to_string())?;
        Self::at(PathBuf::from(home).join(".content-studio"))
    }

    /// Initializes the context rooted at an arbitrary directory.
    pub fn at(base_dir: PathBuf) -> Result<Self, String> {
        let key_dir = base_dir.join("keys");
        let key_path = key_dir.join("key.bin");
        let store_path = base_dir.join("credentials.store");
        let config_path = base_dir.join("config.toml");

        ensure_dir(&base_dir)?;
        ensure_dir(&key_dir)?;

        let key_bytes = load_or_generate_key(&key_path)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
        let config = load_config(&config_path)?;

        Ok(Self {
            base_dir,
            store_path,
            config,
            cipher,
        })
    }

    /// Opens the persistent credential store for this context.
    pub fn open_store(&self) -> FileStore {
        FileStore::open(self.store_path.clone(), self.cipher.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("perplexityApiKey"), None);
        store.set("perplexityApiKey", "abc").unwrap();
        assert_eq!(store.get("perplexityApiKey").as_deref(), Some("abc"));
        store.remove("perplexityApiKey").unwrap();
        assert_eq!(store.get("perplexityApiKey"), None);
    }

    #[test]
    fn file_store_persists_encrypted() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppCtx::at(dir.path().join("studio")).unwrap();

        let store = ctx.open_store();
        store.set("googleApiKey", "AIzaSyD-very-secret-value").unwrap();

        let raw = fs::read_to_string(&ctx.store_path).unwrap();
        assert!(!raw.contains("very-secret"));

        let reopened = ctx.open_store();
        assert_eq!(
            reopened.get("googleApiKey").as_deref(),
            Some("AIzaSyD-very-secret-value")
        );
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppCtx::at(dir.path().to_path_buf()).unwrap();
        let blocked = FileStore::open(dir.path().to_path_buf(), ctx.cipher.clone());

        assert!(blocked.set("googleApiKey", "AIzaSyD-very-secret-value").is_err());
        assert_eq!(blocked.get("googleApiKey"), None);

        let store = ctx.open_store();
        store.set("googleApiKey", "kept").unwrap();
        fs::remove_file(&ctx.store_path).unwrap();
        fs::create_dir(&ctx.store_path).unwrap();
        assert!(store.remove("googleApiKey").is_err());
        assert_eq!(store.get("googleApiKey").as_deref(), Some("kept"));
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppCtx::at(dir.path().to_path_buf()).unwrap();
        fs::write(&ctx.store_path, "not base64 at all!").unwrap();

        let store = ctx.open_store();
        assert_eq!(store.get("googleApiKey"), None);
        store.set("googleApiKey", "recovered").unwrap();
        assert_eq!(ctx.open_store().get("googleApiKey").as_deref(), Some("recovered"));
    }
}

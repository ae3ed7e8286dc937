//! Provider credentials on top of a [`KeyValueStore`].

use std::sync::Arc;
use tokio::sync::broadcast;

use super::error::StoreError;
use crate::core::catalog::Provider;
use crate::core::storage::KeyValueStore;
use crate::core::utils::mask_key;

/// Keys shorter than this cannot be submitted at all.
pub const MIN_SUBMIT_LEN: usize = 10;

/// Keys at least this long pass the offline format check.
pub const MIN_VALID_LEN: usize = 20;

pub fn can_submit(key: &str) -> bool {
    key.trim().chars().count() >= MIN_SUBMIT_LEN
}

pub fn looks_valid(key: &str) -> bool {
    key.trim().chars().count() >= MIN_VALID_LEN
}

/// An API key and the model to use it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
}

impl Credential {
    pub fn new(provider: Provider, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
        }
    }

    pub fn masked_key(&self) -> String {
        mask_key(&self.api_key)
    }
}

/// Emitted whenever a stored credential changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialEvent {
    Saved(Provider),
    Cleared(Provider),
}

/// Credential access plus a change feed for anything gated on a key.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<CredentialEvent>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { storage, events }
    }

    /// Receives every later `set`/`clear`.
    pub fn subscribe(&self) -> broadcast::Receiver<CredentialEvent> {
        self.events.subscribe()
    }

    /// Returns the stored credential, if any.
    ///
    /// A stored model that the provider no longer offers is replaced by the
    /// provider's default, and the replacement is written back.
    pub fn get(&self, provider: Provider) -> Option<Credential> {
        let api_key = self
            .storage
            .get(&provider.key_entry())
            .filter(|k| !k.trim().is_empty())?;

        let model = match self.storage.get(&provider.model_entry()) {
            Some(m) if provider.find_model(&m).is_some() => m,
            stored => {
                let fallback = provider.default_model().id;
                if let Some(stale) = stored {
                    tracing::info!(%provider, model = %stale, "stored model unavailable, using {}", fallback);
                }
                if let Err(e) = self.storage.set(&provider.model_entry(), fallback) {
                    tracing::warn!(%provider, error = %e, "could not persist default model");
                }
                fallback.to_string()
            }
        };

        Some(Credential {
            provider,
            api_key,
            model,
        })
    }

    pub fn has(&self, provider: Provider) -> bool {
        self.storage
            .get(&provider.key_entry())
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Stores key and model, overwriting any previous value.
    ///
    /// If the model cannot be written the previous key is put back, so a
    /// failed call leaves the stored credential as it was.
    pub fn set(&self, credential: &Credential) -> Result<(), StoreError> {
        let provider = credential.provider;
        let key_entry = provider.key_entry();
        let previous = self.storage.get(&key_entry);

        self.storage.set(&key_entry, &credential.api_key)?;
        if let Err(e) = self.storage.set(&provider.model_entry(), &credential.model) {
            let undo = match previous {
                Some(key) => self.storage.set(&key_entry, &key),
                None => self.storage.remove(&key_entry),
            };
            if let Err(undo) = undo {
                tracing::warn!(%provider, error = %undo, "could not restore previous key");
            }
            return Err(e);
        }
        tracing::info!(%provider, key = %credential.masked_key(), "credential saved");
        let _ = self.events.send(CredentialEvent::Saved(provider));
        Ok(())
    }

    /// Removes both the key and the model selection.
    pub fn clear(&self, provider: Provider) -> Result<(), StoreError> {
        self.storage.remove(&provider.model_entry())?;
        self.storage.remove(&provider.key_entry())?;
        tracing::info!(%provider, "credential cleared");
        let _ = self.events.send(CredentialEvent::Cleared(provider));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn store() -> (Arc<MemoryStore>, CredentialStore) {
        let backing = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(backing.clone());
        (backing, credentials)
    }

    #[test]
    fn submit_and_validity_thresholds() {
        assert!(!can_submit("123456789"));
        assert!(can_submit("1234567890"));
        assert!(!looks_valid("1234567890123456789"));
        assert!(looks_valid("12345678901234567890"));
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_, credentials) = store();
        assert!(!credentials.has(Provider::Perplexity));
        assert_eq!(credentials.get(Provider::Perplexity), None);

        let cred = Credential::new(Provider::Perplexity, " pplx-abcdefghijklmnop ", "mixtral-8x7b-instruct");
        credentials.set(&cred).unwrap();

        assert!(credentials.has(Provider::Perplexity));
        assert!(!credentials.has(Provider::Google));
        let stored = credentials.get(Provider::Perplexity).unwrap();
        assert_eq!(stored.api_key, "pplx-abcdefghijklmnop");
        assert_eq!(stored.model, "mixtral-8x7b-instruct");
    }

    #[test]
    fn clear_removes_key_and_model() {
        let (backing, credentials) = store();
        credentials
            .set(&Credential::new(Provider::Perplexity, "pplx-abcdefghijklmnop", "sonar"))
            .unwrap();
        credentials.clear(Provider::Perplexity).unwrap();

        assert!(!credentials.has(Provider::Perplexity));
        assert_eq!(backing.get("perplexityApiKey"), None);
        assert_eq!(backing.get("perplexityModel"), None);
    }

    #[test]
    fn unknown_model_falls_back_and_is_rewritten() {
        let (backing, credentials) = store();
        backing.set("perplexityApiKey", "pplx-abcdefghijklmnop").unwrap();
        backing.set("perplexityModel", "llama-3.1-sonar-small-128k-online").unwrap();

        let cred = credentials.get(Provider::Perplexity).unwrap();
        assert_eq!(cred.model, "sonar");
        assert_eq!(backing.get("perplexityModel").as_deref(), Some("sonar"));
    }

    #[test]
    fn blank_key_counts_as_absent() {
        let (backing, credentials) = store();
        backing.set("googleApiKey", "   ").unwrap();
        assert!(!credentials.has(Provider::Google));
        assert_eq!(credentials.get(Provider::Google), None);
    }

    /// Accepts keys but refuses to write model entries.
    struct NoModelWrites(MemoryStore);

    impl KeyValueStore for NoModelWrites {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key.ends_with("Model") {
                return Err(StoreError::Crypto("disk full".to_string()));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_model_write_restores_previous_key() {
        let backing = Arc::new(NoModelWrites(MemoryStore::new()));
        let credentials = CredentialStore::new(backing.clone());
        let mut rx = credentials.subscribe();

        let fresh = Credential::new(Provider::Google, "AIzaSyA-0123456789abcdef", "gemini-2.0-flash");
        assert!(credentials.set(&fresh).is_err());
        assert!(!credentials.has(Provider::Google));

        backing.0.set("googleApiKey", "AIzaSyA-previous-key-000").unwrap();
        let replacement = Credential::new(Provider::Google, "AIzaSyA-replacement-key-1", "gemini-1.5-pro");
        assert!(credentials.set(&replacement).is_err());
        assert_eq!(
            backing.get("googleApiKey").as_deref(),
            Some("AIzaSyA-previous-key-000")
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn changes_are_broadcast() {
        let (_, credentials) = store();
        let mut rx = credentials.subscribe();

        credentials
            .set(&Credential::new(Provider::Google, "AIzaSyA-0123456789abcdef", "gemini-2.0-flash"))
            .unwrap();
        credentials.clear(Provider::Google).unwrap();

        assert_eq!(rx.recv().await.unwrap(), CredentialEvent::Saved(Provider::Google));
        assert_eq!(rx.recv().await.unwrap(), CredentialEvent::Cleared(Provider::Google));
    }
}

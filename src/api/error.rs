//! Error types for the library API.

use thiserror::Error;

use crate::core::catalog::Provider;

/// Errors raised by the persistent key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An underlying file I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cryptographic operation (encryption/decryption) failed.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Failed to serialize or deserialize the stored map.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a generation or key-management action.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// No API key is configured for the provider.
    #[error("No API key found. Please add your {} API key first.", .0.label())]
    MissingCredential(Provider),

    /// The provider answered with a non-2xx status. Carries the provider's
    /// own error message verbatim when it sent one.
    #[error("{0}")]
    Upstream(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body was not a chat completion.
    #[error("Unexpected response from provider: {0}")]
    InvalidResponse(String),

    /// User input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The credential could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenerateError {
    /// Message shown to the user; transport-level detail is replaced by
    /// `fallback` and left to the logs.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GenerateError::Transport(_) | GenerateError::InvalidResponse(_) => {
                fallback.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Errors from the notification broadcaster.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotifyError {
    /// Auto-expiry needs a timer, so notifications can only be created
    /// inside a tokio runtime.
    #[error("Notifier must be created within a tokio runtime")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_verbatim() {
        let err = GenerateError::Upstream("Invalid API key".to_string());
        assert_eq!(err.to_string(), "Invalid API key");
        assert_eq!(err.user_message("Failed"), "Invalid API key");
    }

    #[test]
    fn missing_credential_names_provider() {
        let err = GenerateError::MissingCredential(Provider::Perplexity);
        assert_eq!(
            err.to_string(),
            "No API key found. Please add your Perplexity API key first."
        );
    }

    #[test]
    fn invalid_response_uses_fallback() {
        let err = GenerateError::InvalidResponse("no choices".to_string());
        assert_eq!(err.user_message("Failed to generate keywords"), "Failed to generate keywords");
    }
}

//! Library API: credentials, the chat client, form state, notifications and
//! the [`Studio`] that ties them together.

pub mod client;
pub mod credentials;
mod error;
pub mod form;
pub mod notify;
pub mod parse;
mod studio;

pub use client::{AskOptions, ChatClient};
pub use credentials::{Credential, CredentialEvent, CredentialStore};
pub use error::{GenerateError, NotifyError, StoreError};
pub use form::{FormController, FormData, FormField, SharedForm};
pub use notify::{Notification, NotificationEvent, NotificationKind, Notifier};
pub use parse::ParsedPrompts;
pub use studio::Studio;

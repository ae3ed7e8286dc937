pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;

pub use api::{
    ChatClient, Credential, CredentialStore, FormController, GenerateError, Notifier, StoreError,
    Studio,
};

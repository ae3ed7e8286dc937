use std::future::Future;
use std::sync::Arc;

use spinners::{Spinner, Spinners};

use crate::api::{
    ChatClient, CredentialStore, FormController, GenerateError, NotificationKind, Notifier,
    SharedForm, Studio,
};
use crate::cli::{AuthCmd, Cmd};
use crate::core::storage::AppCtx;

pub mod ask;
pub mod auth;
pub mod form;
pub mod interactive;
pub mod keywords;
pub mod list;
pub mod prompts;

/// Everything a command needs: paths, the studio and the session's form.
pub struct Session {
    pub ctx: AppCtx,
    pub studio: Studio,
    pub form: SharedForm,
}

impl Session {
    /// Wires the studio to the on-disk credential store.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn open(ctx: AppCtx) -> Result<Self, String> {
        let credentials = CredentialStore::new(Arc::new(ctx.open_store()));
        let client = ChatClient::new(ctx.config.clone()).map_err(|e| e.to_string())?;
        let notifier = Notifier::new().map_err(|e| e.to_string())?;
        Ok(Self {
            studio: Studio::new(credentials, client, notifier),
            form: FormController::new().shared(),
            ctx,
        })
    }
}

/// Dispatches the parsed command to the appropriate handler.
pub async fn dispatch(command: Cmd, session: &Session) -> Result<(), String> {
    match command {
        Cmd::Auth(AuthCmd::Set {
            provider,
            key,
            model,
            no_save,
        }) => auth::set(session, provider, key, model, !no_save).await,
        Cmd::Auth(AuthCmd::Show { reveal }) => auth::show(session, reveal),
        Cmd::Auth(AuthCmd::Clear { provider }) => auth::clear(session, provider),
        Cmd::Auth(AuthCmd::Models { provider }) => auth::models(session, provider),
        Cmd::Keywords {
            topic,
            count,
            provider,
        } => keywords::run(session, &topic, count, provider).await,
        Cmd::Prompts {
            topic,
            audience,
            provider,
            copy,
            out,
        } => prompts::run(session, &topic, audience.as_deref(), provider, copy, out).await,
        Cmd::Ask {
            prompt,
            template,
            topic,
            temperature,
            max_tokens,
            no_web_search,
            provider,
        } => {
            let args = ask::AskArgs {
                prompt,
                template,
                topic,
                temperature,
                max_tokens,
                web_search: !no_web_search,
            };
            ask::run(session, provider, args).await
        }
        Cmd::Templates => list::templates(),
        Cmd::Hooks => list::hooks(),
        Cmd::Sizes => list::sizes(),
        Cmd::Form { provider } => form::run(session, provider).await,
        Cmd::Interactive => Err("Already in interactive mode".to_string()),
    }
}

/// Runs `fut` behind a terminal spinner.
pub(crate) async fn with_spinner<T, F>(message: &str, fut: F) -> Result<T, GenerateError>
where
    F: Future<Output = Result<T, GenerateError>>,
{
    let mut sp = Spinner::new(Spinners::Dots9, message.to_string());
    let result = fut.await;
    match result {
        Ok(_) => sp.stop_with_message("✔ Response received.".into()),
        Err(_) => sp.stop_with_message("✖ Request failed.".into()),
    }
    result
}

/// The message the studio reported for a failed action.
///
/// Every studio failure raises an error notification first; its text is
/// what the user should see.
pub(crate) fn reported(studio: &Studio, err: GenerateError) -> String {
    studio
        .notifier()
        .visible()
        .into_iter()
        .rev()
        .find(|n| n.kind == NotificationKind::Error)
        .map(|n| n.message)
        .unwrap_or_else(|| err.to_string())
}

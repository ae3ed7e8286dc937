//! User-facing actions.
//!
//! Every action reports its outcome through the [`Notifier`] and also
//! returns it, so callers can branch on failure without re-reporting it.

use super::client::{AskOptions, ChatClient};
use super::credentials::{can_submit, Credential, CredentialStore, MIN_SUBMIT_LEN};
use super::error::GenerateError;
use super::form::{lock, FormField, SharedForm, Slot};
use super::notify::Notifier;
use super::parse::ParsedPrompts;
use crate::core::catalog::Provider;

/// Composition root for credentials, the chat client and notifications.
#[derive(Clone)]
pub struct Studio {
    credentials: CredentialStore,
    client: ChatClient,
    notifier: Notifier,
}

impl Studio {
    pub fn new(credentials: CredentialStore, client: ChatClient, notifier: Notifier) -> Self {
        Self {
            credentials,
            client,
            notifier,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn fail<T>(&self, err: GenerateError, fallback: &str) -> Result<T, GenerateError> {
        tracing::debug!(error = %err, "action failed");
        self.notifier.error(err.user_message(fallback));
        Err(err)
    }

    fn require(&self, provider: Provider, purpose: &str) -> Result<Credential, GenerateError> {
        match self.credentials.get(provider) {
            Some(credential) => Ok(credential),
            None => {
                self.notifier.error(format!(
                    "{} API key required for {}",
                    provider.label(),
                    purpose
                ));
                Err(GenerateError::MissingCredential(provider))
            }
        }
    }

    /// Validates `api_key` and, when `remember` is set, stores it.
    ///
    /// `model` defaults to the provider's first catalog entry and must be
    /// one the provider offers.
    pub async fn connect_key(
        &self,
        provider: Provider,
        api_key: &str,
        model: Option<&str>,
        remember: bool,
    ) -> Result<Credential, GenerateError> {
        if !can_submit(api_key) {
            return self.fail(
                GenerateError::Validation(format!(
                    "API key must be at least {} characters",
                    MIN_SUBMIT_LEN
                )),
                "Failed to validate API key.",
            );
        }

        let model = match model {
            Some(m) if provider.find_model(m).is_none() => {
                return self.fail(
                    GenerateError::Validation(format!(
                        "Unknown {} model '{}'",
                        provider.label(),
                        m
                    )),
                    "Failed to validate API key.",
                );
            }
            Some(m) => m,
            None => provider.default_model().id,
        };

        let credential = Credential::new(provider, api_key, model);
        if let Err(e) = self.client.validate(&credential).await {
            return self.fail(e, "Failed to validate API key.");
        }

        if remember {
            if let Err(e) = self.credentials.set(&credential) {
                return self.fail(e.into(), "Failed to save API key.");
            }
        }

        self.notifier.success(match provider {
            Provider::Google => "API key successfully connected!",
            Provider::Perplexity => "Perplexity API key successfully validated!",
        });
        Ok(credential)
    }

    /// Forgets the provider's key and model.
    pub fn remove_key(&self, provider: Provider) -> Result<(), GenerateError> {
        if let Err(e) = self.credentials.clear(provider) {
            return self.fail(e.into(), "Failed to remove API key.");
        }
        self.notifier.info(match provider {
            Provider::Google => "API key has been removed.",
            Provider::Perplexity => "Perplexity API key has been removed.",
        });
        Ok(())
    }

    /// Generates keywords for the form's topic and writes them, one per
    /// line, into `seo_keywords`.
    ///
    /// If the field was edited or another generation started meanwhile,
    /// the result is returned but not written.
    pub async fn generate_keywords(
        &self,
        form: &SharedForm,
        provider: Provider,
        count: usize,
    ) -> Result<Vec<String>, GenerateError> {
        let topic = lock(form).data().topic.trim().to_string();
        if topic.is_empty() {
            return self.fail(
                GenerateError::Validation(
                    "Please enter a topic before generating keywords".to_string(),
                ),
                "",
            );
        }
        let credential = self.require(provider, "keyword generation")?;

        let token = lock(form).begin(FormField::SeoKeywords);
        let keywords = match self.client.generate_list(&credential, &topic, count).await {
            Ok(keywords) => keywords,
            Err(e) => return self.fail(e, "Failed to generate keywords"),
        };

        if lock(form).apply(token, keywords.join("\n")) {
            self.notifier
                .success(format!("Generated {} keywords successfully", keywords.len()));
        }
        Ok(keywords)
    }

    /// Generates content prompts for the form's topic and audience.
    pub async fn generate_prompts(
        &self,
        form: &SharedForm,
        provider: Provider,
    ) -> Result<ParsedPrompts, GenerateError> {
        let (topic, audience) = {
            let form = lock(form);
            (
                form.data().topic.trim().to_string(),
                form.data().target_audience.clone(),
            )
        };
        if topic.is_empty() {
            return self.fail(
                GenerateError::Validation(
                    "Please enter a topic before generating prompts".to_string(),
                ),
                "",
            );
        }
        let credential = self.require(provider, "prompt generation")?;

        let token = lock(form).begin(Slot::Prompts);
        let parsed = match self
            .client
            .generate_prompts(&credential, &topic, &audience)
            .await
        {
            Ok(parsed) => parsed,
            Err(e) => return self.fail(e, "Failed to generate prompts"),
        };

        if lock(form).apply_prompts(token, parsed.prompts.clone()) {
            if parsed.degraded {
                self.notifier
                    .warning("Prompts were not numbered; showing the response split into paragraphs");
            }
            self.notifier.success("Generated content prompts successfully");
        }
        Ok(parsed)
    }

    /// Sends a free-form prompt.
    pub async fn ask(
        &self,
        provider: Provider,
        prompt: &str,
        options: &AskOptions,
    ) -> Result<String, GenerateError> {
        if prompt.trim().is_empty() {
            return self.fail(
                GenerateError::Validation("Please enter a prompt first".to_string()),
                "",
            );
        }
        let Some(credential) = self.credentials.get(provider) else {
            return self.fail(GenerateError::MissingCredential(provider), "");
        };
        match self.client.complete(&credential, prompt, options).await {
            Ok(text) => Ok(text),
            Err(e) => self.fail(e, "Failed to generate response"),
        }
    }
}

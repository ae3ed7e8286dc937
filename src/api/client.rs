//! Chat-completion client shared by both providers.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::credentials::{looks_valid, Credential};
use super::error::GenerateError;
use super::parse::{parse_list, parse_prompts, ParsedPrompts};
use crate::core::catalog::Provider;
use crate::core::config::Config;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebSearchOptions {
    pub search_context_size: String,
}

/// Body of a `POST /chat/completions` request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<WebSearchOptions>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.7,
            max_tokens: 1000,
            web_search_options: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: Option<String>,
}

/// Options for a free-form request.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask for a high search context. Only honored by the `sonar` model.
    pub web_search: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            web_search: true,
        }
    }
}

pub const DEFAULT_KEYWORD_COUNT: usize = 10;
pub const PROMPT_COUNT: usize = 5;
const DEFAULT_AUDIENCE: &str = "General audience";

/// Builds the keyword request: one keyword per line, no numbering.
pub fn keywords_request(model: &str, topic: &str, count: usize) -> ChatRequest {
    ChatRequest::new(
        model,
        vec![
            ChatMessage::system(
                "You are an SEO keyword expert. Generate only keywords, one per line, no numbering or additional text.",
            ),
            ChatMessage::user(format!(
                "Generate {} SEO-optimized keywords related to \"{}\". Return only the keywords, one per line, with no numbering or additional text.",
                count, topic
            )),
        ],
    )
    .temperature(0.4)
    .max_tokens(500)
}

/// Builds the content-prompt request: a numbered list of labelled prompts.
pub fn prompts_request(model: &str, topic: &str, audience: &str) -> ChatRequest {
    let audience = if audience.trim().is_empty() {
        DEFAULT_AUDIENCE
    } else {
        audience.trim()
    };
    ChatRequest::new(
        model,
        vec![
            ChatMessage::system(
                "You are an expert content writer who generates creative and effective prompts for generating full articles.",
            ),
            ChatMessage::user(format!(
                "Generate {} different prompts that I can use to create high-quality content about \"{}\".\n\
                 Target audience: {}\n\
                 Each prompt should be detailed, specific, and designed to generate a complete article.\n\
                 Format each prompt as a numbered list item, with a label description of what type of content it would generate.",
                PROMPT_COUNT, topic, audience
            )),
        ],
    )
    .temperature(0.8)
    .max_tokens(1000)
}

/// Builds a single-message request from user text.
pub fn ask_request(model: &str, prompt: &str, options: &AskOptions) -> ChatRequest {
    let mut request = ChatRequest::new(model, vec![ChatMessage::user(prompt)])
        .temperature(options.temperature)
        .max_tokens(options.max_tokens);
    if options.web_search && model == "sonar" {
        request.web_search_options = Some(WebSearchOptions {
            search_context_size: "high".to_string(),
        });
    }
    request
}

/// Minimal request used to check that a key is accepted.
pub fn probe_request(model: &str) -> ChatRequest {
    ChatRequest::new(
        model,
        vec![ChatMessage::user(
            "Test message to validate API key. Respond with 'API key is valid'.",
        )],
    )
    .temperature(0.2)
    .max_tokens(20)
}

/// HTTP client for the providers' chat-completion endpoints.
///
/// Every call is a single attempt: no retries, no rate limiting. A timeout
/// is applied only when one is configured.
#[derive(Clone)]
pub struct ChatClient {
    http: Client,
    config: Config,
}

impl ChatClient {
    pub fn new(config: Config) -> Result<Self, GenerateError> {
        let mut builder = Client::builder()
            .user_agent(format!("content-studio/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, provider: Provider) -> String {
        format!("{}/chat/completions", self.config.base_url(provider))
    }

    /// Sends one request and returns the first choice's content.
    ///
    /// A non-2xx status becomes [`GenerateError::Upstream`] with the
    /// provider's `error.message`, or `fallback` when the body has none.
    pub async fn chat(
        &self,
        credential: &Credential,
        request: &ChatRequest,
        fallback: &str,
    ) -> Result<String, GenerateError> {
        let endpoint = self.endpoint(credential.provider);
        tracing::debug!(
            provider = %credential.provider,
            model = %request.model,
            %endpoint,
            "sending chat completion"
        );

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&credential.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            tracing::warn!(provider = %credential.provider, %status, %message, "upstream rejected request");
            return Err(GenerateError::Upstream(message));
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::InvalidResponse("response has no choices".to_string()))
    }

    /// Asks for `count` keywords about `topic`.
    ///
    /// The model may return fewer (or more) items than requested.
    pub async fn generate_list(
        &self,
        credential: &Credential,
        topic: &str,
        count: usize,
    ) -> Result<Vec<String>, GenerateError> {
        let request = keywords_request(&credential.model, topic, count);
        let content = self
            .chat(credential, &request, "Failed to generate keywords")
            .await?;
        Ok(parse_list(content.trim()))
    }

    /// Asks for labelled content prompts about `topic`.
    pub async fn generate_prompts(
        &self,
        credential: &Credential,
        topic: &str,
        audience: &str,
    ) -> Result<ParsedPrompts, GenerateError> {
        let request = prompts_request(&credential.model, topic, audience);
        let content = self
            .chat(credential, &request, "Failed to generate prompts")
            .await?;
        Ok(parse_prompts(&content))
    }

    /// Sends `prompt` as-is and returns the raw completion.
    pub async fn complete(
        &self,
        credential: &Credential,
        prompt: &str,
        options: &AskOptions,
    ) -> Result<String, GenerateError> {
        let request = ask_request(&credential.model, prompt, options);
        self.chat(credential, &request, "Failed to generate response")
            .await
    }

    /// Checks a key before it is saved.
    ///
    /// Perplexity keys are probed with a tiny request. Google keys only get
    /// a format check.
    pub async fn validate(&self, credential: &Credential) -> Result<(), GenerateError> {
        match credential.provider {
            Provider::Google => {
                if looks_valid(&credential.api_key) {
                    Ok(())
                } else {
                    Err(GenerateError::Validation(
                        "Invalid API key format. Please check your key.".to_string(),
                    ))
                }
            }
            Provider::Perplexity => {
                let request = probe_request(&credential.model);
                self.chat(credential, &request, "API key validation failed")
                    .await
                    .map(|_| ())
            }
        }
    }
}

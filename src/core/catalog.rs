//! Static catalogs: providers and their models, hook styles, article sizes
//! and quick prompt templates.

use std::fmt;
use std::str::FromStr;

/// Upstream chat-completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    Perplexity,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Perplexity];

    /// Identifier used in storage keys and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Perplexity => "perplexity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Perplexity => "Perplexity",
        }
    }

    /// Storage key holding the API key, e.g. `perplexityApiKey`.
    pub fn key_entry(self) -> String {
        format!("{}ApiKey", self.id())
    }

    /// Storage key holding the selected model, e.g. `perplexityModel`.
    pub fn model_entry(self) -> String {
        format!("{}Model", self.id())
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
            Provider::Perplexity => "https://api.perplexity.ai",
        }
    }

    pub fn models(self) -> &'static [ModelInfo] {
        match self {
            Provider::Google => GOOGLE_MODELS,
            Provider::Perplexity => PERPLEXITY_MODELS,
        }
    }

    /// First catalog entry.
    pub fn default_model(self) -> &'static ModelInfo {
        &self.models()[0]
    }

    pub fn find_model(self, id: &str) -> Option<&'static ModelInfo> {
        self.models().iter().find(|m| m.id == id)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(Provider::Google),
            "perplexity" | "pplx" => Ok(Provider::Perplexity),
            other => Err(format!(
                "Unknown provider '{}'. Use 'google' or 'perplexity'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const PERPLEXITY_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "sonar",
        name: "Sonar",
        description: "Default model with web search capabilities",
    },
    ModelInfo {
        id: "mistral-7b-instruct",
        name: "Mistral 7B Instruct",
        description: "Balanced performance and speed",
    },
    ModelInfo {
        id: "mixtral-8x7b-instruct",
        name: "Mixtral 8x7B Instruct",
        description: "Advanced instruction-following model",
    },
    ModelInfo {
        id: "codellama-70b-instruct",
        name: "CodeLlama 70B Instruct",
        description: "Specialized for code generation",
    },
    ModelInfo {
        id: "llama-3-70b-instruct",
        name: "Llama 3 70B Instruct",
        description: "Meta's latest large language model",
    },
];

pub const GOOGLE_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gemini-2.0-flash",
        name: "Gemini 2.0 Flash",
        description: "Fast general-purpose model",
    },
    ModelInfo {
        id: "gemini-1.5-flash",
        name: "Gemini 1.5 Flash",
        description: "Previous generation, low latency",
    },
    ModelInfo {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        description: "Higher quality long-form generation",
    },
];

pub const TONES: &[&str] = &[
    "None",
    "Friendly",
    "Professional",
    "Informational",
    "Transactional",
    "Inspirational",
    "Neutral",
    "Witty",
    "Casual",
    "Authoritative",
    "Encouraging",
    "Persuasive",
    "Poetic",
];

/// Longest hook brief the generator form accepts.
pub const HOOK_BRIEF_MAX_LEN: usize = 300;

/// Opening-hook style for an article, with the brief it suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookType {
    pub kind: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

pub const HOOK_TYPES: &[HookType] = &[
    HookType {
        kind: "Question",
        label: "Question",
        placeholder: "Craft an intriguing question that immediately draws the reader's attention. The question should be relevant to the article's topic and evoke curiosity or challenge common beliefs.",
    },
    HookType {
        kind: "Statistical",
        label: "Statistical or Fact",
        placeholder: "Begin with a surprising statistic or an unexpected fact that relates directly to the article's main topic. This hook should provide a sense of scale or impact that makes the reader eager to learn more.",
    },
    HookType {
        kind: "Quotation",
        label: "Quotation",
        placeholder: "Share a relevant quote from an expert or influential figure that introduces your topic. The quote should be thought-provoking or inspiring.",
    },
    HookType {
        kind: "Anecdotal",
        label: "Anecdotal or Story",
        placeholder: "Create a brief, engaging story or anecdote that is relevant to the article's main subject. This story should be relatable and set the stage for the main content.",
    },
    HookType {
        kind: "Personal",
        label: "Personal or Emotional",
        placeholder: "Write an emotionally resonant opening that connects personally with the reader. This could be a reflection, a personal experience, or an emotional appeal that aligns with the article's theme.",
    },
];

pub fn find_hook(kind: &str) -> Option<&'static HookType> {
    HOOK_TYPES.iter().find(|h| h.kind == kind)
}

/// Target shape of an article for a given size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSize {
    pub key: &'static str,
    pub range: &'static str,
    pub h2: &'static str,
    pub intro: &'static str,
    pub body: &'static str,
    pub conclusion: &'static str,
}

pub const ARTICLE_SIZES: &[ArticleSize] = &[
    ArticleSize {
        key: "mini",
        range: "800-1200",
        h2: "3-4",
        intro: "100",
        body: "600-900",
        conclusion: "100-200",
    },
    ArticleSize {
        key: "small",
        range: "1200-2000",
        h2: "4-6",
        intro: "150-200",
        body: "900-1600",
        conclusion: "150-200",
    },
    ArticleSize {
        key: "medium",
        range: "2000-3000",
        h2: "6-8",
        intro: "200-300",
        body: "1600-2400",
        conclusion: "200-300",
    },
    ArticleSize {
        key: "large",
        range: "3000-4000",
        h2: "8-10",
        intro: "300-400",
        body: "2400-3200",
        conclusion: "300-400",
    },
    ArticleSize {
        key: "xlarge",
        range: "4000+",
        h2: "10+",
        intro: "400-500",
        body: "3200+",
        conclusion: "400-500",
    },
];

/// Looks up a size bucket, falling back to `medium`.
pub fn article_size(key: &str) -> &'static ArticleSize {
    ARTICLE_SIZES
        .iter()
        .find(|s| s.key == key)
        .unwrap_or(&ARTICLE_SIZES[2])
}

/// Quick prompt with a `{topic}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub template: &'static str,
}

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "SEO Keywords",
        template: "Generate 10 SEO-optimized keywords for a blog post about: {topic}",
    },
    PromptTemplate {
        name: "Blog Outline",
        template: "Create a detailed outline for a blog post about: {topic}",
    },
    PromptTemplate {
        name: "Product Description",
        template: "Write a compelling product description for: {topic}",
    },
    PromptTemplate {
        name: "Social Media Post",
        template: "Create an engaging social media post about: {topic}",
    },
];

/// Case-insensitive template lookup by name.
pub fn find_template(name: &str) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

impl PromptTemplate {
    /// Substitutes the first `{topic}` placeholder.
    pub fn render(&self, topic: &str) -> String {
        self.template.replacen("{topic}", topic, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_size_falls_back_to_medium() {
        assert_eq!(article_size("huge").key, "medium");
        assert_eq!(article_size("mini").h2, "3-4");
    }

    #[test]
    fn provider_storage_keys() {
        assert_eq!(Provider::Perplexity.key_entry(), "perplexityApiKey");
        assert_eq!(Provider::Google.model_entry(), "googleModel");
        assert_eq!("PPLX".parse::<Provider>().unwrap(), Provider::Perplexity);
        assert!("openai".parse::<Provider>().is_err());
    }

    #[test]
    fn default_models() {
        assert_eq!(Provider::Perplexity.default_model().id, "sonar");
        assert!(Provider::Perplexity.find_model("mixtral-8x7b-instruct").is_some());
        assert!(Provider::Google.find_model("sonar").is_none());
    }

    #[test]
    fn template_lookup_and_render() {
        let t = find_template("blog outline").unwrap();
        assert_eq!(
            t.render("home espresso"),
            "Create a detailed outline for a blog post about: home espresso"
        );
        assert!(find_template("Haiku").is_none());
    }

    #[test]
    fn hook_placeholders_fit_the_brief_limit() {
        for hook in HOOK_TYPES {
            assert!(hook.placeholder.chars().count() <= HOOK_BRIEF_MAX_LEN, "{}", hook.kind);
        }
    }

    #[test]
    fn hooks_are_addressable_by_kind() {
        assert_eq!(find_hook("Quotation").unwrap().label, "Quotation");
        assert!(find_hook("question").is_none());
    }
}

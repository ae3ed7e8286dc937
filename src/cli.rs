//! Defines the command-line interface structure using clap.

use clap::{Parser, Subcommand};

use crate::api::client::DEFAULT_KEYWORD_COUNT;
use crate::core::catalog::Provider;

#[derive(Parser)]
#[command(
    name = "content-studio",
    version,
    about = "SEO keywords, content prompts and AI answers from your LLM provider"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Manage provider API keys
    #[command(subcommand)]
    Auth(AuthCmd),
    /// Generate SEO keywords for a topic
    Keywords {
        topic: String,
        /// How many keywords to ask for
        #[arg(long, default_value_t = DEFAULT_KEYWORD_COUNT)]
        count: usize,
        #[arg(long, default_value = "perplexity")]
        provider: Provider,
    },
    /// Generate article prompts for a topic
    Prompts {
        topic: String,
        /// Who the content is for
        #[arg(long)]
        audience: Option<String>,
        #[arg(long, default_value = "perplexity")]
        provider: Provider,
        /// Copy all prompts to the clipboard
        #[arg(long)]
        copy: bool,
        /// Write the prompts to a file (defaults to content-prompts-<topic>.txt)
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        out: Option<String>,
    },
    /// Send a free-form prompt and print the answer
    Ask {
        /// Prompt text; optional when --template is given
        prompt: Option<String>,
        /// Start from a quick template, e.g. "Blog Outline"
        #[arg(long)]
        template: Option<String>,
        /// Value substituted into the template's {topic}
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,
        #[arg(long, default_value_t = 1000)]
        max_tokens: u32,
        /// Disable high-context web search on the sonar model
        #[arg(long)]
        no_web_search: bool,
        #[arg(long, default_value = "perplexity")]
        provider: Provider,
    },
    /// List quick prompt templates
    Templates,
    /// List article hook styles
    Hooks,
    /// List article size presets
    Sizes,
    /// Fill in the content generator form interactively
    Form {
        #[arg(long, default_value = "perplexity")]
        provider: Provider,
    },
    /// Start an interactive session (REPL)
    Interactive,
}

#[derive(Subcommand)]
pub enum AuthCmd {
    /// Validate and store an API key
    Set {
        provider: Provider,
        /// API key; prompted for when omitted
        #[arg(long, env = "CONTENT_STUDIO_API_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Model to use with this key
        #[arg(long)]
        model: Option<String>,
        /// Validate only, do not remember the key
        #[arg(long)]
        no_save: bool,
    },
    /// Show which providers have a key
    Show {
        /// Print keys unmasked
        #[arg(long)]
        reveal: bool,
    },
    /// Remove a stored key and its model selection
    Clear { provider: Provider },
    /// List the models a provider offers
    Models { provider: Option<Provider> },
}

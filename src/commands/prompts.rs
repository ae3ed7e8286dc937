use console::style;
use copypasta::{ClipboardContext, ClipboardProvider};
use std::fs;
use std::path::{Path, PathBuf};

use super::{reported, with_spinner, Session};
use crate::api::form::lock;
use crate::api::FormField;
use crate::core::catalog::Provider;
use crate::core::utils::slugify;

/// Generate article prompts for `topic`, then optionally copy or save them.
///
/// `out` is `Some("")` when `--out` was given without a path.
pub async fn run(
    session: &Session,
    topic: &str,
    audience: Option<&str>,
    provider: Provider,
    copy: bool,
    out: Option<String>,
) -> Result<(), String> {
    {
        let mut form = lock(&session.form);
        form.update(FormField::Topic, topic);
        form.update(FormField::TargetAudience, audience.unwrap_or_default());
    }

    let studio = &session.studio;
    let parsed = with_spinner(
        "Generating content prompts...",
        studio.generate_prompts(&session.form, provider),
    )
    .await
    .map_err(|e| reported(studio, e))?;

    print_prompts(&parsed.prompts);

    if copy {
        copy_to_clipboard(&join_prompts(&parsed.prompts))?;
        println!("{} prompts copied to clipboard", style("•").green().bold());
    }
    if let Some(out) = out {
        let path = if out.is_empty() {
            default_out_path(topic)
        } else {
            PathBuf::from(out)
        };
        write_prompts(&path, &parsed.prompts)?;
        println!("{} saved to {}", style("•").green().bold(), path.display());
    }
    Ok(())
}

pub(crate) fn print_prompts(prompts: &[String]) {
    println!("\n{}", style("Content prompts:").green().bold());
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", i + 1)).cyan(), prompt);
    }
}

/// Prompts separated by blank lines, as copied and saved.
pub(crate) fn join_prompts(prompts: &[String]) -> String {
    prompts.join("\n\n")
}

pub(crate) fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clip = ClipboardContext::new().map_err(|e| format!("Clipboard error: {}", e))?;
    clip.set_contents(text.to_string())
        .map_err(|e| format!("Clipboard set error: {}", e))
}

fn default_out_path(topic: &str) -> PathBuf {
    PathBuf::from(format!("content-prompts-{}.txt", slugify(topic)))
}

fn write_prompts(path: &Path, prompts: &[String]) -> Result<(), String> {
    if prompts.is_empty() {
        return Err("No prompts to save".to_string());
    }
    fs::write(path, join_prompts(prompts)).map_err(|e| format!("Write error: {}", e))
}

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::prompts::print_prompts;
use super::{reported, with_spinner, Session};
use crate::api::client::DEFAULT_KEYWORD_COUNT;
use crate::api::form::lock;
use crate::api::FormField;
use crate::core::catalog::{Provider, ARTICLE_SIZES, HOOK_BRIEF_MAX_LEN, HOOK_TYPES, TONES};
use crate::ui::render::render_brief;

/// Walk through the generator form, offering keyword and prompt generation
/// along the way, then print the resulting brief.
pub async fn run(session: &Session, provider: Provider) -> Result<(), String> {
    let theme = ColorfulTheme::default();
    let form = &session.form;
    let current = lock(form).data().clone();

    let topic = text(&theme, "Topic", &current.topic, false)?;
    let audience = text(&theme, "Target audience (optional)", &current.target_audience, true)?;
    let country = text(&theme, "Country", &current.country, false)?;
    let language = text(&theme, "Language", &current.language, false)?;

    let sizes: Vec<String> = ARTICLE_SIZES
        .iter()
        .map(|s| format!("{} ({} words)", s.key, s.range))
        .collect();
    let size = Select::with_theme(&theme)
        .with_prompt("Article size")
        .items(&sizes)
        .default(
            ARTICLE_SIZES
                .iter()
                .position(|s| s.key == current.word_count)
                .unwrap_or(2),
        )
        .interact()
        .map_err(|e| format!("Input error: {}", e))?;

    let tone = Select::with_theme(&theme)
        .with_prompt("Tone")
        .items(TONES)
        .default(TONES.iter().position(|t| *t == current.tone).unwrap_or(0))
        .interact()
        .map_err(|e| format!("Input error: {}", e))?;

    {
        let mut f = lock(form);
        f.update(FormField::Topic, topic);
        f.update(FormField::TargetAudience, audience);
        f.update(FormField::Country, country);
        f.update(FormField::Language, language);
        f.update(FormField::WordCount, ARTICLE_SIZES[size].key);
        f.update(FormField::Tone, TONES[tone]);
    }

    let hooks: Vec<&str> = HOOK_TYPES.iter().map(|h| h.label).collect();
    let hook = Select::with_theme(&theme)
        .with_prompt("Opening hook")
        .items(&hooks)
        .default(
            HOOK_TYPES
                .iter()
                .position(|h| h.kind == current.hook_type)
                .unwrap_or(0),
        )
        .interact()
        .map_err(|e| format!("Input error: {}", e))?;
    lock(form).select_hook_type(HOOK_TYPES[hook].kind);
    let placeholder = lock(form).data().hook_brief.clone();
    let brief = hook_brief(&theme, &placeholder)?;
    lock(form).update(FormField::HookBrief, brief);

    let studio = &session.studio;
    let can_generate = studio.credentials().has(provider);
    if !can_generate {
        println!(
            "{} {}",
            style("•").yellow().bold(),
            style(format!(
                "No {} API key stored; generation is unavailable. Run `auth set {}` to add one.",
                provider.label(),
                provider
            ))
            .dim()
        );
    }

    if can_generate && confirm(&theme, "Generate SEO keywords?")? {
        match with_spinner(
            "Generating keywords...",
            studio.generate_keywords(form, provider, DEFAULT_KEYWORD_COUNT),
        )
        .await
        {
            Ok(keywords) => println!("  {} {} keywords added", style("•").green(), keywords.len()),
            Err(e) => eprintln!("{} {}", style("•").red().bold(), reported(studio, e)),
        }
    }
    let keywords = lock(form).data().seo_keywords.clone();
    let keywords = list(&theme, "SEO keywords (comma-separated)", &keywords)?;
    lock(form).update(FormField::SeoKeywords, keywords);

    for (field, prompt) in [
        (FormField::Links, "External links (comma-separated, optional)"),
        (FormField::InternalLinks, "Internal links (comma-separated, optional)"),
        (FormField::Faqs, "FAQs (comma-separated, optional)"),
        (FormField::ImageDetails, "Image details (comma-separated, optional)"),
    ] {
        let existing = lock(form).data().get(field).to_string();
        let value = list(&theme, prompt, &existing)?;
        lock(form).update(field, value);
    }

    if can_generate && confirm(&theme, "Generate content prompts?")? {
        match with_spinner(
            "Generating content prompts...",
            studio.generate_prompts(form, provider),
        )
        .await
        {
            Ok(parsed) => print_prompts(&parsed.prompts),
            Err(e) => eprintln!("{} {}", style("•").red().bold(), reported(studio, e)),
        }
    }

    let brief = lock(form).submit(|data| render_brief(&data));
    println!("\n{}", brief);
    Ok(())
}

fn text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
    allow_empty: bool,
) -> Result<String, String> {
    loop {
        let value: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;
        let value = value.trim().to_string();
        if allow_empty || !value.is_empty() {
            return Ok(value);
        }
        println!("{} {} cannot be empty", style("•").red(), prompt);
    }
}

fn hook_brief(theme: &ColorfulTheme, initial: &str) -> Result<String, String> {
    loop {
        let brief = text(theme, "Hook brief", initial, false)?;
        match check_hook_brief(&brief) {
            Ok(()) => return Ok(brief),
            Err(e) => println!("{} {}", style("•").red(), e),
        }
    }
}

fn check_hook_brief(brief: &str) -> Result<(), String> {
    let len = brief.trim().chars().count();
    if len == 0 {
        return Err("Hook brief cannot be empty".to_string());
    }
    if len > HOOK_BRIEF_MAX_LEN {
        return Err(format!(
            "Hook brief is {} characters; the limit is {}",
            len, HOOK_BRIEF_MAX_LEN
        ));
    }
    Ok(())
}

/// Comma-separated entry stored one item per line.
fn list(theme: &ColorfulTheme, prompt: &str, existing: &str) -> Result<String, String> {
    let initial = existing
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let line = text(theme, prompt, &initial, true)?;
    Ok(split_list(&line))
}

fn split_list(line: &str) -> String {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn confirm(theme: &ColorfulTheme, prompt: &str) -> Result<bool, String> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| format!("Input error: {}", e))
}

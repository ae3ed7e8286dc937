use console::style;
use dialoguer::Password;

use super::{reported, with_spinner, Session};
use crate::core::catalog::Provider;
use crate::core::utils::mask_key;

/// Validate a key against the provider and optionally remember it.
pub async fn set(
    session: &Session,
    provider: Provider,
    key: Option<String>,
    model: Option<String>,
    remember: bool,
) -> Result<(), String> {
    let key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt(format!("{} API key", provider.label()))
            .interact()
            .map_err(|e| format!("Input error: {}", e))?,
    };
    let model = model.unwrap_or_else(|| session.ctx.config.preferred_model(provider));

    let studio = &session.studio;
    let credential = with_spinner(
        "Validating API key...",
        studio.connect_key(provider, &key, Some(model.as_str()), remember),
    )
    .await
    .map_err(|e| reported(studio, e))?;

    println!(
        "{} {} {} using {}",
        style("•").green().bold(),
        style(provider.label()).bold(),
        credential.masked_key(),
        style(&credential.model).yellow()
    );
    if !remember {
        println!("  {}", style("Key validated but not saved.").dim());
    }
    Ok(())
}

/// Show which providers have a stored key.
pub fn show(session: &Session, reveal: bool) -> Result<(), String> {
    println!("{}", style("API keys:").green().bold());
    for provider in Provider::ALL {
        match session.studio.credentials().get(provider) {
            Some(credential) => {
                let key = if reveal {
                    credential.api_key.clone()
                } else {
                    mask_key(&credential.api_key)
                };
                println!(
                    "  {} {:<11} {} ({})",
                    style("•").green(),
                    provider.label(),
                    key,
                    style(&credential.model).yellow()
                );
            }
            None => println!(
                "  {} {:<11} {}",
                style("•").dim(),
                provider.label(),
                style("not set").dim()
            ),
        }
    }
    println!(
        "  {}",
        style(format!("Stored encrypted in {}", session.ctx.base_dir.display())).dim()
    );
    Ok(())
}

/// Forget a provider's key and model.
pub fn clear(session: &Session, provider: Provider) -> Result<(), String> {
    let studio = &session.studio;
    if !studio.credentials().has(provider) {
        return Err(format!("No {} API key is stored", provider.label()));
    }
    studio.remove_key(provider).map_err(|e| reported(studio, e))
}

/// List the models each provider offers, marking the default and the
/// one in use.
pub fn models(session: &Session, provider: Option<Provider>) -> Result<(), String> {
    let providers = match provider {
        Some(p) => vec![p],
        None => Provider::ALL.to_vec(),
    };
    for provider in providers {
        let current = session
            .studio
            .credentials()
            .get(provider)
            .map(|c| c.model);
        println!("{}", style(format!("{} models:", provider.label())).green().bold());
        for (i, model) in provider.models().iter().enumerate() {
            let mut tags = Vec::new();
            if i == 0 {
                tags.push("default");
            }
            if current.as_deref() == Some(model.id) {
                tags.push("in use");
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            println!(
                "  {} {} ({}) - {}{}",
                style("•").green(),
                style(model.id).yellow(),
                model.name,
                model.description,
                style(tags).cyan()
            );
        }
    }
    Ok(())
}

use console::style;

use super::{reported, with_spinner, Session};
use crate::api::form::lock;
use crate::api::FormField;
use crate::core::catalog::Provider;

/// Generate SEO keywords for `topic` and print them.
pub async fn run(
    session: &Session,
    topic: &str,
    count: usize,
    provider: Provider,
) -> Result<(), String> {
    if count == 0 {
        return Err("Keyword count must be at least 1".to_string());
    }
    lock(&session.form).update(FormField::Topic, topic);

    let studio = &session.studio;
    let keywords = with_spinner(
        "Generating keywords...",
        studio.generate_keywords(&session.form, provider, count),
    )
    .await
    .map_err(|e| reported(studio, e))?;

    println!("\n{}", style(format!("Keywords for \"{}\":", topic.trim())).green().bold());
    for keyword in &keywords {
        println!("  {} {}", style("•").green(), keyword);
    }
    Ok(())
}

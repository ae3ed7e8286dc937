use super::{reported, with_spinner, Session};
use crate::api::AskOptions;
use crate::core::catalog::{find_template, Provider};
use crate::ui::render::render_response;

pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.9;
pub const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 100..=4000;

pub struct AskArgs {
    pub prompt: Option<String>,
    pub template: Option<String>,
    pub topic: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub web_search: bool,
}

/// Send a free-form prompt and print the rendered answer.
pub async fn run(session: &Session, provider: Provider, args: AskArgs) -> Result<(), String> {
    let options = options(&args)?;
    let prompt = compose(&args)?;

    let studio = &session.studio;
    let answer = with_spinner("Waiting for response...", studio.ask(provider, &prompt, &options))
        .await
        .map_err(|e| reported(studio, e))?;

    println!("\n{}", render_response(&answer));
    Ok(())
}

fn options(args: &AskArgs) -> Result<AskOptions, String> {
    if !TEMPERATURE_RANGE.contains(&args.temperature) {
        return Err(format!(
            "Temperature must be between {} and {}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        ));
    }
    if !MAX_TOKENS_RANGE.contains(&args.max_tokens) {
        return Err(format!(
            "Max tokens must be between {} and {}",
            MAX_TOKENS_RANGE.start(),
            MAX_TOKENS_RANGE.end()
        ));
    }
    Ok(AskOptions {
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        web_search: args.web_search,
    })
}

/// Renders the template, if any, and appends the free-form prompt after a
/// blank line.
fn compose(args: &AskArgs) -> Result<String, String> {
    let extra = args.prompt.as_deref().unwrap_or_default().trim();
    let Some(name) = args.template.as_deref() else {
        return Ok(extra.to_string());
    };
    let template =
        find_template(name).ok_or_else(|| format!("Unknown template '{}'", name))?;
    let topic = args
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| format!("Template '{}' needs --topic", template.name))?;

    let rendered = template.render(topic);
    if extra.is_empty() {
        Ok(rendered)
    } else {
        Ok(format!("{}\n\n{}", rendered, extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AskArgs {
        AskArgs {
            prompt: None,
            template: None,
            topic: None,
            temperature: 0.7,
            max_tokens: 1000,
            web_search: true,
        }
    }

    #[test]
    fn template_and_prompt_are_combined() {
        let a = AskArgs {
            template: Some("social media post".to_string()),
            topic: Some("latte art".to_string()),
            prompt: Some("Keep it under 200 characters.".to_string()),
            ..args()
        };
        assert_eq!(
            compose(&a).unwrap(),
            "Create an engaging social media post about: latte art\n\nKeep it under 200 characters."
        );
    }

    #[test]
    fn template_requires_topic() {
        let a = AskArgs {
            template: Some("Blog Outline".to_string()),
            ..args()
        };
        assert_eq!(compose(&a).unwrap_err(), "Template 'Blog Outline' needs --topic");

        let a = AskArgs {
            template: Some("Limerick".to_string()),
            ..args()
        };
        assert_eq!(compose(&a).unwrap_err(), "Unknown template 'Limerick'");
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        assert!(options(&AskArgs { temperature: 2.0, ..args() }).is_err());
        assert!(options(&AskArgs { max_tokens: 50, ..args() }).is_err());
        let ok = options(&AskArgs { web_search: false, ..args() }).unwrap();
        assert!(!ok.web_search);
        assert_eq!(ok.max_tokens, 1000);
    }
}

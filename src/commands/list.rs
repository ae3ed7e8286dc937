use console::style;

use crate::core::catalog::{ARTICLE_SIZES, HOOK_TYPES, PROMPT_TEMPLATES};

/// List the quick prompt templates.
pub fn templates() -> Result<(), String> {
    println!("{}", style("Prompt templates:").green().bold());
    for t in PROMPT_TEMPLATES {
        println!(
            "  {} {} - {}",
            style("•").green(),
            style(t.name).yellow(),
            t.template
        );
    }
    Ok(())
}

pub fn hooks() -> Result<(), String> {
    println!("{}", style("Hook types:").green().bold());
    for h in HOOK_TYPES {
        println!("  {} {} ({})", style("•").green(), style(h.kind).yellow(), h.label);
        println!("    {}", style(h.placeholder).dim());
    }
    Ok(())
}

pub fn sizes() -> Result<(), String> {
    println!("{}", style("Article sizes:").green().bold());
    for s in ARTICLE_SIZES {
        println!(
            "  {} {:<7} {:>9} words, {} H2 sections",
            style("•").green(),
            style(s.key).yellow(),
            s.range,
            s.h2
        );
        println!(
            "    {}",
            style(format!(
                "intro {}, body {}, conclusion {}",
                s.intro, s.body, s.conclusion
            ))
            .dim()
        );
    }
    Ok(())
}

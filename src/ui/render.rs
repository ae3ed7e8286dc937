//! Terminal rendering of completions and form briefs.

use console::style;
use std::fmt::Write as _;

use crate::api::FormData;
use crate::core::catalog::article_size;

/// Styles a completion line by line: `#`..`###` headings, `-`/`*` bullets
/// and `N.` items. Blank lines are kept as spacing.
pub fn render_response(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let rendered = if let Some(h) = line.strip_prefix("# ") {
            format!("\n{}", style(h).bold().underlined())
        } else if let Some(h) = line.strip_prefix("## ") {
            format!("\n{}", style(h).bold())
        } else if let Some(h) = line.strip_prefix("### ") {
            style(h).bold().dim().to_string()
        } else if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            format!("  {} {}", style("•").cyan(), item)
        } else if let Some((num, item)) = numbered(line) {
            format!("  {} {}", style(format!("{}.", num)).cyan(), item)
        } else {
            line.to_string()
        };
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}

fn numbered(line: &str) -> Option<(&str, &str)> {
    let (num, rest) = line.split_once(". ")?;
    if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) {
        Some((num, rest))
    } else {
        None
    }
}

/// Summarizes a submitted form as a writing brief.
pub fn render_brief(data: &FormData) -> String {
    let size = article_size(&data.word_count);
    let mut out = String::new();

    let _ = writeln!(out, "{}", style("Content Brief").green().bold());
    let _ = writeln!(out, "  Topic:     {}", data.topic);
    if !data.target_audience.is_empty() {
        let _ = writeln!(out, "  Audience:  {}", data.target_audience);
    }
    let _ = writeln!(out, "  Tone:      {}", data.tone);
    let _ = writeln!(out, "  Market:    {} / {}", data.country, data.language);
    let _ = writeln!(
        out,
        "  Length:    {} words, {} H2 sections (intro {}, body {}, conclusion {})",
        size.range, size.h2, size.intro, size.body, size.conclusion
    );
    let _ = writeln!(out, "  Hook:      {}", data.hook_type);
    if !data.hook_brief.is_empty() {
        let _ = writeln!(out, "             {}", style(&data.hook_brief).dim());
    }

    for (title, body) in [
        ("SEO keywords", &data.seo_keywords),
        ("External links", &data.links),
        ("Internal links", &data.internal_links),
        ("FAQs", &data.faqs),
        ("Images", &data.image_details),
    ] {
        let items: Vec<&str> = body
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}:", title);
        for item in items {
            let _ = writeln!(out, "    {} {}", style("•").green(), item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_lines_are_styled() {
        let out = console::strip_ansi_codes(&render_response(
            "# Title\n## Part\n- one\n* two\n3. three\n2024 was busy\nplain",
        ))
        .to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec!["", "Title", "", "Part", "  • one", "  • two", "  3. three", "2024 was busy", "plain"]
        );
    }

    #[test]
    fn brief_lists_keywords_and_size() {
        let data = FormData {
            topic: "cold brew".to_string(),
            word_count: "mini".to_string(),
            seo_keywords: "cold brew ratio\n\ncold brew concentrate".to_string(),
            ..FormData::default()
        };
        let out = console::strip_ansi_codes(&render_brief(&data)).to_string();
        assert!(out.contains("Topic:     cold brew"));
        assert!(out.contains("800-1200 words, 3-4 H2 sections"));
        assert!(out.contains("• cold brew ratio"));
        assert!(out.contains("• cold brew concentrate"));
        assert!(!out.contains("FAQs"));
    }
}

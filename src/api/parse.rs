//! Turns free-form completion text into lists.

use regex::Regex;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.)]|[*•-])\s*").expect("list marker regex"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("numbered item regex"));

static LABEL_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+?):\**\s+(.+)$").expect("label regex"));

/// Splits one-item-per-line output.
///
/// Lines are trimmed, a leading `N.`, `N)`, `*`, `•` or `-` marker is
/// stripped whether or not a space follows it, and
/// lines left empty are dropped. Order is preserved.
pub fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Prompts extracted from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPrompts {
    pub prompts: Vec<String>,
    /// No `N. Label: body` item was found and the text was split on blank
    /// lines instead.
    pub degraded: bool,
}

/// Extracts `N. Label: body` items as `"Label: body"`.
///
/// Each item runs until the next line that starts with a number and a dot.
/// Items without a `label:` separator are skipped. When nothing matches,
/// the text is split into paragraphs and the result is flagged `degraded`.
pub fn parse_prompts(text: &str) -> ParsedPrompts {
    let text = text.trim();
    let starts: Vec<(usize, usize)> = NUMBERED_ITEM
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut prompts = Vec::new();
    for (i, &(_, body_start)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map(|&(s, _)| s).unwrap_or(text.len());
        let segment = text[body_start..end].trim();
        if let Some(caps) = LABEL_BODY.captures(segment) {
            let label = caps[1].trim().trim_matches('*').trim();
            let body = caps[2].trim();
            if !label.is_empty() && !body.is_empty() {
                prompts.push(format!("{}: {}", label, body));
            }
        }
    }

    if !prompts.is_empty() {
        return ParsedPrompts {
            prompts,
            degraded: false,
        };
    }

    if !text.is_empty() {
        tracing::warn!("completion had no numbered prompts, falling back to paragraphs");
    }
    ParsedPrompts {
        prompts: paragraphs(text),
        degraded: !text.is_empty(),
    }
}

fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

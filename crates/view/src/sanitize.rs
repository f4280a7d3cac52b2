use regex::{Captures, Regex};
use std::sync::LazyLock;

const REASONING_OPEN_TAG: &str = "<think>";
const REASONING_CLOSE_TAG: &str = "</think>";

static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Remove the first `<think>...</think>` span from completion text.
///
/// A close tag with no open tag means the reasoning started before this
/// visible window; everything through the close tag is dropped. An open tag
/// with no close tag is left untouched. That last rule is intentionally not
/// aligned with [`get_reasoning_text`]'s streaming behavior; see DESIGN.md
/// before changing either.
pub fn remove_reasoning(text: &str) -> String {
    let open = text.find(REASONING_OPEN_TAG);
    let close = text.find(REASONING_CLOSE_TAG);
    match (open, close) {
        (Some(start), Some(end)) if start < end => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..start]);
            out.push_str(&text[end + REASONING_CLOSE_TAG.len()..]);
            out
        }
        // Close tag precedes any open tag: spillover from an earlier window.
        (_, Some(end)) => text[end + REASONING_CLOSE_TAG.len()..].to_string(),
        _ => text.to_string(),
    }
}

/// Extract the content of the first `<think>` span, with nested tags
/// tracked by depth and the tag tokens themselves omitted. Returns the
/// trailing partial content when the span is still streaming, and `None`
/// when no span has started.
pub fn get_reasoning_text(text: &str) -> Option<String> {
    let start = text.find(REASONING_OPEN_TAG)? + REASONING_OPEN_TAG.len();
    let mut rest = &text[start..];
    let mut depth = 1usize;
    let mut content = String::new();

    loop {
        let next_open = rest.find(REASONING_OPEN_TAG);
        let next_close = rest.find(REASONING_CLOSE_TAG);
        match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => {
                content.push_str(&rest[..open]);
                depth += 1;
                rest = &rest[open + REASONING_OPEN_TAG.len()..];
            }
            (_, Some(close)) => {
                content.push_str(&rest[..close]);
                depth -= 1;
                rest = &rest[close + REASONING_CLOSE_TAG.len()..];
                if depth == 0 {
                    break;
                }
            }
            (Some(open), None) => {
                content.push_str(&rest[..open]);
                depth += 1;
                rest = &rest[open + REASONING_OPEN_TAG.len()..];
            }
            // Still streaming: the span never closed.
            (None, None) => {
                content.push_str(rest);
                break;
            }
        }
    }

    Some(content.trim().to_string())
}

/// Delete `[n]` citation markers whose 1-based `n` does not index into
/// `links`. Kept markers and all surrounding text pass through verbatim.
pub fn remove_citations_with_missing_links(text: &str, links: &[String]) -> String {
    CITATION_RE
        .replace_all(text, |caps: &Captures| {
            let backed = caps[1]
                .parse::<usize>()
                .is_ok_and(|number| number >= 1 && number <= links.len());
            if backed {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

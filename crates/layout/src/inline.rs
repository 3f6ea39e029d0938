//! Inline `[title](url)` extraction.
//!
//! A line is covered exactly once by an ordered sequence of spans: plain text
//! and links. The grammar is deliberately small. The first `]` after a `[`
//! closes the title, and it must be followed immediately by `(`...`)` holding
//! the URL. Anything that does not match stays visible as plain text, so
//! extraction never fails.

/// A resolved inline link. The URL is never drawn; it only backs the
/// clickable region registered over the rendered display text.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineLink {
    pub display_text: String,
    pub target_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Link(InlineLink),
}

/// Scans `line` left to right into plain-text and link spans.
pub fn extract(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        match parse_link_at(&rest[open..]) {
            Some((link, consumed)) => {
                plain.push_str(&rest[..open]);
                if !plain.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut plain)));
                }
                spans.push(Span::Link(link));
                rest = &rest[open + consumed..];
            }
            None => {
                // Literal '[' with no matching link form; keep scanning after it.
                plain.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// Tries to parse `[title](url)` at the start of `s` (which begins with '[').
/// Returns the link and the number of bytes consumed.
fn parse_link_at(s: &str) -> Option<(InlineLink, usize)> {
    let after_open = &s[1..];
    let close = after_open.find(']')?;
    let title = &after_open[..close];

    let tail = after_open[close + 1..].strip_prefix('(')?;
    let end = tail.find(')')?;
    let url = &tail[..end];

    let consumed = 1 + close + 1 + 1 + end + 1;
    Some((
        InlineLink {
            display_text: title.to_string(),
            target_url: url.to_string(),
        },
        consumed,
    ))
}

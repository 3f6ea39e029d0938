//! Line-level block classification.
//!
//! Each input line maps independently to one [`Block`]; ambiguity is
//! resolved by a fixed priority order. A bulleted line with a bold title is
//! therefore a [`Block::Headline`], not a bullet: emphasis promotes the
//! whole line to a heading.

use crate::inline::{InlineLink, Span, extract};

/// The emphasis marker the briefing dialect recognizes.
pub const EMPHASIS_MARKER: &str = "**";

/// One classified logical unit of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Empty line or a `---` rule: a vertical spacer.
    Blank,
    /// Bold-wrapped line carrying the sources marker; opens the sources
    /// section. `label` has the emphasis markers stripped.
    SectionHeader { label: String },
    /// Line with at least one emphasis pair, kept raw; the markers are
    /// stripped at draw time and the whole line renders as a boxed heading.
    Headline { text: String },
    /// Bulleted line whose body holds exactly one link. Never word-wrapped.
    BulletLink {
        prefix_text: String,
        link: InlineLink,
        trailing_text: String,
    },
    /// Bulleted line without a link; wrapped normally.
    BulletPlain { text: String },
    /// Free text; wrapped normally.
    Paragraph { text: String },
}

/// Removes every emphasis marker for display.
pub fn strip_emphasis(text: &str) -> String {
    text.replace(EMPHASIS_MARKER, "")
}

fn is_rule(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

fn has_emphasis_pair(trimmed: &str) -> bool {
    trimmed.matches(EMPHASIS_MARKER).count() >= 2
}

fn is_bold_wrapped(trimmed: &str) -> bool {
    trimmed.len() >= 2 * EMPHASIS_MARKER.len() + 1
        && trimmed.starts_with(EMPHASIS_MARKER)
        && trimmed.ends_with(EMPHASIS_MARKER)
}

/// The body of a bulleted line: `-` or `*` followed by whitespace.
fn bullet_body(trimmed: &str) -> Option<&str> {
    let rest = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))?;
    let first = rest.chars().next()?;
    first.is_whitespace().then(|| rest.trim_start())
}

/// Classifies one raw input line.
pub fn classify_line(line: &str, sources_marker: &str) -> Block {
    let trimmed = line.trim();

    if trimmed.is_empty() || is_rule(trimmed) {
        return Block::Blank;
    }

    if is_bold_wrapped(trimmed) && trimmed.contains(sources_marker) {
        return Block::SectionHeader {
            label: strip_emphasis(trimmed).trim().to_string(),
        };
    }

    if has_emphasis_pair(trimmed) {
        return Block::Headline {
            text: trimmed.to_string(),
        };
    }

    if let Some(body) = bullet_body(trimmed) {
        let spans = extract(body);
        let mut links = spans.iter().filter_map(|s| match s {
            Span::Link(link) => Some(link),
            Span::Text(_) => None,
        });

        if let (Some(link), None) = (links.next(), links.next()) {
            let mut prefix_text = String::new();
            let mut trailing_text = String::new();
            let mut seen_link = false;
            for span in &spans {
                match span {
                    Span::Link(_) => seen_link = true,
                    Span::Text(t) if seen_link => trailing_text.push_str(t),
                    Span::Text(t) => prefix_text.push_str(t),
                }
            }
            return Block::BulletLink {
                prefix_text,
                link: link.clone(),
                trailing_text,
            };
        }

        return Block::BulletPlain {
            text: body.to_string(),
        };
    }

    Block::Paragraph {
        text: trimmed.to_string(),
    }
}

/// Classifies a whole input text, one block per line, in input order.
pub fn classify(text: &str, sources_marker: &str) -> Vec<Block> {
    text.lines()
        .map(|line| classify_line(line, sources_marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "Real Sources";

    #[test]
    fn blank_and_rule_lines() {
        assert_eq!(classify_line("", MARKER), Block::Blank);
        assert_eq!(classify_line("   ", MARKER), Block::Blank);
        assert_eq!(classify_line("---", MARKER), Block::Blank);
        assert_eq!(classify_line("------", MARKER), Block::Blank);
        // Two dashes are just text.
        assert!(matches!(
            classify_line("--", MARKER),
            Block::Paragraph { .. }
        ));
    }

    #[test]
    fn sources_marker_line_becomes_section_header() {
        let block = classify_line("**📚 Real Sources:**", MARKER);
        assert_eq!(
            block,
            Block::SectionHeader {
                label: "📚 Real Sources:".to_string()
            }
        );
    }

    #[test]
    fn bold_line_without_marker_is_headline() {
        let block = classify_line("**태풍 경보 발령**", MARKER);
        assert_eq!(
            block,
            Block::Headline {
                text: "**태풍 경보 발령**".to_string()
            }
        );
    }

    #[test]
    fn emphasis_beats_bullet() {
        // A bulleted line with a bold title is a heading, not a bullet.
        assert!(matches!(
            classify_line("- **bold** item", MARKER),
            Block::Headline { .. }
        ));
    }

    #[test]
    fn bullet_with_one_link() {
        let block = classify_line("- [기상청](https://example.com/a)", MARKER);
        match block {
            Block::BulletLink {
                prefix_text,
                link,
                trailing_text,
            } => {
                assert_eq!(prefix_text, "");
                assert_eq!(link.display_text, "기상청");
                assert_eq!(link.target_url, "https://example.com/a");
                assert_eq!(trailing_text, "");
            }
            other => panic!("expected BulletLink, got {:?}", other),
        }
    }

    #[test]
    fn bullet_link_keeps_prefix_and_trailing_text() {
        let block = classify_line("* via [KMA](http://kma.go.kr) (updated)", MARKER);
        match block {
            Block::BulletLink {
                prefix_text,
                link,
                trailing_text,
            } => {
                assert_eq!(prefix_text, "via ");
                assert_eq!(link.display_text, "KMA");
                assert_eq!(trailing_text, " (updated)");
            }
            other => panic!("expected BulletLink, got {:?}", other),
        }
    }

    #[test]
    fn bullet_with_two_links_stays_plain() {
        assert!(matches!(
            classify_line("- [a](http://a) [b](http://b)", MARKER),
            Block::BulletPlain { .. }
        ));
    }

    #[test]
    fn bullet_without_space_is_paragraph() {
        assert!(matches!(
            classify_line("-no space", MARKER),
            Block::Paragraph { .. }
        ));
    }

    #[test]
    fn classification_preserves_order() {
        let text = "greeting\n\n**Storm**\n- [a](http://a)\n---\nclosing";
        let blocks = classify(text, MARKER);
        assert_eq!(blocks.len(), 6);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
        assert_eq!(blocks[1], Block::Blank);
        assert!(matches!(blocks[2], Block::Headline { .. }));
        assert!(matches!(blocks[3], Block::BulletLink { .. }));
        assert_eq!(blocks[4], Block::Blank);
        assert!(matches!(blocks[5], Block::Paragraph { .. }));
    }

    #[test]
    fn strip_emphasis_removes_all_markers() {
        assert_eq!(strip_emphasis("**a** and **b**"), "a and b");
        assert_eq!(strip_emphasis("plain"), "plain");
    }
}

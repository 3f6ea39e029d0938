//! Greedy paragraph wrapping on measured glyph widths.

use crate::fonts::FontTable;
use crate::runs::measure_width;

/// Wraps `text` into display lines no wider than `max_width` points.
///
/// Tokens are whitespace-delimited and never split: a single token wider
/// than the column is placed alone on its own line and allowed to overflow
/// rather than corrupting the wrap. Empty input yields a single empty line
/// so callers still advance the cursor by one line height.
pub fn wrap(table: &FontTable, text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }

        let candidate_width = measure_width(table, &current, size)
            + measure_width(table, " ", size)
            + measure_width(table, token, size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(token);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

//! Splitting long briefing text into webhook-sized payloads.
//!
//! Chat platforms cap the size of one posted message, so the text summary is
//! split on line boundaries into chunks at most `limit` bytes. A single line
//! longer than the limit becomes its own chunk rather than being split
//! mid-line; the sink decides how to handle it.

/// Splits `content` into ordered chunks of at most `limit` bytes each,
/// breaking only between lines.
pub fn chunk_message(content: &str, limit: usize) -> Vec<String> {
    if content.len() <= limit {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in content.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if current.is_empty() && line.len() > limit {
            chunks.push(line.to_string());
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_one_chunk() {
        assert_eq!(chunk_message("hello\nworld", 100), vec!["hello\nworld"]);
    }

    #[test]
    fn chunks_respect_the_limit_and_preserve_lines() {
        let content = (0..40)
            .map(|i| format!("line number {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunk_message(&content, 80);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 80, "chunk of {} bytes", chunk.len());
        }
        assert_eq!(chunks.join("\n"), content);
    }

    #[test]
    fn overlong_line_becomes_its_own_chunk() {
        let long = "x".repeat(50);
        let content = format!("a\n{}\nb", long);
        let chunks = chunk_message(&content, 10);
        assert_eq!(chunks, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn splits_only_between_lines() {
        let content = "아 비가 온다\n내일은 맑음\n주말은 흐림";
        let chunks = chunk_message(content, 20);
        for chunk in &chunks {
            for line in chunk.lines() {
                assert!(content.lines().any(|l| l == line));
            }
        }
        assert_eq!(chunks.join("\n"), content);
    }
}

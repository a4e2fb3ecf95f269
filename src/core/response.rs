//! Reply chunking for Discord message limits
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Chunk text into pieces that fit `max_size` bytes (UTF-8 safe, line-aware)
///
/// Prefers splitting at line breaks; a single line longer than the limit is
/// split on character boundaries. Line terminators (`\n` or `\r\n`) are kept
/// inside a chunk and dropped only at chunk edges.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if current.len() + line.len() > max_size {
            if !current.is_empty() {
                chunks.push(current.trim_end_matches(['\r', '\n']).to_string());
                current = String::new();
            }
            if line.len() > max_size {
                chunks.extend(chunk_long_line(line.trim_end_matches(['\r', '\n']), max_size));
            } else {
                current.push_str(line);
            }
        } else {
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end_matches(['\r', '\n']).to_string());
    }
    chunks
}

/// Split a single long line into chunks respecting UTF-8 boundaries
fn chunk_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            result.push(current);
            current = String::new();
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_no_chunk() {
        assert_eq!(chunk_text("hello", 100), vec!["hello"]);
    }

    #[test]
    fn test_chunk_respects_crlf_lines() {
        let text = "ID=1 first\r\nID=2 second\r\nID=3 third";
        let result = chunk_text(text, 24);
        assert_eq!(result, vec!["ID=1 first", "ID=2 second\r\nID=3 third"]);
    }

    #[test]
    fn test_chunk_handles_long_lines() {
        let long_line = "a".repeat(100);
        let result = chunk_text(&long_line, 30);
        assert_eq!(result.len(), 4);
        for chunk in &result {
            assert!(chunk.len() <= 30);
        }
    }

    #[test]
    fn test_message_limit() {
        let result = chunk_for_message(&"a".repeat(3000));
        assert!(result.len() >= 2);
        assert!(result[0].len() <= MESSAGE_LIMIT);
    }

    #[test]
    fn test_utf8_safety() {
        let text = "Hello 世界! ".repeat(500);
        for chunk in chunk_for_message(&text) {
            assert!(chunk.len() <= MESSAGE_LIMIT);
            assert!(chunk.chars().count() > 0);
        }
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(100);
        let result = chunk_text(&text, 100);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 100);
    }
}

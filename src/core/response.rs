//! Message chunking for the transport's size limit
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Telegram message content limit, in bytes of UTF-8.
pub const MESSAGE_LIMIT: usize = 4096;

/// Chunk text for message content (4096 byte limit).
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Split text into pieces of at most `max_size` bytes.
///
/// Prefers splitting at line boundaries and never splits inside a UTF-8
/// character; a single line longer than the limit is split character-wise.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > max_size {
            chunks.push(current.trim_end().to_string());
            current.clear();
        }
        if line.len() + 1 > max_size {
            chunks.extend(split_long_line(line, max_size));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

/// Split a single oversized line, respecting UTF-8 boundaries.
fn split_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if !current.is_empty() && current.len() + ch.len_utf8() > max_size {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

//! Extraction of the first balanced JSON value out of free-form completion
//! text. Models wrap payloads in prose or code fences often enough that
//! plain `serde_json::from_str` on the whole response is a losing bet.

use serde_json::Value;

/// First balanced `{...}` span parsed as JSON, if any.
pub fn find_json_object(text: &str) -> Option<Value> {
    find_balanced(text, '{', '}').and_then(|span| serde_json::from_str(span).ok())
}

/// First balanced `[...]` span parsed as JSON, if any.
pub fn find_json_array(text: &str) -> Option<Value> {
    find_balanced(text, '[', ']').and_then(|span| serde_json::from_str(span).ok())
}

/// Locate the first balanced `open`..`close` span, skipping delimiters that
/// sit inside JSON string literals. Returns a slice of `text`.
fn find_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

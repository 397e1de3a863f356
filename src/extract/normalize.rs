//! Text normalization for untrusted HTML: entity decoding and tag stripping.
//!
//! `strip_tags` runs a fixed pass order: drop script/style/noscript blocks
//! with their content, strip remaining tag markup, collapse whitespace, and
//! only then decode entities. Decoding earlier could re-introduce characters
//! that look like markup.

/// Containers whose content is noise for text extraction.
const DROPPED_BLOCKS: [&str; 3] = ["script", "style", "noscript"];

/// Decode a fixed set of named entities plus numeric (`&#NNN;`) and hex
/// (`&#xHHH;`) character references. Unknown named entities are left intact.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Entity bodies are short; anything without a nearby ';' is literal.
        let semi = rest[1..].find(';').map(|i| i + 1);
        let body = match semi {
            Some(semi) if semi > 1 && semi <= 10 => &rest[1..semi],
            _ => {
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        };

        match decode_entity_body(body) {
            Some(ch) => {
                out.push(ch);
                rest = &rest[body.len() + 2..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity_body(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "nbsp" => Some(' '),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Strip all tag markup from `html`, returning cleaned plain text.
///
/// Tolerant of malformed input: an unterminated tag at the end of input is
/// kept as literal text, mirroring what a non-validating scanner sees.
pub fn strip_tags(html: &str) -> String {
    let mut text = html.to_string();
    for block in DROPPED_BLOCKS {
        text = remove_blocks(&text, block);
    }

    let stripped = remove_tag_markup(&text);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    decode_entities(&collapsed)
}

/// Remove `<name ...> ... </name>` spans including their content.
/// An unterminated block swallows the rest of the input.
fn remove_blocks(html: &str, name: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = find_ci(rest, &format!("<{name}")) {
        // Require a tag boundary so `<s` does not match `<section`.
        let after = rest[open + name.len() + 1..].chars().next();
        if !matches!(after, Some('>') | Some('/') | None) && !after.is_some_and(char::is_whitespace)
        {
            out.push_str(&rest[..open + name.len() + 1]);
            rest = &rest[open + name.len() + 1..];
            continue;
        }

        out.push(' ');
        let tail = &rest[open..];
        match find_ci(tail, &format!("</{name}")) {
            Some(close) => {
                let after_close = &tail[close..];
                match after_close.find('>') {
                    Some(gt) => rest = &after_close[gt + 1..],
                    None => rest = "",
                }
            }
            None => rest = "",
        }
        if rest.is_empty() {
            break;
        }
    }

    out.push_str(rest);
    out
}

/// Replace each `<...>` span with a single space. A `<` with no closing `>`
/// is kept literally, as is the degenerate `<>`.
fn remove_tag_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        match tail[1..].find('>') {
            Some(0) => {
                out.push_str("<>");
                rest = &tail[2..];
            }
            Some(gt) => {
                out.push(' ');
                rest = &tail[gt + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Case-insensitive substring search over ASCII needles.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    let hay = haystack.as_bytes();
    let nee = needle.as_bytes();
    (0..=hay.len() - nee.len()).find(|&i| {
        hay[i..i + nee.len()]
            .iter()
            .zip(nee)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(decode_entities("A &amp; B &#65; &#x42;"), "A & B A B");
    }

    #[test]
    fn decodes_quote_and_nbsp() {
        assert_eq!(decode_entities("&quot;x&quot;&nbsp;&#39;y&#39;"), "\"x\" 'y'");
    }

    #[test]
    fn unknown_named_entity_left_intact() {
        assert_eq!(decode_entities("a &copy; b"), "a &copy; b");
    }

    #[test]
    fn dangling_ampersand_left_intact() {
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }

    #[test]
    fn invalid_numeric_reference_left_intact() {
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
    }

    #[test]
    fn strips_simple_markup() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn drops_script_content_entirely() {
        let html = "<p>keep</p><script>var hidden = 1;</script><p>this</p>";
        assert_eq!(strip_tags(html), "keep this");
    }

    #[test]
    fn drops_style_and_noscript_content() {
        let html = "<style>.x{color:red}</style>a<noscript>enable js</noscript>b";
        assert_eq!(strip_tags(html), "a b");
    }

    #[test]
    fn unterminated_script_swallows_rest() {
        assert_eq!(strip_tags("before<script>var x = 1"), "before");
    }

    #[test]
    fn script_prefix_does_not_swallow_longer_tags() {
        // <style> must not match <styles> as a dropped block.
        assert_eq!(strip_tags("<styles>visible</styles>"), "visible");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(strip_tags("  a\n\n  <br>   b  "), "a b");
    }

    #[test]
    fn decodes_after_stripping() {
        assert_eq!(strip_tags("<p>a &amp; b</p>"), "a & b");
    }

    #[test]
    fn unterminated_tag_kept_as_text() {
        assert_eq!(strip_tags("abc <unterminated"), "abc <unterminated");
    }

    #[test]
    fn strip_tags_is_idempotent() {
        let inputs = [
            "<p>Hello <b>world</b></p>",
            "plain text, no markup",
            "a < b and c > d",
            "abc <unterminated",
            "<article><h1>T</h1><p>body &amp; more</p></article>",
        ];
        for input in inputs {
            let once = strip_tags(input);
            assert_eq!(strip_tags(&once), once, "not idempotent for {input:?}");
        }
    }
}

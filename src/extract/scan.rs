//! Tolerant, non-validating scanner over HTML tags and attributes.
//!
//! This is deliberately not a DOM parser. Adversarial or broken pages must
//! never make extraction raise, so the scanner walks the byte stream looking
//! for tag openings, reads a name and attribute list with a small state
//! machine, and treats anything unterminated as running to the end of input.

/// One scanned tag: lowercase name, raw attribute pairs, and the byte range
/// of the whole `<...>` span within the scanned document.
#[derive(Debug)]
pub struct RawTag {
    pub name: String,
    pub closing: bool,
    pub attrs: Vec<(String, String)>,
    pub start: usize,
    pub end: usize,
}

impl RawTag {
    /// Attribute lookup, ASCII case-insensitive on the name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Scan every tag in `html`, in document order. Malformed tags are returned
/// as best-effort approximations rather than skipped, so callers see the
/// same structure a forgiving browser would.
pub fn scan_tags(html: &str) -> Vec<RawTag> {
    let bytes = html.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        let closing = j < bytes.len() && bytes[j] == b'/';
        if closing {
            j += 1;
        }

        // A tag name starts with an ASCII letter; anything else ("<3", "< ")
        // is text, not markup.
        if j >= bytes.len() || !bytes[j].is_ascii_alphabetic() {
            i += 1;
            continue;
        }

        let name_start = j;
        while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-') {
            j += 1;
        }
        let name = html[name_start..j].to_ascii_lowercase();

        let (attrs, after) = scan_attrs(html, j);
        tags.push(RawTag {
            name,
            closing,
            attrs,
            start: i,
            end: after,
        });
        i = after.max(i + 1);
    }

    tags
}

/// Attribute scanner: `name`, `name=value`, `name="value"`, `name='value'`.
/// Returns the pairs and the byte offset just past the closing `>` (or the
/// end of input for an unterminated tag).
fn scan_attrs(html: &str, from: usize) -> (Vec<(String, String)>, usize) {
    let bytes = html.as_bytes();
    let mut attrs = Vec::new();
    let mut i = from;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return (attrs, i);
        }
        match bytes[i] {
            b'>' => return (attrs, i + 1),
            b'/' | b'?' | b'!' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = html[name_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                value = html[value_start..i].to_string();
                if i < bytes.len() {
                    i += 1; // past the closing quote
                }
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = html[value_start..i].to_string();
            }
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
}

/// Inner HTML of the first `<name>` element. An element left unclosed runs
/// to the end of the document.
pub fn first_element_inner<'a>(html: &'a str, name: &str) -> Option<&'a str> {
    let tags = scan_tags(html);
    let open = tags.iter().find(|t| !t.closing && t.name == name)?;
    let close = tags
        .iter()
        .find(|t| t.closing && t.name == name && t.start >= open.end);
    let inner_end = close.map_or(html.len(), |t| t.start);
    Some(&html[open.end..inner_end])
}

/// Inner HTML of every `<h1>`–`<h3>` element, in document order. A headline
/// with no closing `</h1>`..`</h3>` tag anywhere after it is dropped.
pub fn headline_inners(html: &str) -> Vec<&str> {
    let tags = scan_tags(html);
    let is_headline = |t: &RawTag| matches!(t.name.as_str(), "h1" | "h2" | "h3");
    let mut inners = Vec::new();

    for (idx, tag) in tags.iter().enumerate() {
        if tag.closing || !is_headline(tag) {
            continue;
        }
        if let Some(close) = tags[idx + 1..].iter().find(|t| t.closing && is_headline(t)) {
            inners.push(&html[tag.end..close.start]);
        }
    }

    inners
}

/// Content of the first `<meta>` tag whose `name` or `property` attribute
/// (case-insensitive) matches one of `keys`. Document order wins, matching
/// what a crawler reading top to bottom would pick.
pub fn meta_content(html: &str, keys: &[&str]) -> Option<String> {
    for tag in scan_tags(html) {
        if tag.closing || tag.name != "meta" {
            continue;
        }
        let content = match tag.attr("content") {
            Some(c) if !c.trim().is_empty() => c,
            _ => continue,
        };
        let matched = [tag.attr("name"), tag.attr("property")]
            .into_iter()
            .flatten()
            .any(|v| keys.iter().any(|k| v.eq_ignore_ascii_case(k)));
        if matched {
            return Some(content.to_string());
        }
    }
    None
}

/// The region most likely to hold the page's main text: the first
/// `<article>`, else `<main>`, else `<body>`, else the whole document.
pub fn main_region(html: &str) -> &str {
    first_element_inner(html, "article")
        .or_else(|| first_element_inner(html, "main"))
        .or_else(|| first_element_inner(html, "body"))
        .unwrap_or(html)
}

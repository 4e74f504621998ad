//! Small, forgiving HTML tokenizer for fragment markup.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]`, and a tag name must
//! start with a letter; a `<` that does not open a tag, comment, doctype or end
//! tag is plain text. Names keep their source case (SVG needs it); callers fold
//! case where the namespace asks for it. `script` and `style` bodies are raw
//! text up to the matching close tag.
//!
//! This is not the HTML5 tokenizer state machine: no parse-error recovery
//! beyond skipping what it cannot read.
use crate::entities::decode_entities;
use memchr::memchr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    /// Lowercased name.
    EndTag(String),
    Comment(String),
    Text(String),
}

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Finds `</script` or `</style` (any case) followed by optional whitespace
/// and `>`. Returns the byte range of the whole close tag.
fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= len {
        i += memchr(b'<', &bytes[i..])?;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

fn push_text(out: &mut Vec<Token>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&text);
    } else {
        out.push(Token::Text(text));
    }
}

/// Tokenizes `input`. Adjacent text runs are merged into one token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, so every endpoint is a
    // char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            push_text(&mut out, decode_entities(&input[start..i]));
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(rel) => {
                    out.push(Token::Comment(input[body_start..body_start + rel].to_string()));
                    i = body_start + rel + COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            match input[i + 2..].find('>') {
                Some(rel) => {
                    out.push(Token::Doctype(input[i + 2..i + 2 + rel].trim().to_string()));
                    i += 2 + rel + 1;
                    continue;
                }
                None => break,
            }
        }

        if i + 1 < len && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if name.is_empty() {
                log::trace!(target: "html.tokenizer", "dropping nameless end tag at {i}");
            } else {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }

        if i + 1 >= len || !bytes[i + 1].is_ascii_alphabetic() {
            push_text(&mut out, "<".to_string());
            i += 1;
            continue;
        }

        let (tag, after) = read_start_tag(input, i + 1);
        let end_name = tag.name.to_ascii_lowercase();
        let raw_close = match end_name.as_str() {
            "script" if !tag.self_closing => Some(SCRIPT_CLOSE_TAG),
            "style" if !tag.self_closing => Some(STYLE_CLOSE_TAG),
            _ => None,
        };
        out.push(Token::StartTag {
            name: tag.name,
            attributes: tag.attributes,
            self_closing: tag.self_closing,
        });
        i = after;

        if let Some(close_tag) = raw_close {
            match find_rawtext_close_tag(&input[i..], close_tag) {
                Some((rel_start, rel_end)) => {
                    push_text(&mut out, input[i..i + rel_start].to_string());
                    out.push(Token::EndTag(end_name));
                    i += rel_end;
                }
                None => {
                    // Unterminated: the rest of the input is the raw body.
                    push_text(&mut out, input[i..].to_string());
                    out.push(Token::EndTag(end_name));
                    break;
                }
            }
        }
    }
    log::trace!(target: "html.tokenizer", "{} bytes -> {} tokens", len, out.len());
    out
}

struct StartTag {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    self_closing: bool,
}

/// Reads a start tag whose name begins at `start`. Returns the tag and the
/// index just past the closing `>` (or the end of input).
fn read_start_tag(input: &str, start: usize) -> (StartTag, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut k = start;
    while k < len && is_name_byte(bytes[k]) {
        k += 1;
    }
    let name = input[start..k].to_string();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            // Not a name byte; skip it. Stepping a whole char keeps `k` on a
            // boundary when the byte starts a multi-byte sequence.
            k += input[k..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let attr_name = input[name_start..k].to_string();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]))
            }
        } else {
            None
        };
        attributes.push((attr_name, value));
    }

    if is_void_element(&name) {
        self_closing = true;
    }
    (
        StartTag {
            name,
            attributes,
            self_closing,
        },
        k,
    )
}

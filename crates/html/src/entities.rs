/// Named references decoded in text and attribute values. Anything not listed
/// passes through untouched.
const NAMED: &[(&[u8], char)] = &[
    (b"amp;", '&'),
    (b"lt;", '<'),
    (b"gt;", '>'),
    (b"quot;", '"'),
    (b"apos;", '\''),
    (b"nbsp;", '\u{00A0}'),
    (b"copy;", '\u{00A9}'),
    (b"reg;", '\u{00AE}'),
    (b"trade;", '\u{2122}'),
    (b"hellip;", '\u{2026}'),
    (b"mdash;", '\u{2014}'),
    (b"ndash;", '\u{2013}'),
    (b"laquo;", '\u{00AB}'),
    (b"raquo;", '\u{00BB}'),
    (b"times;", '\u{00D7}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decodes character references in `s`.
///
/// Named references must be semicolon-terminated and appear in the table
/// above. Numeric references (`&#215;`, `&#xD7;`) decode only when they are
/// terminated, within the digit limit, and name a Unicode scalar value.
/// Everything else, including the bare `&`, is copied through unchanged, so
/// decoding is idempotent on its own output for unknown sequences.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr::memchr(b'&', bytes) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    let mut copy_start = first;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        out.push_str(&s[copy_start..i]);

        let (decoded, consumed) = match decode_one(s, i) {
            Some(hit) => hit,
            None => {
                // Not a reference: keep the ampersand and move on.
                out.push('&');
                i += 1;
                copy_start = i;
                continue;
            }
        };
        out.push_str(&decoded);
        i += consumed;
        copy_start = i;
    }
    out.push_str(&s[copy_start..]);
    out
}

/// Tries to decode the reference at byte `at` (which is `&`). Returns the
/// replacement text and how many bytes it covers.
fn decode_one(s: &str, at: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    let rest = &bytes[at + 1..];

    if rest.first() == Some(&b'#') {
        let (digits_start, radix, limit) = match rest.get(1) {
            Some(b'x' | b'X') => (at + 3, 16, MAX_HEX_DIGITS),
            _ => (at + 2, 10, MAX_DEC_DIGITS),
        };
        let end = scan_digits(bytes, digits_start, limit, radix)?;
        let digits = &s[digits_start..end];
        let covered = end + 1 - at;
        return Some(
            match u32::from_str_radix(digits, radix).ok().and_then(char::from_u32) {
                Some(ch) => (ch.to_string(), covered),
                // Terminated but not a scalar value: keep the whole sequence.
                None => (s[at..=end].to_string(), covered),
            },
        );
    }

    NAMED
        .iter()
        .find(|(name, _)| rest.starts_with(name))
        .map(|(name, ch)| (ch.to_string(), name.len() + 1))
}

/// Bounded scan for a run of digits ending in `;`. Returns the index of `;`.
fn scan_digits(bytes: &[u8], start: usize, max_digits: usize, radix: u32) -> Option<usize> {
    let mut j = start;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b';' {
            return (j > start).then_some(j);
        }
        if j - start == max_digits {
            return None;
        }
        let ok = if radix == 16 {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !ok {
            return None;
        }
        j += 1;
    }
    None
}

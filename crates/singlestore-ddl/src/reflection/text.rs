//! Small text helpers shared by the line parsers.

use crate::quoting::IdentifierQuoting;

/// Decodes a single-quoted SQL string body: `''` becomes `'` and the
/// backslash control escapes (`\n`, `\t`, `\\`, ...) are resolved.
pub(crate) fn unescape_sql_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let decoded = match chars.peek() {
                    Some('\\') => Some('\\'),
                    Some('0') => Some('\0'),
                    Some('a') => Some('\u{07}'),
                    Some('b') => Some('\u{08}'),
                    Some('t') => Some('\t'),
                    Some('n') => Some('\n'),
                    Some('v') => Some('\u{0b}'),
                    Some('f') => Some('\u{0c}'),
                    Some('r') => Some('\r'),
                    _ => None,
                };
                if let Some(decoded) = decoded {
                    chars.next();
                    out.push(decoded);
                } else {
                    out.push('\\');
                }
            }
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Un-doubles single quotes, leaving every other character untouched.
pub(crate) fn undouble_quotes(raw: &str) -> String {
    raw.replace("''", "'")
}

/// Collapses runs of whitespace and upper-cases, e.g. `clustered  columnstore`.
pub(crate) fn normalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the byte length of the quoted identifier at the start of `text`,
/// including both quotes, or `None` if it is never closed.
pub(crate) fn quoted_len(text: &str, quoting: &IdentifierQuoting) -> Option<usize> {
    let open = quoting.initial_quote();
    let close = quoting.final_quote();
    let escape = quoting.escape_sequence();

    let body = text.strip_prefix(open)?;
    let mut offset = 0;
    while offset < body.len() {
        let rest = &body[offset..];
        if rest.starts_with(escape) {
            offset += escape.len();
            continue;
        }
        let c = rest.chars().next()?;
        if c == close {
            return Some(open.len_utf8() + offset + close.len_utf8());
        }
        offset += c.len_utf8();
    }
    None
}

/// Splits `text` on `separator`, ignoring separators inside quoted
/// identifiers. Returns `None` on an unterminated quote.
pub(crate) fn split_quoted<'t>(
    text: &'t str,
    separator: char,
    quoting: &IdentifierQuoting,
) -> Option<Vec<&'t str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    while offset < text.len() {
        let rest = &text[offset..];
        let c = rest.chars().next()?;
        if c == quoting.initial_quote() {
            offset += quoted_len(rest, quoting)?;
        } else if c == separator {
            parts.push(&text[start..offset]);
            offset += c.len_utf8();
            start = offset;
        } else {
            offset += c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    Some(parts)
}

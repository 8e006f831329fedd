//! Identifier quoting rules.
//!
//! SingleStore quotes identifiers with backticks by default and with
//! double quotes when `ANSI_QUOTES` is part of the SQL mode. A literal
//! closing quote inside an identifier is written doubled. The reflection
//! patterns are built from an [`IdentifierQuoting`] so that quoted names
//! in `SHOW CREATE TABLE` output are matched and un-escaped with the same
//! rule the server used to produce them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Quote characters and the escape used for a literal closing quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierQuoting {
    initial: char,
    final_quote: char,
    escape: String,
}

impl IdentifierQuoting {
    /// Creates a quoting configuration.
    ///
    /// `escape` is what a literal `final_quote` becomes inside a quoted
    /// identifier (usually the quote doubled).
    ///
    /// # Errors
    ///
    /// Returns an error if either quote character could be part of a bare
    /// identifier, or if `escape` does not contain the closing quote.
    pub fn new(initial: char, final_quote: char, escape: impl Into<String>) -> Result<Self> {
        for quote in [initial, final_quote] {
            if quote.is_alphanumeric() || quote.is_whitespace() || quote == '_' {
                return Err(Error::InvalidQuoteChar(quote));
            }
        }
        let escape = escape.into();
        if !escape.contains(final_quote) || escape.chars().eq([final_quote]) {
            return Err(Error::InvalidEscape {
                quote: final_quote,
                escape,
            });
        }
        Ok(Self {
            initial,
            final_quote,
            escape,
        })
    }

    /// Backtick quoting, the server default.
    #[must_use]
    pub fn backtick() -> Self {
        Self {
            initial: '`',
            final_quote: '`',
            escape: String::from("``"),
        }
    }

    /// Double-quote quoting used under `ANSI_QUOTES`.
    #[must_use]
    pub fn ansi() -> Self {
        Self {
            initial: '"',
            final_quote: '"',
            escape: String::from("\"\""),
        }
    }

    /// Returns the opening quote character.
    #[must_use]
    pub const fn initial_quote(&self) -> char {
        self.initial
    }

    /// Returns the closing quote character.
    #[must_use]
    pub const fn final_quote(&self) -> char {
        self.final_quote
    }

    /// Returns the escape sequence for a literal closing quote.
    #[must_use]
    pub fn escape_sequence(&self) -> &str {
        &self.escape
    }

    /// Escapes every closing quote in `name`.
    #[must_use]
    pub fn escape_identifier(&self, name: &str) -> String {
        name.replace(self.final_quote, &self.escape)
    }

    /// Reverses [`escape_identifier`](Self::escape_identifier).
    #[must_use]
    pub fn unescape_identifier(&self, text: &str) -> String {
        text.replace(&self.escape, &self.final_quote.to_string())
    }

    /// Quotes and escapes `name`.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.initial,
            self.escape_identifier(name),
            self.final_quote
        )
    }

    /// Recovers the bare name from a possibly quoted identifier.
    ///
    /// Returns `None` when the quoting is unbalanced, i.e. the text starts
    /// with the opening quote but is not closed, or contains a closing
    /// quote that is not part of an escape sequence.
    #[must_use]
    pub fn unquote(&self, text: &str) -> Option<String> {
        let Some(rest) = text.strip_prefix(self.initial) else {
            if text.contains(self.final_quote) {
                return None;
            }
            return Some(text.to_string());
        };
        let inner = rest.strip_suffix(self.final_quote)?;

        let mut name = String::with_capacity(inner.len());
        let mut remaining = inner;
        while let Some(c) = remaining.chars().next() {
            if remaining.starts_with(self.escape.as_str()) {
                name.push(self.final_quote);
                remaining = &remaining[self.escape.len()..];
            } else if c == self.final_quote {
                return None;
            } else {
                name.push(c);
                remaining = &remaining[c.len_utf8()..];
            }
        }
        Some(name)
    }

    /// Regex fragment matching one quoted identifier, capturing its
    /// still-escaped body in the group `group`.
    pub(crate) fn quoted_capture(&self, group: &str) -> String {
        format!(
            "{iq}(?P<{group}>(?:{esc}|[^{fq}])+){fq_lit}",
            iq = regex::escape(&self.initial.to_string()),
            esc = regex::escape(&self.escape),
            fq = class_escape(self.final_quote),
            fq_lit = regex::escape(&self.final_quote.to_string()),
        )
    }

    /// Regex fragment matching one quoted identifier without capturing.
    pub(crate) fn quoted_pattern(&self) -> String {
        format!(
            "{iq}(?:{esc}|[^{fq}])+{fq_lit}",
            iq = regex::escape(&self.initial.to_string()),
            esc = regex::escape(&self.escape),
            fq = class_escape(self.final_quote),
            fq_lit = regex::escape(&self.final_quote.to_string()),
        )
    }
}

impl Default for IdentifierQuoting {
    fn default() -> Self {
        Self::backtick()
    }
}

/// Escapes a character for use inside a regex character class.
fn class_escape(c: char) -> String {
    if c.is_ascii_punctuation() && c != '<' && c != '>' {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_round_trip() {
        let quoting = IdentifierQuoting::backtick();
        assert_eq!(quoting.quote("a`b"), "`a``b`");
        assert_eq!(quoting.unquote("`a``b`").as_deref(), Some("a`b"));
    }

    #[test]
    fn test_ansi_unquote() {
        let quoting = IdentifierQuoting::ansi();
        assert_eq!(quoting.unquote("\"a\"\"b\"").as_deref(), Some("a\"b"));
        assert_eq!(quoting.unquote("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn test_unbalanced_quotes() {
        let quoting = IdentifierQuoting::backtick();
        assert_eq!(quoting.unquote("`open"), None);
        assert_eq!(quoting.unquote("`a`b`"), None);
        assert_eq!(quoting.unquote("a`b"), None);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            IdentifierQuoting::new('a', 'a', "aa"),
            Err(Error::InvalidQuoteChar('a'))
        ));
        assert!(matches!(
            IdentifierQuoting::new('[', ']', "]"),
            Err(Error::InvalidEscape { .. })
        ));
        assert!(IdentifierQuoting::new('[', ']', "]]").is_ok());
    }

    #[test]
    fn test_quoted_pattern_matches() {
        let quoting = IdentifierQuoting::new('[', ']', "]]").unwrap();
        let re = regex::Regex::new(&format!("^{}$", quoting.quoted_capture("n"))).unwrap();
        let caps = re.captures("[a]]b]").unwrap();
        assert_eq!(&caps["n"], "a]]b");
    }
}

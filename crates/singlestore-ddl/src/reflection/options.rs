//! Table options: `) ENGINE=... AUTOSTATS_ENABLED=TRUE COMMENT='...'`.

use std::collections::BTreeMap;

use regex::Regex;

use super::text::{undouble_quotes, unescape_sql_string};
use crate::error::{Error, Result};

/// Options that describe the physical layout of one server and are never
/// carried over.
const DROPPED_OPTIONS: &[&str] = &["auto_increment", "data_directory", "index_directory"];

/// Extracts `NAME=value` pairs from a table-options fragment.
#[derive(Debug, Clone)]
pub struct TableOptionsParser {
    option: Regex,
}

impl TableOptionsParser {
    /// Compiles the option pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        let option = Regex::new(
            r"(?i)(?P<name>[A-Z][A-Z0-9_]*(?:\s+[A-Z][A-Z0-9_]*)*?)\s*=\s*(?P<value>'(?:''|[^'])*'|[^\s',]+)",
        )
        .map_err(|source| Error::Pattern {
            name: "table option",
            source,
        })?;
        Ok(Self { option })
    }

    /// Parses every option in `text` into `options`.
    ///
    /// Names are lower-cased with inner whitespace replaced by `_`; a
    /// later occurrence of a name overwrites an earlier one.
    pub fn parse_into(&self, text: &str, options: &mut BTreeMap<String, String>) {
        for caps in self.option.captures_iter(text) {
            let name = caps["name"]
                .split_whitespace()
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join("_");
            if DROPPED_OPTIONS.contains(&name.as_str()) {
                continue;
            }
            let raw = &caps["value"];
            let value = match raw.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
                Some(body) if name == "comment" => unescape_sql_string(body),
                Some(body) => undouble_quotes(body),
                None => raw.to_string(),
            };
            options.insert(name, value);
        }
    }

    /// Parses `text` into a fresh map.
    #[must_use]
    pub fn parse(&self, text: &str) -> BTreeMap<String, String> {
        let mut options = BTreeMap::new();
        self.parse_into(text, &mut options);
        options
    }
}

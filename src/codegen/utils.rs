//! Utility functions for TypeScript code generation.

use regex::Regex;
use std::borrow::Cow;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_$][A-Za-z0-9_$]*$";

/// Escape a string for use inside a single-quoted TypeScript literal.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_single_quoted(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\'']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Checks generated constant names against the TypeScript identifier grammar.
///
/// Only the ASCII subset is accepted; names with other characters are
/// reported even where TypeScript itself would allow them.
#[derive(Debug, Clone)]
pub struct IdentifierCheck {
    pattern: Regex,
}

impl IdentifierCheck {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"),
        }
    }

    pub fn is_valid(&self, identifier: &str) -> bool {
        self.pattern.is_match(identifier)
    }
}

impl Default for IdentifierCheck {
    fn default() -> Self {
        Self::new()
    }
}

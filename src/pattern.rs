//! Wildcard matching for file and directory names
//!
//! `*` matches any run of characters and `?` matches at most one character.
//! Matching is case-insensitive and always covers the whole name.

use crate::error::VfsErrorKind;
use crate::{VfsError, VfsResult};
use regex::{Regex, RegexBuilder};

/// A compiled search pattern
#[derive(Debug, Clone)]
pub struct Wildcard {
    pattern: String,
    regex: Regex,
}

impl Wildcard {
    pub fn new(pattern: &str) -> VfsResult<Self> {
        let pattern = pattern.trim();
        let translated = regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\?", ".?");
        let regex = RegexBuilder::new(&format!(r"^{}\z", translated))
            .case_insensitive(true)
            .build()
            .map_err(|err| {
                VfsError::from(VfsErrorKind::Other(err.to_string()))
                    .with_path(pattern)
                    .with_context(|| "Could not compile search pattern")
            })?;
        Ok(Wildcard {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name.trim())
    }
}

/// One-shot match; a pattern that cannot be compiled matches nothing
pub fn matches(name: &str, pattern: &str) -> bool {
    Wildcard::new(pattern)
        .map(|wildcard| wildcard.matches(name))
        .unwrap_or(false)
}

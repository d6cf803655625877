use std::fmt;

use regex::Regex;

use crate::{config::PatternConfig, error::ExprError};

/// A compiled regular expression together with the options it was built with.
///
/// Two patterns are equal when their source text and options are equal.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    config: PatternConfig,
}

impl Pattern {
    pub fn new(source: &str, config: &PatternConfig) -> Result<Self, ExprError> {
        let regex = config.compile(source).map_err(|e| ExprError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;
        tracing::debug!(pattern = source, "compiled match pattern");
        Ok(Pattern {
            regex,
            config: config.clone(),
        })
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Whether the pattern matches anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.config == other.config
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.as_str())
            .field("config", &self.config)
            .finish()
    }
}

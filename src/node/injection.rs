use std::fmt;

use regex::Regex;

use crate::error::RenderError;

/// Pattern every value substituted into a `${...}` token must match in full.
#[derive(Clone)]
pub struct InjectionFilter {
    pattern: String,
    matcher: Regex,
}

impl InjectionFilter {
    pub fn new(pattern: &str) -> Result<InjectionFilter, RenderError> {
        let invalid = |source| RenderError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        };

        // The pattern must be valid on its own, anchoring must not repair it.
        Regex::new(pattern).map_err(invalid)?;

        // A valid pattern only breaks once anchored when a trailing `(?x)`
        // comment swallows the anchor, a newline ends the comment.
        let matcher = Regex::new(&format!("^(?:{})$", pattern))
            .or_else(|_| Regex::new(&format!("^(?:{}\n)$", pattern)))
            .map_err(invalid)?;

        Ok(InjectionFilter {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Source text of the pattern, as it was configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.matcher.is_match(value)
    }

    pub fn validate<'v>(&self, value: &'v str) -> Result<&'v str, RenderError> {
        if self.is_match(value) {
            Ok(value)
        } else {
            log::warn!(
                "Rejected substitution value, it does not conform to {}",
                self.pattern
            );
            Err(RenderError::InvalidInput {
                pattern: self.pattern.clone(),
            })
        }
    }
}

impl fmt::Debug for InjectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InjectionFilter").field(&self.pattern).finish()
    }
}

use thiserror::Error;

/// Errors raised while rendering a text node.
///
/// An absent parameter or a property that resolves to null are not errors,
/// both substitute an empty string.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A substituted value did not match the configured injection filter.
    #[error("Invalid input. Please conform to regex {pattern}")]
    InvalidInput { pattern: String },

    /// The injection filter pattern itself failed to compile.
    #[error("Invalid injection filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Raised by the expression evaluator, passed through untouched.
    #[error(transparent)]
    Evaluation(#[from] anyhow::Error),
}

impl RenderError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RenderError::InvalidInput { .. })
    }
}

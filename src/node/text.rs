use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::{DynamicContext, RenderContext};
use crate::error::RenderError;
use crate::expression::{Evaluator, PathEvaluator};
use crate::parsing::TokenParser;
use crate::types::{is_simple_type, to_text};

use super::{InjectionFilter, SqlNode};

/// SQL text with `${...}` tokens substituted verbatim at render time.
///
/// Unlike bound parameters, substituted values end up in the SQL text itself,
/// so an [`InjectionFilter`] can be attached to restrict them:
///
/// ```
/// let node = TextSqlNode::new("SELECT * FROM ${table} WHERE id = 1");
/// assert!(node.is_dynamic());
///
/// let sql = node.render(Some(&json!({"table": "users"})))?;
/// assert_eq!(sql, "SELECT * FROM users WHERE id = 1");
/// ```
///
/// When the parameter object is a simple value (number, string, ...) every
/// token is replaced by that value, whatever the token says. A missing
/// parameter replaces every token with an empty string.
#[derive(Clone)]
pub struct TextSqlNode {
    text: String,
    injection_filter: Option<InjectionFilter>,
    evaluator: Arc<dyn Evaluator>,
}

impl TextSqlNode {
    pub fn new(text: impl Into<String>) -> TextSqlNode {
        TextSqlNode {
            text: text.into(),
            injection_filter: None,
            evaluator: Arc::new(PathEvaluator),
        }
    }

    pub fn with_injection_filter(text: impl Into<String>, filter: InjectionFilter) -> TextSqlNode {
        TextSqlNode {
            injection_filter: Some(filter),
            ..TextSqlNode::new(text)
        }
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn injection_filter(&self) -> Option<&InjectionFilter> {
        self.injection_filter.as_ref()
    }

    /// True if the text contains at least one unescaped `${...}` token.
    /// Static text can be cached as is.
    pub fn is_dynamic(&self) -> bool {
        let mut found = false;
        let scanned = TokenParser::dollar().parse(&self.text, |_| {
            found = true;
            Ok::<_, Infallible>(None)
        });
        match scanned {
            Ok(_) => found,
            Err(never) => match never {},
        }
    }

    /// Renders the text for `parameter` into a fresh [`DynamicContext`] and
    /// returns the resulting SQL.
    pub fn render(&self, parameter: Option<&Value>) -> Result<String, RenderError> {
        let mut context = DynamicContext::new(parameter.cloned());
        self.apply(&mut context)?;
        Ok(context.sql())
    }

}

impl SqlNode for TextSqlNode {
    fn apply(&self, context: &mut dyn RenderContext) -> Result<bool, RenderError> {
        let binding = TokenBinding {
            parameter: context.parameter(),
            filter: self.injection_filter.as_ref(),
            evaluator: self.evaluator.as_ref(),
        };
        let sql = TokenParser::dollar().parse(&self.text, |content| binding.resolve(content))?;

        log::debug!("Rendered text node: {}", sql);
        context.append_sql(&sql);
        Ok(true)
    }
}

impl fmt::Debug for TextSqlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSqlNode")
            .field("text", &self.text)
            .field("injection_filter", &self.injection_filter)
            .finish_non_exhaustive()
    }
}

/// Resolves the content of each `${...}` token to the text substituted for it.
struct TokenBinding<'a> {
    parameter: Option<&'a Value>,
    filter: Option<&'a InjectionFilter>,
    evaluator: &'a dyn Evaluator,
}

impl TokenBinding<'_> {
    fn resolve(&self, content: &str) -> Result<Option<String>, RenderError> {
        let Some(parameter) = self.parameter else {
            return Ok(Some(String::new()));
        };

        let value = if is_simple_type(parameter) {
            to_text(parameter)
        } else {
            to_text(&self.evaluator.evaluate(content, parameter)?)
        };
        log::trace!("Token '{}' resolved to '{}'", content, value);

        if let Some(filter) = self.filter {
            filter.validate(&value)?;
        }
        Ok(Some(value))
    }
}

use serde::Deserialize;

use crate::error::RenderError;
use crate::node::{InjectionFilter, TextSqlNode};

/// Settings for building text nodes, read from the command line or the
/// environment (`SQLTEXT_INJECTION_FILTER`), or deserialized from a settings
/// file.
#[derive(clap::Parser, Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Pattern every substituted `${...}` value must match in full
    #[clap(long, env = "SQLTEXT_INJECTION_FILTER")]
    #[serde(default)]
    pub injection_filter: Option<String>,
}

impl Config {
    pub fn injection_filter(&self) -> Result<Option<InjectionFilter>, RenderError> {
        self.injection_filter
            .as_deref()
            .map(InjectionFilter::new)
            .transpose()
    }

    pub fn text_node(&self, text: &str) -> Result<TextSqlNode, RenderError> {
        Ok(match self.injection_filter()? {
            Some(filter) => TextSqlNode::with_injection_filter(text, filter),
            None => TextSqlNode::new(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_args() {
        let config = Config::parse_from(["sqltext", "--injection-filter", "^[a-z_]+$"]);
        let node = config.text_node("ORDER BY ${column}").unwrap();

        assert_eq!(node.injection_filter().unwrap().pattern(), "^[a-z_]+$");
        assert_eq!(
            node.render(Some(&json!({"column": "created_at"}))).unwrap(),
            "ORDER BY created_at"
        );
        assert!(node.render(Some(&json!({"column": "1; --"}))).is_err());
    }

    #[test]
    fn test_from_json() {
        let config: Config = serde_json::from_value(json!({})).unwrap();
        assert!(config.injection_filter().unwrap().is_none());

        let config: Config = serde_json::from_value(json!({"injection_filter": "(x"})).unwrap();
        assert!(matches!(
            config.text_node("${x}").unwrap_err(),
            RenderError::InvalidFilter { .. }
        ));
    }
}

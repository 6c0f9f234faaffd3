use std::sync::{Arc, RwLock};

use anyhow::Result;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde_json::Value;

use super::path::PropertyPath;

/// Resolves a property expression against a parameter object.
///
/// Implementations must be shareable between threads, a single evaluator is
/// typically used by every node of a template tree.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str, root: &Value) -> Result<Value>;
}

lazy_static! {
    static ref PATH_CACHE: RwLock<IndexMap<String, Arc<PropertyPath>>> =
        RwLock::new(IndexMap::new());
}

/// Default [`Evaluator`] navigating dotted and indexed property paths.
///
/// Parsed paths are kept in a process-wide cache keyed by expression text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEvaluator;

impl PathEvaluator {
    pub fn new() -> PathEvaluator {
        PathEvaluator
    }

    pub fn compile(expression: &str) -> Result<Arc<PropertyPath>> {
        if let Some(path) = PATH_CACHE
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(expression)
        {
            return Ok(path.clone());
        }

        let path = Arc::new(PropertyPath::parse(expression)?);
        log::debug!("Caching property path '{}'", expression);
        PATH_CACHE
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(expression.to_string(), path.clone());
        Ok(path)
    }

    pub fn cached_paths() -> Vec<String> {
        PATH_CACHE
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    pub fn clear_cache() {
        PATH_CACHE
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Evaluator for PathEvaluator {
    fn evaluate(&self, expression: &str, root: &Value) -> Result<Value> {
        let path = PathEvaluator::compile(expression)?;
        Ok(path.resolve(root)?)
    }
}

//! Nodes of a SQL template tree.
//!
//! A template tree is rendered by applying every node to the same
//! [`RenderContext`] in order. This crate provides the leaf that performs
//! `${...}` text substitution, [`TextSqlNode`].
mod injection;
mod text;

pub use injection::InjectionFilter;
pub use text::TextSqlNode;

use crate::context::RenderContext;
use crate::error::RenderError;

pub trait SqlNode {
    /// Appends the SQL of this node to `context`. Returns true when the node
    /// contributed to the statement.
    fn apply(&self, context: &mut dyn RenderContext) -> Result<bool, RenderError>;
}

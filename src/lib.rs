//! Text substitution for SQL templates.
//!
//! A [`TextSqlNode`] holds SQL text with `${...}` tokens. At render time each
//! token is replaced verbatim by a value taken from the statement parameter,
//! optionally checked by an [`InjectionFilter`]. Text without tokens is
//! reported as static by [`TextSqlNode::is_dynamic`].
mod config;
pub mod context;
mod error;
pub mod expression;
pub mod node;
pub mod parsing;
pub mod prelude;
pub mod types;

pub use crate::config::Config;
pub use crate::error::RenderError;
pub use crate::node::{InjectionFilter, SqlNode, TextSqlNode};

//! Property path evaluation against parameter objects.
//!
//! Text nodes do not navigate values themselves, they hand the token content
//! to an [`Evaluator`]. [`PathEvaluator`] is the one used by default and
//! understands paths like `user.name`, `lines[0].qty` or `attrs['x-id']`.
mod evaluator;
mod path;

pub use evaluator::{Evaluator, PathEvaluator};
pub use path::{PathError, PathStep, PropertyPath};

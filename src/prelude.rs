pub use crate::context::{DynamicContext, RenderContext, DATABASE_ID_KEY, PARAMETER_OBJECT_KEY};
pub use crate::expression::{Evaluator, PathEvaluator};
pub use crate::parsing::TokenParser;
pub use crate::{Config, InjectionFilter, RenderError, SqlNode, TextSqlNode};

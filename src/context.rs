use indexmap::IndexMap;
use serde_json::Value;

/// Binding that holds the parameter object of the statement being rendered.
pub const PARAMETER_OBJECT_KEY: &str = "_parameter";
/// Binding that holds the id of the database the statement is rendered for.
pub const DATABASE_ID_KEY: &str = "_databaseId";

/// State shared by all nodes while a single statement is rendered.
///
/// Nodes borrow the context for the duration of one `apply` call, append
/// their SQL and read bindings. A context is not meant to be shared between
/// concurrent renders.
pub trait RenderContext {
    fn append_sql(&mut self, sql: &str);
    fn binding(&self, name: &str) -> Option<&Value>;

    /// Parameter object, `None` when unbound or bound to null.
    fn parameter(&self) -> Option<&Value> {
        self.binding(PARAMETER_OBJECT_KEY)
            .filter(|value| !value.is_null())
    }
}

/// Default [`RenderContext`] collecting SQL fragments in order.
#[derive(Debug, Clone)]
pub struct DynamicContext {
    bindings: IndexMap<String, Value>,
    fragments: Vec<String>,
    unique_number: usize,
}

impl DynamicContext {
    pub fn new(parameter: Option<Value>) -> DynamicContext {
        let mut bindings = IndexMap::new();
        bindings.insert(
            PARAMETER_OBJECT_KEY.to_string(),
            parameter.unwrap_or(Value::Null),
        );
        bindings.insert(DATABASE_ID_KEY.to_string(), Value::Null);

        DynamicContext {
            bindings,
            fragments: Vec::new(),
            unique_number: 0,
        }
    }

    pub fn with_database_id(mut self, database_id: &str) -> Self {
        self.bind(DATABASE_ID_KEY, Value::String(database_id.to_string()));
        self
    }

    pub fn bind(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn bindings(&self) -> &IndexMap<String, Value> {
        &self.bindings
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Appended fragments joined by a single space.
    pub fn sql(&self) -> String {
        self.fragments.join(" ")
    }

    pub fn unique_number(&mut self) -> usize {
        let number = self.unique_number;
        self.unique_number += 1;
        number
    }
}

impl RenderContext for DynamicContext {
    fn append_sql(&mut self, sql: &str) {
        self.fragments.push(sql.to_string());
    }

    fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

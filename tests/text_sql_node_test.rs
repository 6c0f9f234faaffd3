use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sqltext::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Statement {
    nodes: Vec<TextSqlNode>,
}

impl Statement {
    fn render(&self, parameter: Option<Value>) -> Result<String, RenderError> {
        let mut context = DynamicContext::new(parameter);
        for node in &self.nodes {
            node.apply(&mut context)?;
        }
        Ok(context.sql())
    }
}

#[test]
fn test_statement_from_several_nodes() {
    init_logging();

    let statement = Statement {
        nodes: vec![
            TextSqlNode::new("SELECT * FROM ${table}"),
            TextSqlNode::new("WHERE status = 'active'"),
            TextSqlNode::new("ORDER BY ${sort.column} ${sort.direction}"),
        ],
    };
    let parameter = json!({
        "table": "orders",
        "sort": {"column": "placed_at", "direction": "DESC"}
    });

    assert_eq!(
        statement.render(Some(parameter)).unwrap(),
        "SELECT * FROM orders WHERE status = 'active' ORDER BY placed_at DESC"
    );
    assert!(statement.nodes[0].is_dynamic());
    assert!(!statement.nodes[1].is_dynamic());
}

#[test]
fn test_rejected_value_aborts_statement() {
    init_logging();

    let filter = InjectionFilter::new("^[0-9]+$").unwrap();
    let node = TextSqlNode::with_injection_filter("LIMIT ${limit}", filter);
    let mut context = DynamicContext::new(Some(json!({"limit": "1; DROP TABLE t"})));
    context.append_sql("SELECT * FROM t");

    let err = node.apply(&mut context).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(context.sql(), "SELECT * FROM t");
}

#[test]
fn test_scalar_parameter() {
    init_logging();

    let node = TextSqlNode::new("id = ${value}");
    assert_eq!(node.render(Some(&json!(42))).unwrap(), "id = 42");
    assert_eq!(node.render(Some(&json!(true))).unwrap(), "id = true");
}

#[test]
fn test_database_id_binding_does_not_affect_text() {
    init_logging();

    let node = TextSqlNode::new("name = ${name}");
    let mut context = DynamicContext::new(Some(json!({"name": "Ann"}))).with_database_id("sqlite");
    node.apply(&mut context).unwrap();

    assert_eq!(context.sql(), "name = Ann");
    assert_eq!(context.binding(DATABASE_ID_KEY), Some(&json!("sqlite")));
}

#[test]
fn test_node_is_shared_between_threads() {
    init_logging();

    let node = Arc::new(TextSqlNode::new("id = ${user.id}"));
    let handles = (0..4)
        .map(|i| {
            let node = node.clone();
            thread::spawn(move || node.render(Some(&json!({"user": {"id": i}}))).unwrap())
        })
        .collect::<Vec<_>>();

    let rendered = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(rendered, vec!["id = 0", "id = 1", "id = 2", "id = 3"]);
}

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::types::ValueKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// `.name` (or a leading `name`)
    Field(String),
    /// `[3]`
    Index(usize),
    /// `['name']` or `["name"]`
    Key(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, ".{}", name),
            PathStep::Index(index) => write!(f, "[{}]", index),
            PathStep::Key(key) => write!(f, "['{}']", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Malformed property path '{expression}' at {position}: {message}")]
    Syntax {
        expression: String,
        position: usize,
        message: String,
    },

    #[error("Unknown property '{property}' in '{expression}'")]
    UnknownProperty {
        expression: String,
        property: String,
    },

    #[error("Index {index} is out of bounds (length {length}) in '{expression}'")]
    IndexOutOfBounds {
        expression: String,
        index: usize,
        length: usize,
    },

    #[error("Cannot apply '{step}' to null while resolving '{expression}'")]
    NullIntermediate { expression: String, step: String },

    #[error("Cannot apply '{step}' to {kind} while resolving '{expression}'")]
    WrongKind {
        expression: String,
        step: String,
        kind: ValueKind,
    },
}

/// A parsed property path such as `user.addresses[0].city` or `attrs['x-id']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    expression: String,
    steps: Vec<PathStep>,
}

impl PropertyPath {
    pub fn parse(expression: &str) -> Result<PropertyPath, PathError> {
        PathParser::new(expression).parse()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Walks `root` following the path. A null at the end of the path is
    /// returned as is, a null half way through is an error.
    pub fn resolve(&self, root: &Value) -> Result<Value, PathError> {
        let mut current = root;
        for (i, step) in self.steps.iter().enumerate() {
            if let (Value::Array(items), PathStep::Field(name)) = (current, step) {
                if is_length(name) {
                    return match self.steps.get(i + 1) {
                        None => Ok(Value::from(items.len())),
                        Some(next) => Err(PathError::WrongKind {
                            expression: self.expression.clone(),
                            step: next.to_string(),
                            kind: ValueKind::Number,
                        }),
                    };
                }
            }
            current = self.step_into(current, step)?;
        }
        Ok(current.clone())
    }

    fn step_into<'v>(&self, current: &'v Value, step: &PathStep) -> Result<&'v Value, PathError> {
        match (current, step) {
            (Value::Null, step) => Err(PathError::NullIntermediate {
                expression: self.expression.clone(),
                step: step.to_string(),
            }),
            (Value::Object(map), PathStep::Field(name) | PathStep::Key(name)) => {
                map.get(name).ok_or_else(|| PathError::UnknownProperty {
                    expression: self.expression.clone(),
                    property: name.clone(),
                })
            }
            (Value::Array(items), PathStep::Index(index)) => {
                items.get(*index).ok_or_else(|| PathError::IndexOutOfBounds {
                    expression: self.expression.clone(),
                    index: *index,
                    length: items.len(),
                })
            }
            (other, step) => Err(PathError::WrongKind {
                expression: self.expression.clone(),
                step: step.to_string(),
                kind: ValueKind::of(other),
            }),
        }
    }
}

fn is_length(name: &str) -> bool {
    name == "length" || name == "size"
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

struct PathParser<'a> {
    expression: &'a str,
    position: usize,
}

impl<'a> PathParser<'a> {
    fn new(source: &'a str) -> PathParser<'a> {
        PathParser {
            expression: source.trim(),
            position: 0,
        }
    }

    fn parse(mut self) -> Result<PropertyPath, PathError> {
        if self.expression.is_empty() {
            return Err(self.error("expression is empty"));
        }

        let mut steps = Vec::new();
        if self.peek() != Some('[') {
            steps.push(PathStep::Field(self.identifier()?));
        }
        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.bump();
                    steps.push(PathStep::Field(self.identifier()?));
                }
                '[' => {
                    self.bump();
                    steps.push(self.bracket()?);
                }
                _ => return Err(self.error(&format!("unexpected character '{}'", c))),
            }
        }

        Ok(PropertyPath {
            expression: self.expression.to_string(),
            steps,
        })
    }

    fn identifier(&mut self) -> Result<String, PathError> {
        let start = self.position;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => self.bump(),
            _ => return Err(self.error("expected a property name")),
        }
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '$') {
            self.bump();
        }
        Ok(self.expression[start..self.position].to_string())
    }

    fn bracket(&mut self) -> Result<PathStep, PathError> {
        let step = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                let start = self.position;
                while matches!(self.peek(), Some(c) if c != quote) {
                    self.bump();
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated quoted key"));
                }
                let key = self.expression[start..self.position].to_string();
                self.bump();
                PathStep::Key(key)
            }
            Some(c) if c.is_ascii_digit() => {
                let start = self.position;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
                let index = self.expression[start..self.position]
                    .parse::<usize>()
                    .map_err(|e| self.error(&e.to_string()))?;
                PathStep::Index(index)
            }
            _ => return Err(self.error("expected an index or a quoted key")),
        };

        match self.peek() {
            Some(']') => {
                self.bump();
                Ok(step)
            }
            _ => Err(self.error("expected ']'")),
        }
    }

    fn peek(&self) -> Option<char> {
        self.expression[self.position..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.position += c.len_utf8();
        }
    }

    fn error(&self, message: &str) -> PathError {
        PathError::Syntax {
            expression: self.expression.to_string(),
            position: self.position,
            message: message.to_string(),
        }
    }
}

use crate::ast;
use indexmap::IndexSet;
use std::collections::BTreeMap;

/// A literal (or variable reference) passed as an argument to a field or
/// directive.
///
/// Values are kept only so they can be rendered back into query text; the
/// registry never evaluates them.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    Enum(String),
    List(Vec<ArgValue>),
    Object(BTreeMap<String, ArgValue>),
}
impl ArgValue {
    pub(crate) fn from_ast_value(ast_value: &ast::operation::Value) -> Self {
        match ast_value {
            ast::operation::Value::Variable(var_name) =>
                ArgValue::Variable(var_name.clone()),

            ast::operation::Value::Int(value) => match value.as_i64() {
                Some(int) => ArgValue::Int(int),
                None => ArgValue::Null,
            },

            ast::operation::Value::Float(value) =>
                ArgValue::Float(*value),

            ast::operation::Value::String(value) =>
                ArgValue::String(value.clone()),

            ast::operation::Value::Boolean(value) =>
                ArgValue::Bool(*value),

            ast::operation::Value::Null =>
                ArgValue::Null,

            ast::operation::Value::Enum(value) =>
                ArgValue::Enum(value.clone()),

            ast::operation::Value::List(values) =>
                ArgValue::List(values.iter().map(ArgValue::from_ast_value).collect()),

            ast::operation::Value::Object(entries) =>
                ArgValue::Object(entries.iter().map(|(key, ast_value)|
                    (key.clone(), ArgValue::from_ast_value(ast_value))
                ).collect()),
        }
    }

    pub(crate) fn collect_variables<'a>(&'a self, names: &mut IndexSet<&'a str>) {
        match self {
            Self::Variable(name) => {
                names.insert(name.as_str());
            },
            Self::List(items) => {
                for item in items {
                    item.collect_variables(names);
                }
            },
            Self::Object(entries) => {
                for value in entries.values() {
                    value.collect_variables(names);
                }
            },
            Self::Int(_)
            | Self::Float(_)
            | Self::String(_)
            | Self::Bool(_)
            | Self::Null
            | Self::Enum(_) => (),
        }
    }
}

/// Renders the value as GraphQL source text.
impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "${name}"),
            Self::Int(value) => write!(f, "{value}"),
            // Debug keeps the fractional part (`1.0`) so the literal stays a
            // Float on the wire.
            Self::Float(value) => write!(f, "{value:?}"),
            // GraphQL string escapes are a superset of JSON's.
            Self::String(value) => match serde_json::to_string(value) {
                Ok(escaped) => f.write_str(&escaped),
                Err(_) => Err(std::fmt::Error),
            },
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
            Self::Enum(value) => f.write_str(value),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Self::Object(entries) => {
                f.write_str("{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            },
        }
    }
}

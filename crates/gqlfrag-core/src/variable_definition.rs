use crate::ArgValue;
use crate::ast;

/// The declared type of a query variable, e.g. `[String!]!`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeAnnotation {
    List(Box<TypeAnnotation>),
    Named(String),
    NonNull(Box<TypeAnnotation>),
}
impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list_of(self) -> Self {
        Self::List(Box::new(self))
    }

    pub fn non_null(self) -> Self {
        match self {
            already @ Self::NonNull(_) => already,
            other => Self::NonNull(Box::new(other)),
        }
    }

    pub(crate) fn from_ast(ast_type: &ast::operation::Type) -> Self {
        match ast_type {
            ast::operation::Type::NamedType(name) => Self::Named(name.clone()),
            ast::operation::Type::ListType(inner) =>
                Self::List(Box::new(Self::from_ast(inner))),
            ast::operation::Type::NonNullType(inner) =>
                Self::NonNull(Box::new(Self::from_ast(inner))),
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A variable declared by a root query, e.g. `$limit: Int = 10`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub(crate) default_value: Option<ArgValue>,
    pub(crate) name: String,
    pub(crate) var_type: TypeAnnotation,
}
impl VariableDefinition {
    /// `name` is given without the leading `$`.
    pub fn new(name: impl Into<String>, var_type: TypeAnnotation) -> Self {
        Self {
            default_value: None,
            name: name.into(),
            var_type,
        }
    }

    pub fn with_default(mut self, default_value: ArgValue) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub(crate) fn from_ast(ast_var_def: &ast::operation::VariableDefinition) -> Self {
        Self {
            default_value: ast_var_def.default_value.as_ref().map(ArgValue::from_ast_value),
            name: ast_var_def.name.clone(),
            var_type: TypeAnnotation::from_ast(&ast_var_def.var_type),
        }
    }

    pub fn default_value(&self) -> Option<&ArgValue> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn var_type(&self) -> &TypeAnnotation {
        &self.var_type
    }
}

impl std::fmt::Display for VariableDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}: {}", self.name, self.var_type)?;
        if let Some(default_value) = &self.default_value {
            write!(f, " = {default_value}")?;
        }
        Ok(())
    }
}

use crate::ArgValue;
use crate::ast;
use indexmap::IndexMap;

/// A directive applied to a field selection, e.g. `@include(if: $withTicks)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub(crate) arguments: IndexMap<String, ArgValue>,
    pub(crate) name: String,
}
impl DirectiveAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            arguments: IndexMap::new(),
            name: name.into(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub(crate) fn from_ast(ast_directive: &ast::operation::Directive) -> Self {
        Self {
            arguments: ast_directive.arguments.iter()
                .map(|(name, value)| (name.clone(), ArgValue::from_ast_value(value)))
                .collect(),
            name: ast_directive.name.clone(),
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgValue> {
        &self.arguments
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// `@include` and `@skip` let the server omit the field entirely.
    pub fn is_conditional_inclusion(&self) -> bool {
        matches!(self.name.as_str(), "include" | "skip")
    }
}

impl std::fmt::Display for DirectiveAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (idx, (name, value)) in self.arguments.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

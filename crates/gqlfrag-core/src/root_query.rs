use crate::DocumentLoadError;
use crate::SelectionSet;
use crate::VariableDefinition;
use crate::ast;
use std::collections::HashSet;
use std::sync::Arc;

type Result<T> = std::result::Result<T, Vec<DocumentLoadError>>;

/// The operation a [`QueryComposer`](crate::QueryComposer) builds on: the
/// root selection together with the query's name and the variables it
/// declares.
///
/// Registered fragments may reference variables (`futureTicks(limit:
/// $limit)`); the root query is where they get declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootQuery {
    pub(crate) name: Option<String>,
    pub(crate) selection_set: SelectionSet,
    pub(crate) variable_definitions: Vec<VariableDefinition>,
}
impl RootQuery {
    pub fn new(selection_set: SelectionSet) -> Self {
        Self {
            name: None,
            selection_set,
            variable_definitions: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_variable(mut self, variable: VariableDefinition) -> Self {
        self.variable_definitions.push(variable);
        self
    }

    /// Parse either the `{ ... }` shorthand or a single `query` operation.
    ///
    /// The document must contain exactly one operation and no fragment
    /// definitions; fragments belong in a
    /// [`FragmentRegistry`](crate::FragmentRegistry). The operation's name
    /// and variable definitions are kept. Directives on the operation itself
    /// are rejected.
    pub fn parse(source: impl AsRef<str>) -> Result<Self> {
        let ast_doc = ast::operation::parse(source.as_ref())
            .map_err(|e| vec![DocumentLoadError::ParseError(Arc::new(e))])?;

        let mut root = None;
        for def in &ast_doc.definitions {
            let parsed = match def {
                ast::operation::Definition::Operation(
                    ast::operation::OperationDefinition::SelectionSet(sel_set),
                ) => Self::new(SelectionSet::from_ast(sel_set, None)?),

                ast::operation::Definition::Operation(
                    ast::operation::OperationDefinition::Query(query),
                ) => {
                    if !query.directives.is_empty() {
                        return Err(vec![invalid_root(
                            "directives on the root operation are not supported",
                        )]);
                    }
                    let mut declared = HashSet::new();
                    if let Some(duplicate) = query.variable_definitions.iter()
                        .find(|var_def| !declared.insert(var_def.name.as_str())) {
                        return Err(vec![invalid_root(format!(
                            "variable `${}` is declared more than once",
                            duplicate.name,
                        ))]);
                    }
                    Self {
                        name: query.name.clone(),
                        selection_set: SelectionSet::from_ast(&query.selection_set, None)?,
                        variable_definitions: query.variable_definitions.iter()
                            .map(VariableDefinition::from_ast)
                            .collect(),
                    }
                },

                ast::operation::Definition::Operation(_) =>
                    return Err(vec![invalid_root("only query operations can be composed")]),

                ast::operation::Definition::Fragment(frag_def) =>
                    return Err(vec![invalid_root(format!(
                        "fragment `{}` must be registered rather than \
                        defined inline",
                        frag_def.name,
                    ))]),
            };

            if root.is_some() {
                return Err(vec![invalid_root("expected exactly one operation")]);
            }
            root = Some(parsed);
        }

        root.ok_or_else(|| vec![invalid_root("document contains no operation")])
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    pub fn variable_definitions(&self) -> &[VariableDefinition] {
        self.variable_definitions.as_slice()
    }

    pub fn variable_definition(&self, name: &str) -> Option<&VariableDefinition> {
        self.variable_definitions.iter().find(|var_def| var_def.name() == name)
    }
}

impl From<SelectionSet> for RootQuery {
    fn from(selection_set: SelectionSet) -> Self {
        Self::new(selection_set)
    }
}

fn invalid_root(reason: impl Into<String>) -> DocumentLoadError {
    DocumentLoadError::InvalidRootDocument {
        reason: reason.into(),
    }
}

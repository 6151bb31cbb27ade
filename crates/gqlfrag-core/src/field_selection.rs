use crate::ArgValue;
use crate::DirectiveAnnotation;
use crate::DocumentLoadError;
use crate::NULLABLE_DIRECTIVE;
use crate::SelectionSet;
use crate::ast;
use crate::loc;
use indexmap::IndexMap;
use std::path::Path;

/// A single field requested by a selection set, together with everything
/// needed to render it back into a query and to check the matching value in
/// a response payload.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSelection {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: IndexMap<String, ArgValue>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) nullable: bool,
    pub(crate) selection_set: Option<SelectionSet>,
}
impl FieldSelection {
    /// A required leaf field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: IndexMap::new(),
            def_location: loc::SourceLocation::Api,
            directives: vec![],
            name: name.into(),
            nullable: false,
            selection_set: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    /// `@nullable` only flips the nullable flag; `@include`/`@skip` are kept
    /// and also make the field nullable.
    pub fn with_directive(mut self, directive: DirectiveAnnotation) -> Self {
        if directive.name() == NULLABLE_DIRECTIVE {
            self.nullable = true;
            return self;
        }
        if directive.is_conditional_inclusion() {
            self.nullable = true;
        }
        self.directives.push(directive);
        self
    }

    pub fn with_fields(self, fields: Vec<FieldSelection>) -> Self {
        self.with_selection_set(SelectionSet::new(fields))
    }

    pub fn with_selection_set(mut self, selection_set: SelectionSet) -> Self {
        self.selection_set = Some(selection_set);
        self
    }

    pub(crate) fn from_ast(
        ast_field: &ast::operation::Field,
        file_path: Option<&Path>,
    ) -> Result<Self, Vec<DocumentLoadError>> {
        let selection_set =
            if ast_field.selection_set.items.is_empty() {
                None
            } else {
                Some(SelectionSet::from_ast(&ast_field.selection_set, file_path)?)
            };

        let mut field = Self {
            alias: ast_field.alias.clone(),
            arguments: ast_field.arguments.iter()
                .map(|(name, value)| (name.clone(), ArgValue::from_ast_value(value)))
                .collect(),
            def_location: loc::SourceLocation::from_execdoc_ast_position(
                file_path,
                &ast_field.position,
            ),
            directives: vec![],
            name: ast_field.name.clone(),
            nullable: false,
            selection_set,
        };
        for ast_directive in &ast_field.directives {
            field = field.with_directive(DirectiveAnnotation::from_ast(ast_directive));
        }

        Ok(field)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgValue> {
        &self.arguments
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// If an alias was specified for this selection, return the alias.
    /// Otherwise return the name of the field. This is the key the field's
    /// value appears under in a response payload.
    pub fn selected_name(&self) -> &str {
        self.alias().unwrap_or(self.name.as_str())
    }

    pub fn selection_set(&self) -> Option<&SelectionSet> {
        self.selection_set.as_ref()
    }
}

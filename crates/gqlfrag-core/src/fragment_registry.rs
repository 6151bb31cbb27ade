use crate::DocumentLoadError;
use crate::FieldSelection;
use crate::FragmentDefinition;
use crate::ast;
use crate::file_reader;
use crate::loc;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Fragment definitions keyed by name.
///
/// A registry is built once at startup (from code, from GraphQL documents, or
/// both) and then shared by reference with a
/// [`QueryComposer`](crate::QueryComposer) and a
/// [`ShapeValidator`](crate::ShapeValidator). Nothing mutates it after
/// startup, so concurrent readers need no synchronization.
///
/// Registration accepts references to fragments that are not registered yet;
/// they only have to exist by the time something composes or validates
/// through them. [`check_integrity`](Self::check_integrity) reports any that
/// never showed up.
///
/// # Example
///
/// ```
/// use gqlfrag_core::FieldSelection;
/// use gqlfrag_core::FragmentRegistry;
///
/// let mut registry = FragmentRegistry::new();
/// registry.register(
///     "AssetTableDefinitionFragment",
///     "AssetNode",
///     vec![
///         FieldSelection::new("id"),
///         FieldSelection::new("groupName").nullable(),
///     ],
///     vec![],
/// ).unwrap();
///
/// registry.add_from_document_str(
///     "fragment AssetKeyFragment on AssetKey { path }",
///     None,
/// ).unwrap();
///
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentRegistry {
    pub(crate) fragments: IndexMap<String, FragmentDefinition>,
}

impl FragmentRegistry {
    pub fn new() -> Self {
        Self {
            fragments: IndexMap::new(),
        }
    }

    /// Register a fragment built in code.
    ///
    /// Returns an error if a fragment with the same name already exists.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        type_condition: impl Into<String>,
        selections: Vec<FieldSelection>,
        nested_refs: Vec<String>,
    ) -> Result<&FragmentDefinition, RegisterError> {
        self.register_definition(FragmentDefinition::new(
            name,
            type_condition,
            selections,
            nested_refs,
        ))
    }

    /// Register a pre-built fragment definition.
    ///
    /// Returns an error if a fragment with the same name already exists.
    pub fn register_definition(
        &mut self,
        fragment: FragmentDefinition,
    ) -> Result<&FragmentDefinition, RegisterError> {
        if let Some(existing) = self.fragments.get(fragment.name()) {
            return Err(RegisterError::DuplicateName {
                fragment_name: fragment.name,
                first_def_location: existing.def_location.clone(),
                second_def_location: fragment.def_location,
            });
        }

        log::debug!(
            "Registered fragment `{}` on `{}` ({}).",
            fragment.name(),
            fragment.type_condition(),
            fragment.def_location(),
        );
        let registered = self.fragments
            .entry(fragment.name.clone())
            .or_insert(fragment);
        Ok(&*registered)
    }

    pub fn lookup(&self, name: &str) -> Result<&FragmentDefinition, FragmentNotFoundError> {
        self.fragments.get(name).ok_or_else(|| FragmentNotFoundError {
            fragment_name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// All registered fragments, in registration order.
    pub fn fragments(&self) -> &IndexMap<String, FragmentDefinition> {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Register every fragment definition in an already-parsed document.
    ///
    /// Operation definitions in the document are ignored. Errors are
    /// collected across the whole document; fragments that lowered cleanly
    /// are registered even when others in the same document fail.
    pub fn add_from_document_ast(
        &mut self,
        ast: &ast::operation::Document,
        file_path: Option<&Path>,
    ) -> Result<(), Vec<DocumentLoadError>> {
        let mut errors = vec![];

        for def in &ast.definitions {
            match def {
                ast::operation::Definition::Fragment(frag_def) => {
                    match FragmentDefinition::from_ast(frag_def, file_path) {
                        Ok(fragment) => {
                            if let Err(RegisterError::DuplicateName {
                                fragment_name,
                                first_def_location,
                                second_def_location,
                            }) = self.register_definition(fragment) {
                                errors.push(DocumentLoadError::DuplicateName {
                                    fragment_name,
                                    first_def_location,
                                    second_def_location,
                                });
                            }
                        },
                        Err(mut fragment_errors) => errors.append(&mut fragment_errors),
                    }
                },

                ast::operation::Definition::Operation(_) => {
                    log::debug!(
                        "Skipping operation definition while loading fragments \
                        from {}.",
                        file_path.map_or_else(
                            || "<str>".to_string(),
                            |path| path.display().to_string(),
                        ),
                    );
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(())
    }

    /// Parse fragments from a file and register them.
    pub fn add_from_document_file(
        &mut self,
        file_path: impl AsRef<Path>,
    ) -> Result<(), Vec<DocumentLoadError>> {
        let file_path = file_path.as_ref();
        let file_content = file_reader::read_content(file_path)
            .map_err(|e| vec![DocumentLoadError::FileReadError(Arc::new(e))])?;

        self.add_from_document_str(file_content, Some(file_path))
    }

    /// Parse fragments from a string and register them.
    pub fn add_from_document_str(
        &mut self,
        content: impl AsRef<str>,
        file_path: Option<&Path>,
    ) -> Result<(), Vec<DocumentLoadError>> {
        let ast_doc = ast::operation::parse(content.as_ref())
            .map_err(|e| vec![DocumentLoadError::ParseError(Arc::new(e))])?;

        self.add_from_document_ast(&ast_doc, file_path)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegisterError {
    #[error("Duplicate fragment definition: '{fragment_name}'")]
    DuplicateName {
        fragment_name: String,
        first_def_location: loc::SourceLocation,
        second_def_location: loc::SourceLocation,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("No fragment named '{fragment_name}' is registered")]
pub struct FragmentNotFoundError {
    pub fragment_name: String,
}

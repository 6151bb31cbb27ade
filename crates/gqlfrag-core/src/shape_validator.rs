use crate::FieldSelection;
use crate::FragmentRegistry;
use crate::ResponsePath;
use crate::SelectionSet;
use crate::TYPENAME_FIELD;
use serde_json::Map;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

type Result<T> = std::result::Result<T, ValidationError>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject payload keys that no field (or spread fragment) selects at that
    /// level. `__typename` is always tolerated.
    pub deny_unknown_fields: bool,
}

/// Checks JSON response payloads against the shape a registered fragment
/// declares.
///
/// The walk is read-only and stops at the first violation. Arrays are
/// transparent: a field whose value is a (possibly nested) list is checked
/// element by element against the same selection.
#[derive(Clone, Copy, Debug)]
pub struct ShapeValidator<'reg> {
    options: ValidationOptions,
    registry: &'reg FragmentRegistry,
}

impl<'reg> ShapeValidator<'reg> {
    pub fn new(registry: &'reg FragmentRegistry) -> Self {
        Self::with_options(registry, ValidationOptions::default())
    }

    pub fn with_options(
        registry: &'reg FragmentRegistry,
        options: ValidationOptions,
    ) -> Self {
        Self {
            options,
            registry,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn registry(&self) -> &'reg FragmentRegistry {
        self.registry
    }

    /// Validate `payload` against the fragment registered as
    /// `fragment_name`.
    pub fn validate(&self, fragment_name: &str, payload: &Value) -> Result<()> {
        log::trace!("Validating payload against fragment `{fragment_name}`.");
        let fragment = self.registry.lookup(fragment_name)
            .map_err(|_| ValidationError::NotFound {
                fragment_name: fragment_name.to_string(),
                path: ResponsePath::root(),
            })?;

        let result = self.validate_selection_set(fragment.selection_set(), payload);
        if let Err(err) = &result {
            log::debug!("Payload does not conform to fragment `{fragment_name}`: {err}");
        }
        result
    }

    /// Validate `payload` against an arbitrary selection set, such as the
    /// root selection of a composed query checked against the response's
    /// `data` object.
    pub fn validate_selection_set(
        &self,
        selection_set: &SelectionSet,
        payload: &Value,
    ) -> Result<()> {
        let mut path = ResponsePath::root();
        match payload {
            Value::Object(object) => self.check_object(selection_set, object, &mut path),
            other => Err(ValidationError::TypeMismatch {
                expected: ExpectedKind::Object,
                found: ValueKind::of(other),
                path,
            }),
        }
    }

    fn check_object(
        &self,
        selection_set: &SelectionSet,
        object: &Map<String, Value>,
        path: &mut ResponsePath,
    ) -> Result<()> {
        let mut applied_fragments = HashSet::new();
        self.check_object_against(selection_set, object, path, &mut applied_fragments)?;

        if self.options.deny_unknown_fields {
            let mut selected_keys = HashSet::new();
            let mut visited_fragments = HashSet::new();
            self.collect_selected_keys(
                selection_set,
                &mut selected_keys,
                &mut visited_fragments,
            );
            if let Some(unknown) = object.keys().find(|key| {
                key.as_str() != TYPENAME_FIELD && !selected_keys.contains(key.as_str())
            }) {
                return Err(ValidationError::UnexpectedField {
                    field: unknown.to_string(),
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_object_against(
        &self,
        selection_set: &SelectionSet,
        object: &Map<String, Value>,
        path: &mut ResponsePath,
        applied_fragments: &mut HashSet<&'reg str>,
    ) -> Result<()> {
        for field in selection_set.fields() {
            self.check_field(field, object, path)?;
        }

        for fragment_name in selection_set.fragment_refs() {
            let fragment = self.registry.lookup(fragment_name)
                .map_err(|_| ValidationError::NotFound {
                    fragment_name: fragment_name.to_string(),
                    path: path.clone(),
                })?;

            // A fragment applied twice to one object adds nothing new; this
            // is also what stops spread cycles.
            if !applied_fragments.insert(fragment.name()) {
                continue;
            }
            self.check_object_against(
                fragment.selection_set(),
                object,
                path,
                applied_fragments,
            )?;
        }

        Ok(())
    }

    fn check_field(
        &self,
        field: &FieldSelection,
        object: &Map<String, Value>,
        path: &mut ResponsePath,
    ) -> Result<()> {
        let key = field.selected_name();
        let Some(value) = object.get(key) else {
            if field.is_nullable() {
                return Ok(());
            }
            return Err(ValidationError::MissingField {
                field: key.to_string(),
                path: path.clone(),
            });
        };

        path.push_field(key);
        let result = self.check_value(field, value, path);
        path.pop();
        result
    }

    fn check_value(
        &self,
        field: &FieldSelection,
        value: &Value,
        path: &mut ResponsePath,
    ) -> Result<()> {
        let expected =
            if field.selection_set().is_some() {
                ExpectedKind::Object
            } else {
                ExpectedKind::Scalar
            };

        match (value, field.selection_set()) {
            (Value::Null, _) if field.is_nullable() => Ok(()),

            (Value::Array(items), _) => {
                for (idx, item) in items.iter().enumerate() {
                    path.push_index(idx);
                    let result = self.check_value(field, item, path);
                    path.pop();
                    result?;
                }
                Ok(())
            },

            (Value::Object(object), Some(sub_selection)) =>
                self.check_object(sub_selection, object, path),

            (Value::Bool(_) | Value::Number(_) | Value::String(_), None) => Ok(()),

            (other, _) => Err(ValidationError::TypeMismatch {
                expected,
                found: ValueKind::of(other),
                path: path.clone(),
            }),
        }
    }

    fn collect_selected_keys<'s>(
        &self,
        selection_set: &'s SelectionSet,
        keys: &mut HashSet<&'s str>,
        visited_fragments: &mut HashSet<&'reg str>,
    ) where 'reg: 's {
        keys.extend(selection_set.fields().iter().map(FieldSelection::selected_name));
        for fragment_name in selection_set.fragment_refs() {
            // Unregistered fragments were already reported by the shape walk.
            let Ok(fragment) = self.registry.lookup(fragment_name) else {
                continue;
            };
            if visited_fragments.insert(fragment.name()) {
                self.collect_selected_keys(fragment.selection_set(), keys, visited_fragments);
            }
        }
    }
}

/// What a selection expects to find where a value was present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedKind {
    /// A field with a sub-selection: an object (or list of objects).
    Object,
    /// A leaf field: a string, number, or boolean (or list of them).
    Scalar,
}
impl std::fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Object => "object",
            Self::Scalar => "scalar",
        })
    }
}

/// The JSON kind of a payload value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Array,
    Bool,
    Null,
    Number,
    Object,
    String,
}
impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Self::Array,
            Value::Bool(_) => Self::Bool,
            Value::Null => Self::Null,
            Value::Number(_) => Self::Number,
            Value::Object(_) => Self::Object,
            Value::String(_) => Self::String,
        }
    }
}
impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Array => "array",
            Self::Bool => "boolean",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field `{field}` at `{path}`")]
    MissingField {
        field: String,
        path: ResponsePath,
    },

    #[error("No fragment named '{fragment_name}' is registered (needed at `{path}`)")]
    NotFound {
        fragment_name: String,
        path: ResponsePath,
    },

    #[error("Expected {expected} at `{path}`, found {found}")]
    TypeMismatch {
        expected: ExpectedKind,
        found: ValueKind,
        path: ResponsePath,
    },

    #[error("Unexpected field `{field}` at `{path}`")]
    UnexpectedField {
        field: String,
        path: ResponsePath,
    },
}
impl ValidationError {
    /// For missing/unexpected fields this is the containing object; for type
    /// mismatches it is the offending value itself.
    pub fn path(&self) -> &ResponsePath {
        match self {
            Self::MissingField { path, .. }
            | Self::NotFound { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnexpectedField { path, .. } => path,
        }
    }
}

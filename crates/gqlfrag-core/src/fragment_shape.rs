use crate::ShapeValidator;
use crate::ValidationError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A Rust type describing the data one registered fragment selects.
///
/// Pairing the type with its fragment lets
/// [`ShapeValidator::decode`] check the payload structurally (with precise
/// paths in errors) before handing it to `serde` for typed decoding.
pub trait FragmentShape: DeserializeOwned {
    const FRAGMENT_NAME: &'static str;
}

impl ShapeValidator<'_> {
    pub fn decode<T: FragmentShape>(
        &self,
        payload: serde_json::Value,
    ) -> Result<T, DecodeError> {
        self.validate(T::FRAGMENT_NAME, &payload)?;
        serde_json::from_value(payload).map_err(|source| DecodeError::Deserialize {
            fragment_name: T::FRAGMENT_NAME,
            source,
        })
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Payload conforms to fragment `{fragment_name}` but could not be decoded: {source}")]
    Deserialize {
        fragment_name: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

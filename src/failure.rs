//! The failure raised when a validation run reports errors.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use thiserror::Error;

use crate::error::{Result, RuleError};
use crate::rule::ValidationError;

/// Default message of a [`ValidationFailure`].
pub const DEFAULT_MESSAGE: &str = "Object violates one or more rules.";

type Source = Box<dyn StdError + Send + Sync + 'static>;

/// A failed validation run.
///
/// Holds the distinct errors of the run, ordered by value. Immutable once
/// constructed.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ValidationFailure<E: ValidationError> {
    errors: BTreeSet<E>,
    message: String,
    #[source]
    source: Option<Source>,
}

impl<E: ValidationError> ValidationFailure<E> {
    /// Create a failure with the default message.
    pub fn new<I: IntoIterator<Item = E>>(errors: I) -> Self {
        Self::with_message(errors, DEFAULT_MESSAGE)
    }

    pub fn with_message<I, M>(errors: I, message: M) -> Self
    where
        I: IntoIterator<Item = E>,
        M: Into<String>,
    {
        Self {
            errors: errors.into_iter().collect(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a failure whose message names the type `T` and lists the errors.
    ///
    /// Output format:
    /// ```text
    /// my_crate::Customer violates one or more rules: NameMissing, EmailInvalid
    /// ```
    pub fn for_type<T: ?Sized, I: IntoIterator<Item = E>>(errors: I) -> Self {
        let errors: BTreeSet<E> = errors.into_iter().collect();
        let message = format!(
            "{} violates one or more rules: {}",
            std::any::type_name::<T>(),
            join_errors(&errors, ", ")
        );
        Self {
            errors,
            message,
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source<S>(mut self, source: S) -> Self
    where
        S: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &BTreeSet<E> {
        &self.errors
    }

    pub fn contains(&self, error: &E) -> bool {
        self.errors.contains(error)
    }

    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, E> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Render the failure as a JSON object.
    pub fn to_json(&self) -> Result<String>
    where
        E: Serialize,
    {
        serde_json::to_string(self).map_err(|e| RuleError::Serialization(e.to_string()))
    }
}

impl<'a, E: ValidationError> IntoIterator for &'a ValidationFailure<E> {
    type Item = &'a E;
    type IntoIter = std::collections::btree_set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl<E: ValidationError + Serialize> Serialize for ValidationFailure<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationFailure", 2)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

pub(crate) fn join_errors<'a, E, I>(errors: I, separator: &str) -> String
where
    E: ValidationError,
    I: IntoIterator<Item = &'a E>,
{
    errors
        .into_iter()
        .map(|e| format!("{:?}", e))
        .collect::<Vec<_>>()
        .join(separator)
}

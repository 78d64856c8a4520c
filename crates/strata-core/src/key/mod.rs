//! Module: key
//! Responsibility: entity identity values and the factories that build them
//! from materialized rows.
//! Does not own: row materialization, change tracking, or schema validation.
//!
//! Invariants:
//! - Equal keys hash equally; `EntityKey` is usable as a map/set key.
//! - Simple keys compare by their scalar's natural equality; values of
//!   different scalar types never compare equal.
//! - Composite keys compare element-wise in key-shape order; blobs compare
//!   byte-for-byte.
//! - At most one factory exists per key shape within one `KeyFactorySource`.

mod factory;
mod scalar;


use crate::{
    error::{ErrorClass, ErrorDetail, ErrorOrigin, InternalError},
    model::ValueKind,
    value::Value,
};
use thiserror::Error as ThisError;

// re-exports
pub use factory::{
    CompositeKeyFactory, KeyFactory, KeyFactoryKind, KeyFactorySource, SimpleKeyFactory,
};
pub use scalar::{KeyScalar, ScalarKey};

///
/// KeyError
///
/// Failures while resolving a key factory or building a key from a row.
/// Every variant signals a model/row inconsistency, never a transient fault.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeyError {
    #[error("key shape has no properties")]
    EmptyShape,

    #[error("row has no value for key property '{property}'")]
    MissingValue { property: String },

    #[error("key property '{property}' is null")]
    NullValue { property: String },

    #[error("key property '{property}' expects {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: ValueKind,
        found: &'static str,
    },
}

impl KeyError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyShape | Self::NullValue { .. } => ErrorClass::InvariantViolation,
            Self::MissingValue { .. } => ErrorClass::NotFound,
            Self::TypeMismatch { .. } => ErrorClass::TypeMismatch,
        }
    }
}

impl From<KeyError> for InternalError {
    fn from(err: KeyError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Key,
            message: err.to_string(),
            detail: Some(ErrorDetail::Key(err)),
        }
    }
}

///
/// CompositeKey
///
/// Ordered raw values of a multi-property or structural key.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CompositeKey {
    values: Box<[Value]>,
}

impl CompositeKey {
    #[must_use]
    pub fn new(values: impl Into<Box<[Value]>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

///
/// EntityKey
///
/// Opaque identity of one materialized row.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum EntityKey {
    Simple(ScalarKey),
    Composite(CompositeKey),
}

impl EntityKey {
    #[must_use]
    pub fn simple(value: impl Into<ScalarKey>) -> Self {
        Self::Simple(value.into())
    }

    #[must_use]
    pub fn composite(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Composite(CompositeKey::new(values.into_iter().collect::<Vec<_>>()))
    }

    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&ScalarKey> {
        match self {
            Self::Simple(key) => Some(key),
            Self::Composite(_) => None,
        }
    }
}

mod float;


use crate::model::ValueKind;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use ulid::Ulid;

// re-exports
pub use float::{Float32, Float64};

///
/// Value
///
/// Raw column value as read from a materialized row.
///
/// Null        → the column is SQL NULL.
/// Blob        → byte sequence; equality and hashing are element-wise.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(Float32),
    Float64(Float64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Ulid(Ulid),
    Blob(Vec<u8>),
}

impl Value {
    /// Kind of this value, or `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int8(_) => ValueKind::Int8,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Uint8(_) => ValueKind::Uint8,
            Self::Uint16(_) => ValueKind::Uint16,
            Self::Uint32(_) => ValueKind::Uint32,
            Self::Uint64(_) => ValueKind::Uint64,
            Self::Float32(_) => ValueKind::Float32,
            Self::Float64(_) => ValueKind::Float64,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Ulid(_) => ValueKind::Ulid,
            Self::Blob(_) => ValueKind::Blob,
        };

        Some(kind)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Diagnostic label: the kind label, or `null`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.label(),
            None => "null",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Self::Blob(b) = self {
            Some(b.as_slice())
        } else {
            None
        }
    }
}

/// Implements `From<T> for Value` for direct variant conversions.
macro_rules! impl_from_value {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    }
}

impl_from_value! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Float32 => Float32,
    Float64 => Float64,
    Decimal => Decimal,
    String => Text,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    Ulid => Ulid,
    Vec<u8> => Blob,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

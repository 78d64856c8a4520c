use crate::{
    model::ValueKind,
    value::{Float32, Float64, Value},
};
use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Display;
use rust_decimal::Decimal;
use std::{fmt, hash::Hash};
use ulid::Ulid;

///
/// ScalarKey
///
/// Concretely typed value of a single-property key. One variant per
/// non-structural `ValueKind`; cross-variant values are never equal.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum ScalarKey {
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
}

///
/// KeyScalar
///
/// Rust type backing one `SimpleKeyFactory` specialization.
/// `from_value` accepts only the exact matching `Value` variant.
///

pub trait KeyScalar:
    Clone + Eq + Hash + fmt::Debug + Into<ScalarKey> + Send + Sync + 'static
{
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

/// Implements `KeyScalar` and `From<T> for ScalarKey` for `Copy` scalars.
macro_rules! impl_key_scalar {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl KeyScalar for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for ScalarKey {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    }
}

impl_key_scalar! {
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
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    Ulid => Ulid,
}

impl KeyScalar for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(ToString::to_string)
    }
}

impl From<String> for ScalarKey {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ScalarKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

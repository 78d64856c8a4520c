use derive_more::Display;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

// Next identity handed out by `PropertyId::next`; zero is never assigned.
static NEXT_PROPERTY_ID: AtomicU64 = AtomicU64::new(1);

///
/// PropertyId
///
/// Process-unique identity of one property descriptor.
/// Two descriptors are the same attribute iff their ids are equal, regardless
/// of name or declared type.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct PropertyId(u64);

impl PropertyId {
    fn next() -> Self {
        Self(NEXT_PROPERTY_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// ValueKind
///
/// Closed set of value kinds a property may declare.
/// `Blob` is the only structural kind; everything else compares directly.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Decimal,
    Text,
    Date,
    DateTime,
    Ulid,
    Blob,
}

impl ValueKind {
    pub const ALL: [Self; 17] = [
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::Decimal,
        Self::Text,
        Self::Date,
        Self::DateTime,
        Self::Ulid,
        Self::Blob,
    ];

    /// Whether values of this kind need element-wise comparison.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Blob)
    }

    /// Stable lowercase label used by model files and diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Ulid => "ulid",
            Self::Blob => "blob",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// PropertyType
///
/// Declared value type of a property: the underlying kind plus nullability.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PropertyType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl PropertyType {
    #[must_use]
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// The non-nullable form of this type.
    #[must_use]
    pub const fn underlying(self) -> ValueKind {
        self.kind
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind.label())
        } else {
            write!(f, "{}", self.kind.label())
        }
    }
}

///
/// Property
///
/// Read-only descriptor of one column/property, owned by the schema model and
/// shared as `Arc<Property>`.
///

#[derive(Debug)]
pub struct Property {
    id: PropertyId,
    name: String,
    ty: PropertyType,
    index: usize,
}

impl Property {
    /// Create a new descriptor with a fresh identity and ordinal zero.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            id: PropertyId::next(),
            name: name.into(),
            ty,
            index: 0,
        }
    }

    /// Set the ordinal of this property inside its entity's row layout.
    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub const fn id(&self) -> PropertyId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        self.ty
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.ty.kind
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.ty.nullable
    }

    /// Ordinal of this property in a [`ValueBuffer`](crate::row::ValueBuffer).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

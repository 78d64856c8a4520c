//! Core runtime for Strata: schema model descriptors, raw row values, entity
//! key identity, relational connection handles, and the metrics sink.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod key;
pub mod model;
pub mod obs;
pub mod row;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, connections, or metrics plumbing are re-exported here.
///

pub mod prelude {
    pub use crate::{
        key::{EntityKey, KeyFactory, KeyFactorySource},
        model::{EntityType, Model, Property, PropertyType, ValueKind},
        row::{RowAccessor, ValueBuffer},
        value::Value,
    };
}

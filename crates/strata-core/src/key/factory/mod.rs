mod composite;
mod simple;
mod source;

#[cfg(test)]
mod tests;

use crate::{error::InternalError, key::EntityKey, model::Property, row::RowAccessor};
use derive_more::Display;
use std::{any::Any, fmt, sync::Arc};

// re-exports
pub use composite::CompositeKeyFactory;
pub use simple::SimpleKeyFactory;
pub use source::KeyFactorySource;

///
/// KeyFactoryKind
///
/// Variant of a resolved factory; `Simple` carries the non-nullable value
/// kind the factory is specialized on.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum KeyFactoryKind {
    #[display("simple<{_0}>")]
    Simple(crate::model::ValueKind),
    #[display("composite")]
    Composite,
}

///
/// KeyFactory
///
/// Stateless strategy bound to one key shape. Implementations hold no
/// per-call state and are shared across threads.
///

pub trait KeyFactory: Any + fmt::Debug + Send + Sync {
    /// Build the identity of one materialized row.
    fn create_key(&self, row: &dyn RowAccessor) -> Result<EntityKey, InternalError>;

    fn kind(&self) -> KeyFactoryKind;

    /// Key shape this factory was built for, in key order.
    fn properties(&self) -> &[Arc<Property>];
}

impl dyn KeyFactory {
    /// Downcast to a concrete factory type.
    #[must_use]
    pub fn downcast_ref<T: KeyFactory>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: KeyFactory>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

use super::*;
use crate::{
    error::ErrorClass,
    key::KeyError,
    model::{PropertyType, ValueKind},
    value::Float64,
};
use std::thread;

fn property(kind: ValueKind) -> Arc<Property> {
    Arc::new(Property::new("Id", PropertyType::required(kind)))
}

fn nullable_property(kind: ValueKind) -> Arc<Property> {
    Arc::new(Property::new("Id", PropertyType::nullable(kind)))
}

fn source() -> KeyFactorySource {
    KeyFactorySource::new()
}

#[test]
fn returns_simple_factory_for_single_property() {
    let factory = source()
        .get_key_factory(&[property(ValueKind::Int32)])
        .unwrap();

    assert!(factory.is::<SimpleKeyFactory<i32>>());
    assert_eq!(factory.kind(), KeyFactoryKind::Simple(ValueKind::Int32));
}

#[test]
fn returns_simple_factory_for_single_nullable_property() {
    let factory = source()
        .get_key_factory(&[nullable_property(ValueKind::Int32)])
        .unwrap();

    assert!(factory.is::<SimpleKeyFactory<i32>>());
}

#[test]
fn returns_simple_factory_for_single_reference_property() {
    let factory = source()
        .get_key_factory(&[property(ValueKind::Text)])
        .unwrap();

    assert!(factory.is::<SimpleKeyFactory<String>>());
}

#[test]
fn returns_simple_factory_for_every_non_structural_kind() {
    let source = source();

    for kind in ValueKind::ALL.into_iter().filter(|k| !k.is_structural()) {
        let factory = source.get_key_factory(&[property(kind)]).unwrap();
        assert_eq!(factory.kind(), KeyFactoryKind::Simple(kind), "{kind}");
    }
}

#[test]
fn returns_composite_factory_for_composite_key() {
    let factory = source()
        .get_key_factory(&[property(ValueKind::Int32), property(ValueKind::Int32)])
        .unwrap();

    assert!(factory.is::<CompositeKeyFactory>());
    assert_eq!(factory.properties().len(), 2);
}

#[test]
fn returns_composite_factory_for_single_structural_property() {
    let factory = source()
        .get_key_factory(&[property(ValueKind::Blob)])
        .unwrap();

    assert!(factory.is::<CompositeKeyFactory>());
    assert_eq!(factory.kind(), KeyFactoryKind::Composite);
}

#[test]
fn returns_different_factories_for_different_properties() {
    let source = source();
    let a = source.get_key_factory(&[property(ValueKind::Ulid)]).unwrap();
    let b = source.get_key_factory(&[property(ValueKind::Ulid)]).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(source.len(), 2);
}

#[test]
fn returns_different_nullable_factories_for_different_properties() {
    let source = source();
    let a = source
        .get_key_factory(&[nullable_property(ValueKind::Ulid)])
        .unwrap();
    let b = source
        .get_key_factory(&[nullable_property(ValueKind::Ulid)])
        .unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn returns_same_factory_for_same_property() {
    let source = source();
    let id = property(ValueKind::Ulid);

    let a = source.get_key_factory(&[Arc::clone(&id)]).unwrap();
    let b = source.get_key_factory(&[id]).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(source.len(), 1);
}

#[test]
fn returns_same_nullable_factory_for_same_property() {
    let source = source();
    let id = nullable_property(ValueKind::Ulid);

    let a = source.get_key_factory(&[Arc::clone(&id)]).unwrap();
    let b = source.get_key_factory(&[id]).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn property_order_is_part_of_the_shape() {
    let source = source();
    let a = property(ValueKind::Int32);
    let b = property(ValueKind::Text);

    let ab = source
        .get_key_factory(&[Arc::clone(&a), Arc::clone(&b)])
        .unwrap();
    let ba = source.get_key_factory(&[b, a]).unwrap();

    assert!(!Arc::ptr_eq(&ab, &ba));
}

#[test]
fn sources_do_not_share_entries() {
    let id = property(ValueKind::Int64);

    let a = source().get_key_factory(&[Arc::clone(&id)]).unwrap();
    let b = source().get_key_factory(&[id]).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn global_source_is_a_singleton() {
    let id = property(ValueKind::Int16);

    let a = KeyFactorySource::global()
        .get_key_factory(&[Arc::clone(&id)])
        .unwrap();
    let b = KeyFactorySource::global().get_key_factory(&[id]).unwrap();

    assert!(std::ptr::eq(KeyFactorySource::global(), KeyFactorySource::global()));
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn rejects_empty_shape() {
    let err = source().get_key_factory(&[]).unwrap_err();

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.key_error(), Some(&KeyError::EmptyShape));
}

#[test]
fn concurrent_first_requests_share_one_factory() {
    let source = Arc::new(source());
    let id = property(ValueKind::Int32);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let source = Arc::clone(&source);
            let id = Arc::clone(&id);
            thread::spawn(move || source.get_key_factory(&[id]).unwrap())
        })
        .collect();

    let factories: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for factory in &factories[1..] {
        assert!(Arc::ptr_eq(&factories[0], factory));
    }
    assert_eq!(source.len(), 1);
}

#[test]
fn simple_factory_exposes_typed_value() {
    let id = property(ValueKind::Float64);
    let factory = SimpleKeyFactory::<Float64>::new(Arc::clone(&id));
    let row: crate::row::ValueBuffer = [Float64::try_new(1.5).unwrap()].into_iter().collect();

    assert_eq!(factory.create_typed(&row).unwrap().get(), 1.5);
    assert!(Arc::ptr_eq(factory.property(), &id));
}

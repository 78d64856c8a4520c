use super::*;
use crate::error::{ErrorClass, ErrorOrigin};

fn blog() -> EntityType {
    EntityType::builder("Blog")
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .property("Url", PropertyType::nullable(ValueKind::Text))
        .primary_key(&["BlogId"])
        .build()
        .unwrap()
}

fn post() -> EntityType {
    EntityType::builder("Post")
        .property("PostId", PropertyType::required(ValueKind::Int32))
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .property("Title", PropertyType::required(ValueKind::Text))
        .primary_key(&["PostId"])
        .foreign_key(&["BlogId"], "Blog")
        .build()
        .unwrap()
}

#[test]
fn property_ids_are_unique_per_descriptor() {
    let a = Property::new("Id", PropertyType::required(ValueKind::Ulid));
    let b = Property::new("Id", PropertyType::required(ValueKind::Ulid));

    assert_ne!(a.id(), b.id());
    assert_eq!(a.property_type(), b.property_type());
}

#[test]
fn builder_assigns_ordinals_in_declaration_order() {
    let post = post();
    let ordinals: Vec<_> = post.properties().iter().map(|p| p.index()).collect();

    assert_eq!(ordinals, vec![0, 1, 2]);
    assert_eq!(post.property("Title").unwrap().index(), 2);
}

#[test]
fn key_properties_share_descriptors_with_entity() {
    let blog = blog();
    let key = blog.primary_key().unwrap();

    assert_eq!(key.properties()[0].id(), blog.property("BlogId").unwrap().id());
    assert_eq!(key.ordinal_of(blog.property("BlogId").unwrap()), Some(0));
    assert_eq!(key.ordinal_of(blog.property("Url").unwrap()), None);
    assert!(!key.is_composite());
}

#[test]
fn builder_rejects_unknown_key_property() {
    let err = EntityType::builder("Blog")
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .primary_key(&["Id"])
        .build()
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::NotFound);
    assert_eq!(err.origin, ErrorOrigin::Model);
}

#[test]
fn builder_rejects_duplicate_property() {
    let err = EntityType::builder("Blog")
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .property("BlogId", PropertyType::required(ValueKind::Int64))
        .build()
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::Conflict);
}

#[test]
fn builder_rejects_empty_key() {
    let err = EntityType::builder("Blog")
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .primary_key(&[])
        .build()
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn model_resolves_principal_keys() {
    let model = Model::new(vec![blog(), post()]).unwrap();
    let fk = &model.entity_type("Post").unwrap().foreign_keys()[0];
    let principal = model.principal_key(fk).unwrap();

    assert_eq!(principal.properties()[0].name(), "BlogId");
    assert_eq!(fk.principal_entity(), "Blog");
}

#[test]
fn model_rejects_unknown_principal() {
    let err = Model::new(vec![post()]).unwrap_err();

    assert_eq!(err.class, ErrorClass::NotFound);
    assert!(err.message.contains("unknown principal 'Blog'"));
}

#[test]
fn model_rejects_foreign_key_arity_mismatch() {
    let tag = EntityType::builder("Tag")
        .property("A", PropertyType::required(ValueKind::Int32))
        .property("B", PropertyType::required(ValueKind::Int32))
        .primary_key(&["A", "B"])
        .build()
        .unwrap();
    let link = EntityType::builder("Link")
        .property("Id", PropertyType::required(ValueKind::Int32))
        .property("TagA", PropertyType::required(ValueKind::Int32))
        .primary_key(&["Id"])
        .foreign_key(&["TagA"], "Tag")
        .build()
        .unwrap();

    let err = Model::new(vec![tag, link]).unwrap_err();
    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn model_rejects_duplicate_entities() {
    let err = Model::new(vec![blog(), blog()]).unwrap_err();

    assert_eq!(err.class, ErrorClass::Conflict);
}

#[test]
fn value_kind_labels_round_trip() {
    for kind in ValueKind::ALL {
        assert_eq!(ValueKind::from_label(kind.label()), Some(kind));
    }
    assert_eq!(ValueKind::from_label("DateTime"), Some(ValueKind::DateTime));
    assert_eq!(ValueKind::from_label("money"), None);
}

#[test]
fn only_blob_is_structural() {
    let structural: Vec<_> = ValueKind::ALL
        .into_iter()
        .filter(|k| k.is_structural())
        .collect();

    assert_eq!(structural, vec![ValueKind::Blob]);
}

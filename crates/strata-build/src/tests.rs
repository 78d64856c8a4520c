use super::*;
use strata_core::model::{PropertyType, ValueKind};

const CONNECTION: &str = "Server=(localdb)\\v11.0;Database=Blogging;Trusted_Connection=True";

fn blogging_model() -> Model {
    // declared out of type-name order on purpose
    let post = EntityType::builder("dbo.Post")
        .property("PostId", PropertyType::required(ValueKind::Int32))
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .property("Title", PropertyType::nullable(ValueKind::Text))
        .primary_key(&["PostId"])
        .foreign_key(&["BlogId"], "dbo.Blog")
        .build()
        .unwrap();
    let blog = EntityType::builder("dbo.Blog")
        .property("BlogId", PropertyType::required(ValueKind::Int32))
        .property("Url", PropertyType::nullable(ValueKind::Text))
        .primary_key(&["BlogId"])
        .build()
        .unwrap();
    let tag = EntityType::builder("dbo.PostTag")
        .property("TagName", PropertyType::required(ValueKind::Text))
        .property("PostId", PropertyType::required(ValueKind::Int32))
        .primary_key(&["PostId", "TagName"])
        .foreign_key(&["PostId"], "dbo.Post")
        .build()
        .unwrap();
    let audit = EntityType::builder("dbo.Audit")
        .property("Message", PropertyType::nullable(ValueKind::Text))
        .build()
        .unwrap();

    Model::new(vec![post, blog, tag, audit]).unwrap()
}

fn request(model: &Model) -> ScaffoldRequest<'_> {
    ScaffoldRequest::new(model, "blogging", "BloggingContext", CONNECTION).with_type_names([
        ("dbo.Blog", "Blog"),
        ("dbo.Post", "Post"),
        ("dbo.PostTag", "PostTag"),
        ("dbo.Audit", "Audit"),
    ])
}

fn generate(model: &Model) -> String {
    SqlServerContextGenerator.generate(&request(model)).unwrap()
}

fn rendered(tokens: &TokenStream) -> String {
    tokens.to_string()
}

#[test]
fn header_names_connection_string() {
    let model = blogging_model();
    let source = generate(&model);

    let mut lines = source.lines();
    assert_eq!(lines.next(), Some("//"));
    assert_eq!(
        lines.next(),
        Some(format!("// Generated using Connection String: {CONNECTION}").as_str())
    );
    assert_eq!(lines.next(), Some("//"));
    assert_eq!(lines.next(), Some(""));
}

#[test]
fn output_is_valid_rust() {
    let model = blogging_model();
    let source = generate(&model);

    let file = syn::parse_file(&source).unwrap();
    assert_eq!(file.items.len(), 1);
}

#[test]
fn uses_default_modules() {
    let model = blogging_model();
    let source = generate(&model);

    assert!(source.contains(&rendered(&quote!(use strata::context::*;))));
    assert!(source.contains(&rendered(&quote!(use strata::metadata::*;))));
}

#[test]
fn entity_sets_are_ordered_by_type_name() {
    let model = blogging_model();
    let source = generate(&model);

    let fields = [
        quote!(pub audit: EntitySet<Audit>,),
        quote!(pub blog: EntitySet<Blog>,),
        quote!(pub post: EntitySet<Post>,),
        quote!(pub post_tag: EntitySet<PostTag>,),
    ];
    let positions: Vec<usize> = fields
        .iter()
        .map(|f| source.find(&rendered(f)).unwrap())
        .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn on_configuring_uses_connection_string() {
    let model = blogging_model();
    let source = generate(&model);

    assert!(source.contains(&rendered(&quote!(options.use_sql_server(#CONNECTION);))));
}

#[test]
fn key_configuration_uses_key_order() {
    let model = blogging_model();
    let source = generate(&model);

    assert!(source.contains(&rendered(&quote!(entity.key(|e| e.blog_id);))));
    assert!(source.contains(&rendered(&quote!(entity.key(|e| (e.post_id, e.tag_name));))));
}

#[test]
fn keyless_entity_gets_no_key_configuration() {
    let model = blogging_model();
    let source = generate(&model);

    let audit = rendered(&quote!(model_builder.entity::<Audit>(|entity| {});));
    assert!(source.contains(&audit));
}

#[test]
fn foreign_keys_follow_key_configuration() {
    let model = blogging_model();
    let source = generate(&model);

    let post = rendered(&quote! {
        model_builder.entity::<Post>(|entity| {
            entity.key(|e| e.post_id);
            entity.foreign_key::<Blog>(|e| e.blog_id);
        });
    });
    assert!(source.contains(&post));
}

#[test]
fn sql_server_orders_by_key_ordinal() {
    let model = blogging_model();
    let tag = model.entity_type("dbo.PostTag").unwrap();
    let key = tag.primary_key().unwrap();
    let generator = SqlServerContextGenerator;

    let post_id = tag.property("PostId").unwrap();
    let tag_name = tag.property("TagName").unwrap();

    assert_eq!(generator.primary_key_property_order(key, post_id), 0);
    assert_eq!(generator.primary_key_property_order(key, tag_name), 1);
}

#[test]
fn missing_type_name_is_reported() {
    let model = blogging_model();
    let request = ScaffoldRequest::new(&model, "blogging", "BloggingContext", CONNECTION)
        .with_type_name("dbo.Blog", "Blog");

    let err = SqlServerContextGenerator.generate(&request).unwrap_err();

    assert!(matches!(err, CodegenError::MissingTypeName(_)));
}

#[test]
fn invalid_identifiers_are_rejected() {
    let model = blogging_model();

    let err = SqlServerContextGenerator
        .generate(&request(&model).with_type_name("dbo.Blog", "Blog Post"))
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::InvalidIdentifier { kind: "type", .. }
    ));

    let err = SqlServerContextGenerator
        .generate(&ScaffoldRequest::new(&model, "blog-posts", "BloggingContext", CONNECTION))
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::InvalidIdentifier { kind: "module", .. }
    ));
}

#[test]
fn duplicate_type_names_are_rejected() {
    let model = blogging_model();
    let request = request(&model).with_type_name("dbo.Audit", "Blog");

    let err = SqlServerContextGenerator.generate(&request).unwrap_err();

    assert!(matches!(err, CodegenError::DuplicateTypeName { .. }));
}

#[test]
fn key_lambda_shapes() {
    let id = Property::new("Id", PropertyType::required(ValueKind::Ulid));
    let code = Property::new("CountryCode", PropertyType::required(ValueKind::Text));

    assert_eq!(
        key_lambda([&id]).unwrap().to_string(),
        quote!(|e| e.id).to_string()
    );
    assert_eq!(
        key_lambda([&id, &code]).unwrap().to_string(),
        quote!(|e| (e.id, e.country_code)).to_string()
    );
}

#[test]
fn keyword_names_become_raw_identifiers() {
    let item = EntityType::builder("dbo.Item")
        .property("Type", PropertyType::required(ValueKind::Int32))
        .property("Match", PropertyType::nullable(ValueKind::Text))
        .primary_key(&["Type"])
        .build()
        .unwrap();
    let model = Model::new(vec![item]).unwrap();
    let request = ScaffoldRequest::new(&model, "mod", "Context", CONNECTION)
        .with_type_name("dbo.Item", "Match");

    let source = SqlServerContextGenerator.generate(&request).unwrap();

    syn::parse_file(&source).unwrap();
    assert!(source.contains(&rendered(&quote!(pub mod r#mod))));
    assert!(source.contains(&rendered(&quote!(pub r#match: EntitySet<Match>,))));
    assert!(source.contains(&rendered(&quote!(entity.key(|e| e.r#type);))));
}

#[test]
fn reserved_path_keywords_are_rejected() {
    assert!(matches!(
        field_ident("self"),
        Err(CodegenError::InvalidIdentifier { kind: "field", .. })
    ));
    assert_eq!(field_ident("Loop").unwrap().to_string(), "r#loop");
    assert_eq!(field_ident("OrderId").unwrap().to_string(), "order_id");
}

#[test]
fn line_breaks_in_connection_string_stay_commented() {
    let model = blogging_model();
    let connection = "Server=.\npub fn injected() {}\r\nDatabase=Blogging";
    let scaffold = ScaffoldRequest::new(&model, "blogging", "BloggingContext", connection)
        .with_type_names(request(&model).type_names);

    let source = SqlServerContextGenerator.generate(&scaffold).unwrap();

    let file = syn::parse_file(&source).unwrap();
    assert_eq!(file.items.len(), 1);
    assert!(source.lines().any(|l| l == "// pub fn injected() {}"));
    assert!(!source.lines().any(|l| l.starts_with("pub fn")));
}

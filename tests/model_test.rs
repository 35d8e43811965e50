use burrow::model::document::{Document, DocumentItem, PrimaryDataItem};
use burrow::model::error::Error;
use burrow::model::resource::*;

#[test]
fn error_from_json_string() {
    let _ = env_logger::try_init();

    let serialized = r#"
        {"id":"1", "links" : {}, "status" : "unknown", "code" : "code1", "title" : "error-title", "detail": "error-detail"}
        "#;

    let result: Result<Error, serde_json::Error> = serde_json::from_str(serialized);

    match result {
        Ok(error) => match error.id {
            Some(id) => assert_eq!(id, "1"),
            None => unreachable!(),
        },
        Err(err) => unreachable!("get err: {:?}", err),
    }
}

#[test]
fn single_resource_from_json_string() {
    let _ = env_logger::try_init();

    let serialized =
        r#"{ "id" :"1", "type" : "post", "attributes" : {}, "relationships" : {}, "links" : {} }"#;
    let data: Result<Resource, serde_json::Error> = serde_json::from_str(serialized);
    if let Err(err) = data {
        unreachable!("err: {:?}", err);
    }
}

#[test]
fn resource_without_type_is_rejected() {
    let _ = env_logger::try_init();

    let serialized = r#"{ "id" :"1", "attributes" : { "title": "x" } }"#;
    let data: Result<Resource, serde_json::Error> = serde_json::from_str(serialized);
    assert!(data.is_err());
}

#[test]
fn reserved_attribute_fields_are_stripped() {
    let _ = env_logger::try_init();

    let mut map = std::collections::HashMap::new();
    map.insert("id".to_string(), serde_json::json!("1"));
    map.insert("type".to_string(), serde_json::json!("posts"));
    map.insert("title".to_string(), serde_json::json!("x"));
    let attributes: Attributes = map.into();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("title"), Some(&serde_json::json!("x")));
}

#[test]
fn no_data_document_from_json_string() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : null
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    assert_eq!(document.item, DocumentItem::PrimaryData(None));

    let round_tripped = serde_json::to_value(&document).unwrap();
    assert_eq!(round_tripped, serde_json::json!({ "data": null }));
}

#[test]
fn single_data_document_from_json_string() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : {
                "id" :"1", "type" : "post", "attributes" : {}, "relationships" : {}
            },
            "meta" : { "total" : 10 }
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    let (resource, included) = document.clone().into_single().unwrap();
    assert_eq!(resource.ty, "post");
    assert_eq!(resource.id, "1");
    assert!(included.is_empty());
    assert_eq!(document.meta.get("total"), Some(&serde_json::json!(10)));
}

#[test]
fn included_preserves_document_order() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : { "id" :"1", "type" : "articles" },
            "included" : [
                { "id" :"9", "type" : "people" },
                { "id" :"5", "type" : "comments" },
                { "id" :"2", "type" : "people" }
            ]
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    let (_, included) = document.into_single().unwrap();
    let order: Vec<(&str, &str)> =
        included.iter().map(|res| (res.ty.as_str(), res.id.as_str())).collect();
    assert_eq!(order, vec![("people", "9"), ("comments", "5"), ("people", "2")]);
}

#[test]
fn multiple_data_document_from_json_string() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : [
                { "id" :"1", "type" : "post" },
                { "id" :"2", "type" : "post" }
            ]
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    let (resources, _) = document.into_multiple().unwrap();
    assert_eq!(resources.len(), 2);
}

#[test]
fn null_data_with_included_is_accepted() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : null,
            "included" : [ { "id" :"9", "type" : "people" } ]
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    assert_eq!(document.item, DocumentItem::PrimaryData(None));
}

#[test]
fn null_data_with_errors_is_rejected() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : null,
            "errors" : [ { "status" : "500" } ]
        }"#;
    let document: Result<Document, serde_json::Error> = serde_json::from_str(serialized);
    assert!(document.is_err());
}

#[test]
fn included_without_data_is_rejected() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "included" : [ { "id" :"1", "type" : "post" } ]
        }"#;
    let document: Result<Document, serde_json::Error> = serde_json::from_str(serialized);
    assert!(document.is_err());
}

#[test]
fn data_and_errors_cannot_coexist() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : { "id" :"1", "type" : "post" },
            "errors" : [ { "status" : "500" } ]
        }"#;
    let document: Result<Document, serde_json::Error> = serde_json::from_str(serialized);
    assert!(document.is_err());
}

#[test]
fn error_document_from_json_string() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "errors" : [ { "status" : "404", "title" : "Not Found" } ]
        }"#;
    let document: Document = serde_json::from_str(serialized).unwrap();
    match document.item {
        DocumentItem::Errors(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].status.as_deref(), Some("404"));
        },
        _ => unreachable!("expected an error document"),
    }
}

#[test]
fn relationship_linkage_shapes() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "id" :"1", "type" : "articles",
            "relationships" : {
                "author" : { "data" : { "type" : "people", "id" : "9" } },
                "reviewer" : { "data" : null },
                "comments" : { "data" : [
                    { "type" : "comments", "id" : "5" },
                    { "type" : "comments", "id" : "12" }
                ] }
            }
        }"#;
    let resource: Resource = serde_json::from_str(serialized).unwrap();
    assert_eq!(
        resource.relationships.get("author").unwrap().data,
        IdentifierData::Single(Some(ResourceIdentifier { ty: "people".into(), id: "9".into() }))
    );
    assert_eq!(resource.relationships.get("reviewer").unwrap().data, IdentifierData::Single(None));
    assert_eq!(resource.relationships.get("comments").unwrap().data.data().len(), 2);
}

#[test]
fn document_constructors_round_trip() {
    let _ = env_logger::try_init();
    let resource = Resource { ty: "post".into(), id: "1".into(), ..Default::default() };
    let document = Document::single_resource(resource, vec![]);
    let value = serde_json::to_value(&document).unwrap();
    let parsed: Document = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, document);

    let null_document = Document::null(Default::default(), Default::default());
    assert_eq!(
        serde_json::to_value(&null_document).unwrap(),
        serde_json::json!({ "data": null })
    );

    let multiple = Document::multiple_resources(vec![], vec![]);
    match serde_json::from_value::<Document>(serde_json::to_value(&multiple).unwrap())
        .unwrap()
        .item
    {
        DocumentItem::PrimaryData(Some((PrimaryDataItem::Multiple(reses), _))) => {
            assert!(reses.is_empty())
        },
        item => unreachable!("unexpected item: {:?}", item),
    }
}

#[test]
fn duplicate_top_level_member_is_rejected() {
    let _ = env_logger::try_init();
    let serialized = r#"{
            "data" : null,
            "data" : { "id" :"1", "type" : "post" }
        }"#;
    let document: Result<Document, serde_json::Error> = serde_json::from_str(serialized);
    assert!(document.is_err());
}

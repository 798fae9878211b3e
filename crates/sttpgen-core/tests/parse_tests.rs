use sttpgen_core::parse;
use sttpgen_core::parse::operation::{HttpMethod, ParameterLocation};
use sttpgen_core::parse::schema::Schema;
use sttpgen_core::parse::security::SecurityScheme;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

#[test]
fn parse_petstore_yaml() {
    let model = parse::from_yaml(PETSTORE).expect("should parse petstore.yaml");
    assert_eq!(model.info.title, "Petstore");
    assert_eq!(model.operations.len(), 5);
    assert_eq!(model.schemas.len(), 4);
    assert_eq!(model.security, vec!["api_key".to_string()]);

    let delete = model
        .operations
        .iter()
        .find(|op| op.operation_id.as_deref() == Some("deletePet"))
        .expect("should have deletePet");
    assert_eq!(delete.method, HttpMethod::Delete);
    assert_eq!(delete.parameters[0].location, ParameterLocation::Path);
    assert!(delete.parameters[0].required);

    let health = model.operations.last().unwrap();
    assert!(health.operation_id.is_none());
    assert!(health.tags.is_empty());
    assert_eq!(health.security.as_deref(), Some(&[][..]));

    let create = &model.operations[1];
    let body = create.request_body.as_ref().unwrap();
    assert_eq!(body.content_type, "application/json");
    assert_eq!(
        body.schema,
        Schema::Ref {
            name: "Pet".to_string()
        }
    );
}

#[test]
fn parse_security_schemes() {
    let model = parse::from_yaml(PETSTORE).unwrap();

    match &model.security_schemes["petstore_auth"] {
        SecurityScheme::OAuth2 { scopes } => {
            assert_eq!(scopes.len(), 2);
            assert_eq!(scopes["read:pets"], "read pets");
        }
        other => panic!("expected oauth2, got {other:?}"),
    }
    assert!(!model.security_schemes["api_key"].is_oauth());
}

#[test]
fn parse_round_trips_through_json() {
    let model = parse::from_yaml(PETSTORE).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let reparsed = parse::from_json(&json).unwrap();
    assert_eq!(model, reparsed);
}

#[test]
fn parse_rejects_unknown_schema_type() {
    let yaml = "info: { title: T, version: '1' }\nschemas:\n  Bad: { type: tuple }\n";
    assert!(parse::from_yaml(yaml).is_err());
}

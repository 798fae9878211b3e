use sttpgen_core::config::GeneratorConfig;
use sttpgen_core::transform::identifier::{IdentifierFormatter, api_name, type_name};
use sttpgen_core::transform::names::NameRegistry;
use sttpgen_core::transform::path_template::PathTemplate;

#[test]
fn test_format_is_deterministic() {
    let f = IdentifierFormatter::default();
    for name in ["pet_id", "X-Rate-Limit", "class", "order items", "9lives"] {
        assert_eq!(f.format(name, false), f.format(name, false));
        assert_eq!(f.format(name, true), f.format(name, true));
    }
}

#[test]
fn test_format_never_returns_bare_reserved_word() {
    let f = IdentifierFormatter::default();
    for word in ["type", "Object", "VAL", "match", "yield"] {
        let formatted = f.format(word, false);
        assert!(formatted.starts_with('`'), "{word} -> {formatted}");
    }
}

#[test]
fn test_parameter_mapping_overrides_formatting() {
    let config = GeneratorConfig {
        parameter_name_mappings: [("X-Request-ID".to_string(), "requestId".to_string())]
            .into_iter()
            .collect(),
        ..GeneratorConfig::default()
    };
    let f = IdentifierFormatter::new(&config);
    assert_eq!(f.param_name("X-Request-ID"), "requestId");
    assert_eq!(f.param_name("X-Other"), "xOther");
}

#[test]
fn test_model_type_names() {
    assert_eq!(type_name("pet_status"), "PetStatus");
    assert_eq!(type_name("Object"), "ModelObject");
    assert_eq!(type_name("200Response"), "Model200Response");
}

#[test]
fn test_api_names_are_unique_per_run() {
    let mut names = NameRegistry::new();
    let resolved: Vec<String> = ["Pets", "pets", "PETS"]
        .iter()
        .map(|raw| names.resolve(raw, |r| api_name(r, "Api")))
        .collect();
    assert_eq!(resolved, vec!["PetsApi", "Pets0Api", "Pets1Api"]);
    assert_eq!(names.get("pets"), Some("Pets0Api"));

    // A fresh run starts from an empty registry
    let mut other = NameRegistry::new();
    assert_eq!(other.resolve("pets", |r| api_name(r, "Api")), "PetsApi");
}

#[test]
fn test_path_template_substitution() {
    let template =
        PathTemplate::compile("/users/{user-id}/orders/{orderId}", &IdentifierFormatter::default());
    assert_eq!(template.render(), "/users/${userId}/orders/${orderId}");

    let expanded = template.substitute(|ident| match ident {
        "userId" => "42".to_string(),
        _ => "7".to_string(),
    });
    assert_eq!(expanded, "/users/42/orders/7");
}

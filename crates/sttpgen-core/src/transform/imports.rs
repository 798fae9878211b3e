use std::collections::BTreeSet;

use crate::ir::ResolvedModel;

use super::type_mapper::JSON_VALUE_TYPE;

/// Codec support for the circe JSON AST, imported wherever `io.circe.Json`
/// would be.
pub const JSON_AST_CODEC_IMPORT: &str =
    "com.github.plokhotnyuk.jsoniter_scala.circe.JsoniterScalaCodec._";

const WILDCARD: &str = "._";

/// Names of the models that are enumerations. Built once from the full model
/// set and read-only afterwards.
#[derive(Debug, Clone)]
pub struct EnumRegistry {
    model_package: String,
    enums: BTreeSet<String>,
}

impl EnumRegistry {
    pub fn from_models(models: &[ResolvedModel], model_package: &str) -> Self {
        Self {
            model_package: model_package.to_string(),
            enums: models
                .iter()
                .filter(|m| m.is_enum())
                .map(|m| m.class_name.clone())
                .collect(),
        }
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.enums.contains(class_name)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    /// The model class an import refers to, if it lies in the model package.
    fn model_class<'a>(&self, import: &'a str) -> Option<&'a str> {
        let class = import
            .strip_prefix(self.model_package.as_str())?
            .strip_prefix('.')?;
        Some(class.strip_suffix(WILDCARD).unwrap_or(class))
    }
}

/// Where the rewritten imports end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportScope {
    /// A model file, which shares the model package.
    Model,
    /// An API file, which lives in its own package.
    Api,
}

/// Rewrite an import list:
///
/// 1. `io.circe.Json` becomes a single import of the circe codec support.
/// 2. Imports of enum models gain a `._` import of their constructors next to
///    the plain import. Other model imports are dropped from model files,
///    where they would be same-package imports, and kept in API files.
/// 3. Everything else is kept.
///
/// The output has no duplicates, so rewriting it again changes nothing.
pub fn rewrite_imports(imports: &[String], scope: ImportScope, enums: &EnumRegistry) -> Vec<String> {
    let mut rewritten = Vec::with_capacity(imports.len());

    for import in imports {
        if import == JSON_VALUE_TYPE {
            push_unique(&mut rewritten, JSON_AST_CODEC_IMPORT.to_string());
            continue;
        }

        match enums.model_class(import) {
            Some(class) if enums.contains(class) => {
                let plain = format!("{}.{class}", enums.model_package);
                push_unique(&mut rewritten, format!("{plain}{WILDCARD}"));
                push_unique(&mut rewritten, plain);
            }
            Some(_) if scope == ImportScope::Model => {}
            _ => push_unique(&mut rewritten, import.clone()),
        }
    }

    rewritten
}

fn push_unique(imports: &mut Vec<String>, import: String) {
    if !imports.contains(&import) {
        imports.push(import);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ModelKind;

    const PKG: &str = "com.acme.model";

    fn model(class_name: &str, kind: ModelKind) -> ResolvedModel {
        ResolvedModel {
            raw_name: class_name.to_string(),
            class_name: class_name.to_string(),
            import_path: format!("{PKG}.{class_name}"),
            kind,
            imports: vec![],
        }
    }

    fn registry() -> EnumRegistry {
        let models = vec![
            model("Color", ModelKind::Enum { entries: vec![] }),
            model("Pet", ModelKind::Object { properties: vec![] }),
        ];
        EnumRegistry::from_models(&models, PKG)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_registry_contents() {
        let enums = registry();
        assert_eq!(enums.len(), 1);
        assert!(enums.contains("Color"));
        assert!(!enums.contains("Pet"));
    }

    #[test]
    fn test_model_scope() {
        let imports = strings(&[
            "com.acme.model.Color",
            "com.acme.model.Pet",
            "java.time.LocalDate",
        ]);
        assert_eq!(
            rewrite_imports(&imports, ImportScope::Model, &registry()),
            strings(&[
                "com.acme.model.Color._",
                "com.acme.model.Color",
                "java.time.LocalDate",
            ])
        );
    }

    #[test]
    fn test_api_scope_keeps_models() {
        let imports = strings(&["com.acme.model.Pet", "com.acme.model.Color"]);
        assert_eq!(
            rewrite_imports(&imports, ImportScope::Api, &registry()),
            strings(&[
                "com.acme.model.Pet",
                "com.acme.model.Color._",
                "com.acme.model.Color",
            ])
        );
    }

    #[test]
    fn test_json_value_replaced_once() {
        let imports = strings(&["io.circe.Json", "java.util.UUID", "io.circe.Json"]);
        assert_eq!(
            rewrite_imports(&imports, ImportScope::Model, &registry()),
            strings(&[JSON_AST_CODEC_IMPORT, "java.util.UUID"])
        );
    }

    #[test]
    fn test_rewrite_is_stable() {
        let enums = registry();
        let imports = strings(&[
            "io.circe.Json",
            "com.acme.model.Color",
            "com.acme.model.Pet",
            "com.acme.modelling.Other",
            "io.circe.Json",
        ]);
        for scope in [ImportScope::Model, ImportScope::Api] {
            let once = rewrite_imports(&imports, scope, &enums);
            let twice = rewrite_imports(&once, scope, &enums);
            assert_eq!(once, twice, "{scope:?}");
        }
    }

    #[test]
    fn test_prefix_must_end_at_package_boundary() {
        let imports = strings(&["com.acme.modelling.Color"]);
        assert_eq!(
            rewrite_imports(&imports, ImportScope::Model, &registry()),
            imports
        );
    }
}

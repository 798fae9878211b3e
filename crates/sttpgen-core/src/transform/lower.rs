use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::config::GeneratorConfig;
use crate::error::{Issue, LowerError};
use crate::ir::*;
use crate::parse::operation::{Operation, ParameterLocation, Response};
use crate::parse::schema::Schema;
use crate::parse::spec::ApiModel;

use super::codecs::{CodecRegistry, scan_status_codes};
use super::defaults::default_for;
use super::identifier::{IdentifierFormatter, api_name, route_to_name, type_name};
use super::imports::{EnumRegistry, ImportScope, rewrite_imports};
use super::names::NameRegistry;
use super::path_template::{PathTemplate, reconcile_path_params};
use super::security::auth_requirement;
use super::type_mapper::TypeMapper;

/// Group name for operations without tags.
pub const DEFAULT_GROUP: &str = "default";

/// Lower an abstract API model into the resolved Scala client model.
///
/// Only an invalid configuration fails the run; problems with individual
/// operations or models are logged, recorded in [`ResolvedSpec::issues`] and
/// skipped.
pub fn lower(model: &ApiModel, config: &GeneratorConfig) -> Result<ResolvedSpec, LowerError> {
    let packages = config.packages()?;
    let formatter = IdentifierFormatter::new(config);
    let mut issues = Vec::new();

    // Phase 1: Class names for every named schema
    let class_names: IndexMap<String, String> = model
        .schemas
        .keys()
        .map(|name| (name.clone(), type_name(name)))
        .collect();
    let types = TypeMapper::new(&class_names, &packages.model);

    // Phase 2: Models, then the enum registry they define, then their imports
    let mut models: Vec<ResolvedModel> = model
        .schemas
        .iter()
        .map(|(name, schema)| resolve_model(name, schema, &types, &formatter, &mut issues))
        .collect();
    let enums = EnumRegistry::from_models(&models, &packages.model);
    if !enums.is_empty() {
        log::debug!("{} of {} models are enumerations", enums.len(), models.len());
    }
    for m in &mut models {
        m.imports = rewrite_imports(&m.imports, ImportScope::Model, &enums);
    }

    // Phase 3: Operations
    let ctx = OperationContext {
        model,
        config,
        formatter: &formatter,
        types,
        enums: &enums,
    };
    let operations: Vec<ResolvedOperation> = model
        .operations
        .iter()
        .map(|op| ctx.build_operation(op, &mut issues))
        .collect();

    // Phase 4: Group by tag into APIs; track codecs and status codes per API
    let mut names = NameRegistry::new();
    let mut codecs = CodecRegistry::new();
    let mut non_standard_status_codes = BTreeSet::new();
    let mut apis = Vec::new();

    for (tag, indices) in group_by_tag(&model.operations) {
        let class_name = names.resolve(&tag, |raw| api_name(raw, &config.api_name_suffix));
        let api_operations: Vec<ResolvedOperation> =
            indices.iter().map(|&i| operations[i].clone()).collect();

        for op in &api_operations {
            codecs.observe(op, &formatter);
        }

        let mut api_codes = BTreeSet::new();
        if config.register_non_standard_status_codes {
            let scan = scan_status_codes(&api_operations);
            issues.extend(scan.issues);
            api_codes = scan.non_standard;
            non_standard_status_codes.extend(api_codes.iter().copied());
        }

        let api_imports: Vec<String> = api_operations
            .iter()
            .flat_map(|op| op.imports.iter().cloned())
            .collect();

        apis.push(ResolvedApi {
            raw_name: tag,
            class_name,
            imports: rewrite_imports(&api_imports, ImportScope::Api, &enums),
            operations: api_operations,
            non_standard_status_codes: api_codes,
        });
    }

    // Phase 5: Document-level authentication methods
    let declared = model
        .security_schemes
        .iter()
        .map(|(name, scheme)| ResolvedSecurity {
            name: name.clone(),
            scheme: scheme.clone(),
        })
        .collect();
    let auth_methods = auth_requirement("document", declared, config.remove_oauth_securities);

    // An operation in several groups, or a schema referenced twice, reports once
    let mut unique: Vec<Issue> = Vec::with_capacity(issues.len());
    for issue in issues {
        if !unique.contains(&issue) {
            issue.log();
            unique.push(issue);
        }
    }
    let issues = unique;
    log::debug!(
        "lowered {} operations into {} APIs, {} models, {} codecs",
        operations.len(),
        apis.len(),
        models.len(),
        codecs.entries().len()
    );

    Ok(ResolvedSpec {
        info: ResolvedInfo {
            title: model.info.title.clone(),
            version: model.info.version.clone(),
            description: model.info.description.clone(),
        },
        settings: Settings {
            packages,
            separate_error_channel: config.separate_error_channel,
            sttp_client_version: config.sttp_client_version.clone(),
            jsoniter_version: config.jsoniter_version.clone(),
            group_id: config.group_id.clone(),
            artifact_id: config.artifact_id.clone(),
            artifact_version: config.artifact_version.clone(),
        },
        api_names: names.mappings().clone(),
        apis,
        models,
        codecs: codecs.into_entries(),
        non_standard_status_codes,
        auth_methods,
        issues,
    })
}

/// Operation indices per tag, in first-seen order. An operation with several
/// tags appears in each of their groups.
fn group_by_tag(operations: &[Operation]) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, op) in operations.iter().enumerate() {
        if op.tags.is_empty() {
            groups.entry(DEFAULT_GROUP.to_string()).or_default().push(i);
        } else {
            for tag in &op.tags {
                let indices = groups.entry(tag.clone()).or_default();
                if !indices.contains(&i) {
                    indices.push(i);
                }
            }
        }
    }
    groups
}

fn resolve_model(
    raw_name: &str,
    schema: &Schema,
    types: &TypeMapper<'_>,
    formatter: &IdentifierFormatter,
    issues: &mut Vec<Issue>,
) -> ResolvedModel {
    let class_name = types.class_name(raw_name);
    let mut imports = Vec::new();

    let kind = match schema {
        Schema::Object {
            properties,
            required,
        } => ModelKind::Object {
            properties: properties
                .iter()
                .map(|(name, prop)| {
                    types.collect_imports(prop, &class_name, &mut imports, issues);
                    resolve_property(name, prop, required.contains(name), types, formatter)
                })
                .collect(),
        },
        Schema::Enum { values } => ModelKind::Enum {
            entries: enum_entries(values, formatter),
        },
        other => {
            types.collect_imports(other, &class_name, &mut imports, issues);
            ModelKind::Alias {
                data_type: types.scala_type(other),
            }
        }
    };

    ResolvedModel {
        raw_name: raw_name.to_string(),
        import_path: types.import_path(&class_name),
        class_name,
        kind,
        imports,
    }
}

fn resolve_property(
    base_name: &str,
    schema: &Schema,
    required: bool,
    types: &TypeMapper<'_>,
    formatter: &IdentifierFormatter,
) -> ResolvedProperty {
    let data_type = types.scala_type(schema);

    // Inline enums, possibly nested in containers, are named after the property
    let (enum_name, enum_entries, datatype_with_enum) = match schema.innermost() {
        Schema::Enum { values } => {
            let enum_name = formatter.enum_name(base_name);
            let with_enum = types.scala_type_with_enum(schema, &enum_name);
            (Some(enum_name), enum_entries(values, formatter), with_enum)
        }
        _ => (None, Vec::new(), data_type.clone()),
    };

    ResolvedProperty {
        base_name: base_name.to_string(),
        name: formatter.format(base_name, false),
        default_value: default_for(schema, required, types).map(|d| d.to_string()),
        data_type,
        datatype_with_enum,
        required,
        enum_name,
        enum_entries,
    }
}

fn enum_entries(values: &[String], formatter: &IdentifierFormatter) -> Vec<EnumEntry> {
    values
        .iter()
        .map(|value| EnumEntry {
            name: formatter.enum_entry_name(value),
            value: value.clone(),
        })
        .collect()
}

/// Everything an operation needs from the run once models are resolved.
struct OperationContext<'a> {
    model: &'a ApiModel,
    config: &'a GeneratorConfig,
    formatter: &'a IdentifierFormatter,
    types: TypeMapper<'a>,
    enums: &'a EnumRegistry,
}

impl OperationContext<'_> {
    fn build_operation(&self, op: &Operation, issues: &mut Vec<Issue>) -> ResolvedOperation {
        let operation_id = op
            .operation_id
            .clone()
            .unwrap_or_else(|| route_to_name(op.method.as_str(), &op.path));
        let mut imports = Vec::new();

        let mut all_params = Vec::new();
        let mut path_params = Vec::new();
        let mut query_params = Vec::new();
        let mut header_params = Vec::new();

        // Parameters without a schema are sent as plain strings
        let untyped = Schema::String;
        for param in &op.parameters {
            let schema = param.schema.as_ref().unwrap_or(&untyped);
            self.types
                .collect_imports(schema, &operation_id, &mut imports, issues);

            let location = match param.location {
                ParameterLocation::Path => ParamLocation::Path,
                ParameterLocation::Query => ParamLocation::Query,
                ParameterLocation::Header => ParamLocation::Header,
                ParameterLocation::Cookie => ParamLocation::Cookie,
            };
            let resolved = ResolvedParameter {
                base_name: param.name.clone(),
                param_name: self.formatter.param_name(&param.name),
                location,
                data_type: self.types.scala_type(schema),
                required: param.required || location == ParamLocation::Path,
                description: param.description.clone(),
                synthesized: false,
            };

            match location {
                ParamLocation::Path => path_params.push(resolved.clone()),
                ParamLocation::Query => query_params.push(resolved.clone()),
                ParamLocation::Header => header_params.push(resolved.clone()),
                ParamLocation::Cookie | ParamLocation::Body => {
                    log::debug!("{operation_id}: cookie parameter {} is not sent", param.name);
                }
            }
            all_params.push(resolved);
        }

        let template = PathTemplate::compile(&op.path, self.formatter);
        let path_param_names = template.param_names();
        reconcile_path_params(
            &path_param_names,
            self.formatter,
            &mut path_params,
            &mut all_params,
        );

        let body_param = op.request_body.as_ref().map(|body| {
            self.types
                .collect_imports(&body.schema, &operation_id, &mut imports, issues);
            let base_name = match &body.schema {
                Schema::Ref { name } => name.clone(),
                _ => "body".to_string(),
            };
            ResolvedParameter {
                param_name: self.formatter.param_name(&base_name),
                base_name,
                location: ParamLocation::Body,
                data_type: self.types.scala_type(&body.schema),
                required: body.required,
                description: None,
                synthesized: false,
            }
        });
        if let Some(ref body) = body_param {
            all_params.push(body.clone());
        }

        let responses: Vec<ResolvedResponse> = op
            .responses
            .iter()
            .map(|response| {
                if let Some(ref schema) = response.schema {
                    self.types
                        .collect_imports(schema, &operation_id, &mut imports, issues);
                }
                ResolvedResponse {
                    code: response.code.clone(),
                    data_type: response.schema.as_ref().map(|s| self.types.scala_type(s)),
                    description: response.description.clone(),
                }
            })
            .collect();
        let return_type = success_response(&op.responses)
            .and_then(|response| response.schema.as_ref())
            .map(|schema| self.types.scala_type(schema));

        let auth = auth_requirement(
            &operation_id,
            self.declared_securities(op, &operation_id),
            self.config.remove_oauth_securities,
        );

        ResolvedOperation {
            nickname: self.formatter.format(&operation_id, false),
            method: op.method,
            raw_path: op.path.clone(),
            path: template.render(),
            path_param_names,
            all_params,
            path_params,
            query_params,
            header_params,
            body_param,
            return_type,
            responses,
            auth,
            imports: rewrite_imports(&imports, ImportScope::Api, self.enums),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated,
            operation_id,
        }
    }

    /// The operation's own scheme list, else the document default. Unknown
    /// scheme names are dropped.
    fn declared_securities(&self, op: &Operation, operation_id: &str) -> Vec<ResolvedSecurity> {
        op.security
            .as_ref()
            .unwrap_or(&self.model.security)
            .iter()
            .filter_map(|name| match self.model.security_schemes.get(name) {
                Some(scheme) => Some(ResolvedSecurity {
                    name: name.clone(),
                    scheme: scheme.clone(),
                }),
                None => {
                    log::warn!("{operation_id}: unknown security scheme {name}");
                    None
                }
            })
            .collect()
    }
}

/// The response that defines the return type: the first 2xx, else `default`.
fn success_response(responses: &[Response]) -> Option<&Response> {
    responses
        .iter()
        .find(|r| r.code.starts_with('2'))
        .or_else(|| responses.iter().find(|r| r.code == "default"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::operation::HttpMethod;

    fn op(path: &str, tags: &[&str]) -> Operation {
        Operation {
            operation_id: None,
            path: path.to_string(),
            method: HttpMethod::Get,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: None,
            description: None,
            deprecated: false,
            parameters: vec![],
            request_body: None,
            responses: vec![],
            security: None,
        }
    }

    #[test]
    fn test_group_by_tag_keeps_first_seen_order() {
        let ops = vec![
            op("/b", &["store"]),
            op("/a", &[]),
            op("/c", &["pet", "store"]),
        ];
        let groups = group_by_tag(&ops);
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["store", "default", "pet"]);
        assert_eq!(groups["store"], vec![0, 2]);
        assert_eq!(groups["default"], vec![1]);
    }

    #[test]
    fn test_success_response_prefers_2xx() {
        let response = |code: &str| Response {
            code: code.to_string(),
            schema: None,
            description: None,
        };
        let responses = vec![response("default"), response("404"), response("201")];
        assert_eq!(success_response(&responses).unwrap().code, "201");
        assert_eq!(
            success_response(&responses[..2]).unwrap().code,
            "default"
        );
        assert!(success_response(&responses[1..2]).is_none());
    }
}

//! Exception hierarchy and error-code enums from the error responses of all
//! operations.

use std::collections::BTreeMap;

use serde::Serialize;

use super::context::{BaseContext, EnumContext, EnumFileContext, EnumValueContext};
use super::{artifact_dir, namespace, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::to_upper_camel_case;
use crate::openapi::{SchemaNode, SchemaRegistry};
use crate::templates::ArtifactKind;
use crate::Result;

const ERROR_CODE_PROPERTY: &str = "api_error_code";
const ERROR_TYPE_PROPERTY: &str = "type";
const BASE_EXCEPTION: &str = "ApiException";
const ERROR_TYPE_ENUM: &str = "ErrorType";

/// Reason phrase of an HTTP status, `Http<status>` when unknown
pub fn reason_phrase(status: u16) -> String {
    let phrase = match status {
        400 => "BadRequest",
        401 => "Unauthorized",
        402 => "PaymentRequired",
        403 => "Forbidden",
        404 => "NotFound",
        405 => "MethodNotAllowed",
        409 => "Conflict",
        422 => "UnprocessableEntity",
        429 => "TooManyRequests",
        500 => "InternalServerError",
        502 => "BadGateway",
        503 => "ServiceUnavailable",
        504 => "GatewayTimeout",
        _ => return format!("Http{}", status),
    };
    phrase.to_string()
}

/// Error codes and error types merged over every operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorCatalog {
    /// Values of `type`, first-seen order
    pub error_types: Vec<String>,
    /// Values of `api_error_code` per status code
    pub error_codes: BTreeMap<u16, Vec<String>>,
}

impl ErrorCatalog {
    pub fn collect<'s>(
        registry: &SchemaRegistry,
        responses: impl IntoIterator<Item = (u16, &'s SchemaNode)>,
    ) -> Self {
        let mut catalog = Self::default();
        for (status, schema) in responses {
            let schema = registry.resolve(schema);
            if let Some(codes) = enum_property(registry, schema, ERROR_CODE_PROPERTY) {
                merge(catalog.error_codes.entry(status).or_default(), codes);
            }
            if let Some(types) = enum_property(registry, schema, ERROR_TYPE_PROPERTY) {
                merge(&mut catalog.error_types, types);
            }
        }
        catalog
    }

    pub fn is_empty(&self) -> bool {
        self.error_types.is_empty() && self.error_codes.is_empty()
    }
}

fn enum_property<'r>(
    registry: &'r SchemaRegistry,
    schema: &'r SchemaNode,
    property: &str,
) -> Option<&'r [String]> {
    let prop = registry.resolve(schema.properties.get(property)?);
    prop.is_enum().then_some(prop.enum_values.as_slice())
}

fn merge(into: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !into.contains(value) {
            into.push(value.clone());
        }
    }
}

/// Name of the error-code enum of a status
pub fn error_code_enum_name(status: u16) -> String {
    format!("{}ApiErrorCode", reason_phrase(status))
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorTypeContext {
    pub value: String,
    pub constant: String,
    /// Exception class raised for this error type
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorCodeContext {
    pub status: u16,
    pub reason: String,
    pub class_name: String,
    pub values: Vec<EnumValueContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExceptionsContext {
    #[serde(flatten)]
    pub base: BaseContext,
    pub class_name: String,
    pub error_type_enum: String,
    pub error_types: Vec<ErrorTypeContext>,
    pub error_codes: Vec<ErrorCodeContext>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionsBuilder;

impl ArtifactBuilder for ExceptionsBuilder {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Exceptions
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let enum_template = match &artifact.enum_template {
            Some(template) => template.clone(),
            None => ctx.templates.artifact(ArtifactKind::Enums)?.template.clone(),
        };
        let profile = ctx.profile();
        let catalog = ErrorCatalog::collect(
            &ctx.document.schemas,
            ctx.operations
                .iter()
                .flat_map(|op| op.error_schemas.iter().map(|(status, schema)| (*status, schema))),
        );
        if catalog.is_empty() {
            log::warn!("No error responses with error codes or types, emitting the base exception only");
        }

        let error_codes: Vec<_> = catalog
            .error_codes
            .iter()
            .map(|(status, codes)| {
                let class_name = error_code_enum_name(*status);
                ErrorCodeContext {
                    status: *status,
                    reason: reason_phrase(*status),
                    values: EnumContext::new(profile, &class_name, ERROR_CODE_PROPERTY, codes, false).values,
                    class_name,
                }
            })
            .collect();
        let error_types: Vec<_> = catalog
            .error_types
            .iter()
            .map(|value| ErrorTypeContext {
                value: value.clone(),
                constant: profile.enum_constant(value),
                class_name: format!("{}Exception", to_upper_camel_case(value)),
            })
            .collect();

        let mut ops = FileOps::new();
        let dir = artifact_dir(&mut ops, ctx, artifact, None);
        let base = ctx.base_context(namespace(ctx, artifact, None));

        let exceptions = ExceptionsContext {
            base: base.clone(),
            class_name: BASE_EXCEPTION.to_string(),
            error_type_enum: ERROR_TYPE_ENUM.to_string(),
            error_types: error_types.clone(),
            error_codes: error_codes.clone(),
        };
        let content = ctx.templates.render(&artifact.template, &exceptions, BASE_EXCEPTION)?;
        ops.write_string(&dir, profile.class_file_name(BASE_EXCEPTION), content);

        let enum_files = error_codes
            .into_iter()
            .map(|code| (code.class_name, code.values))
            .chain((!error_types.is_empty()).then(|| {
                let values = error_types
                    .into_iter()
                    .map(|t| EnumValueContext {
                        value: t.value,
                        constant: t.constant,
                    })
                    .collect();
                (ERROR_TYPE_ENUM.to_string(), values)
            }));
        for (class_name, values) in enum_files {
            let file = EnumFileContext {
                base: base.clone(),
                class_name: class_name.clone(),
                description: None,
                deprecated: false,
                values,
            };
            let content = ctx.templates.render(&enum_template, &file, &class_name)?;
            log::debug!("Rendered error enum {}", class_name);
            ops.write_string(&dir, profile.class_file_name(&class_name), content);
        }

        log::info!(
            "Built exceptions with {} error types and {} error-code enums",
            catalog.error_types.len(),
            catalog.error_codes.len()
        );
        Ok(ops.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::languages::SdkLanguage;
    use serde_json::json;
    use std::path::Path;

    fn error_response(codes: serde_json::Value, types: serde_json::Value) -> serde_json::Value {
        json!({"content": {"application/json": {"schema": {
            "type": "object",
            "properties": {
                "api_error_code": {"type": "string", "enum": codes},
                "message": {"type": "string"},
                "type": {"type": "string", "enum": types}
            }
        }}}})
    }

    fn spec() -> serde_json::Value {
        json!({
            "openapi": "3.0.0",
            "info": {"title": "Billing", "version": "2.0"},
            "paths": {
                "/customers": {
                    "post": {
                        "operationId": "create_customer",
                        "responses": {
                            "200": {"content": {"application/json": {"schema": {"type": "object"}}}},
                            "400": error_response(json!(["a", "b"]), json!(["payment", "invalid_request"]))
                        }
                    }
                },
                "/invoices": {
                    "post": {
                        "operationId": "create_invoice",
                        "responses": {
                            "400": error_response(json!(["b", "c"]), json!(["invalid_request"])),
                            "404": error_response(json!(["resource_not_found"]), json!(["invalid_request"]))
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(reason_phrase(400), "BadRequest");
        assert_eq!(reason_phrase(429), "TooManyRequests");
        assert_eq!(reason_phrase(418), "Http418");
        assert_eq!(error_code_enum_name(404), "NotFoundApiErrorCode");
    }

    #[test]
    fn test_single_bad_request_response() {
        let registry = SchemaRegistry::default();
        let schema = SchemaNode::from_json(&json!({
            "type": "object",
            "properties": {
                "api_error_code": {"type": "string", "enum": ["a", "b"]},
                "message": {"type": "string"},
                "type": {"type": "string", "enum": ["payment", "invalid_request"]}
            }
        }));
        let catalog = ErrorCatalog::collect(&registry, [(400, &schema)]);
        assert_eq!(catalog.error_codes[&400], vec!["a", "b"]);
        assert_eq!(catalog.error_types, vec!["payment", "invalid_request"]);
    }

    #[test]
    fn test_error_codes_merge_per_status() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Ruby);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let catalog = ErrorCatalog::collect(
            &document.schemas,
            ctx.operations
                .iter()
                .flat_map(|op| op.error_schemas.iter().map(|(s, schema)| (*s, schema))),
        );
        assert_eq!(catalog.error_codes[&400], vec!["a", "b", "c"]);
        assert_eq!(catalog.error_codes[&404], vec!["resource_not_found"]);
        assert_eq!(catalog.error_types, vec!["payment", "invalid_request"]);
    }

    #[test]
    fn test_exception_files() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Java);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let ops = ExceptionsBuilder.build(&ctx).unwrap();
        let files = written(&ops, Path::new("/out"));
        let names: Vec<_> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "exceptions/ApiException.java",
                "exceptions/BadRequestApiErrorCode.java",
                "exceptions/NotFoundApiErrorCode.java",
                "exceptions/ErrorType.java",
            ]
        );
        assert!(files[0].1.contains("class PaymentException extends ApiException"));
        assert!(files[0].1.contains("class InvalidRequestException extends ApiException"));
        assert!(files[1].1.contains("enum BadRequestApiErrorCode"));
        assert!(files[1].1.contains("C(\"c\")"));
    }

    #[test]
    fn test_base_exception_without_error_responses() {
        let document = document(json!({"openapi": "3.0.0", "paths": {}}));
        let templates = templates(SdkLanguage::Python);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let ops = ExceptionsBuilder.build(&ctx).unwrap();
        let files = written(&ops, Path::new("/out"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "exceptions/api_exception.py");
        assert!(files[0].1.contains("class ApiException"));
    }
}

//! Operation-to-artifact mapping.

use serde::Serialize;

use super::case::to_snake_case;
use super::methods::{
    derive_artifact_name, derive_module, is_batch_path, path_parameter_names,
    resolve_method_name, NamingContext,
};
use crate::openapi::{ExtensionKey, HttpMethod, OpenApiOperation, SchemaNode};

/// Everything the builders need to know about one operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: Option<String>,
    /// snake_case module (resource) name
    pub module: String,
    /// lowerCamel SDK method name
    pub method_name: String,
    /// UpperCamel stem of the params/response classes
    pub artifact_name: String,
    pub path_params: Vec<String>,
    /// Query parameters folded into an object (GET) or the body schema (POST)
    #[serde(skip)]
    pub request_schema: Option<SchemaNode>,
    #[serde(skip)]
    pub response_schema: Option<SchemaNode>,
    /// Error response schemas by status code (>= 400)
    #[serde(skip)]
    pub error_schemas: Vec<(u16, SchemaNode)>,
    /// A POST body is declared, even if it has no usable schema
    pub has_request_body: bool,
    pub is_list: bool,
    pub is_batch: bool,
    pub needs_json_input: bool,
    pub is_idempotent: bool,
    pub sub_domain: Option<String>,
    pub sort_order: Option<i64>,
    pub deprecated: bool,
    pub description: Option<String>,
}

impl OperationDescriptor {
    pub fn from_operation(ctx: &NamingContext, operation: &OpenApiOperation) -> Self {
        let ext = &operation.extensions;
        let module = derive_module(operation);
        let method_name = resolve_method_name(ctx, operation);
        let operation_id = operation
            .id
            .clone()
            .unwrap_or_else(|| to_snake_case(&method_name));
        let artifact_name = derive_artifact_name(&operation_id, &module);

        let request_schema = match operation.method {
            HttpMethod::Get => query_schema(operation),
            HttpMethod::Post => operation
                .request_body
                .as_ref()
                .and_then(|body| body.schema.clone()),
        };

        Self {
            method: operation.method,
            path: operation.path.clone(),
            operation_id: operation.id.clone(),
            module,
            method_name,
            artifact_name,
            path_params: path_parameter_names(&operation.path),
            request_schema,
            response_schema: operation.success_schema().cloned(),
            error_schemas: operation
                .error_schemas()
                .map(|(status, schema)| (status, schema.clone()))
                .collect(),
            has_request_body: operation.request_body.is_some(),
            is_list: ext.flag(ExtensionKey::IsListOperation),
            is_batch: is_batch_path(&operation.path)
                || ext.get(ExtensionKey::BatchOperationPathId).is_some(),
            needs_json_input: ext.flag(ExtensionKey::NeedsJsonInput),
            is_idempotent: ext.flag(ExtensionKey::IsIdempotent),
            sub_domain: ext.string(ExtensionKey::SubDomainName),
            sort_order: ext.integer(ExtensionKey::SortOrder),
            deprecated: operation.deprecated,
            description: operation
                .description
                .clone()
                .or_else(|| operation.summary.clone()),
        }
    }

    /// Whether `name` selects this operation: its operation id or `module.method`
    pub fn matches(&self, name: &str) -> bool {
        self.operation_id.as_deref() == Some(name)
            || name == format!("{}.{}", self.module, self.method_name)
    }
}

/// Synthetic object schema holding the query parameters of an operation
fn query_schema(operation: &OpenApiOperation) -> Option<SchemaNode> {
    let mut schema = SchemaNode::object();
    for param in operation.query_parameters() {
        if param.required {
            schema.required.push(param.name.clone());
        }
        schema
            .properties
            .insert(param.name.clone(), param.schema.clone());
    }
    (!schema.properties.is_empty()).then_some(schema)
}

/// Map every operation of a document, in document order
pub fn map_operations(ctx: &NamingContext, operations: &[OpenApiOperation]) -> Vec<OperationDescriptor> {
    operations
        .iter()
        .map(|op| {
            let descriptor = OperationDescriptor::from_operation(ctx, op);
            log::debug!(
                "{} {} -> {}.{} ({})",
                op.method,
                op.path,
                descriptor.module,
                descriptor.method_name,
                descriptor.artifact_name
            );
            descriptor
        })
        .collect()
}

//! Parsed OpenAPI operations.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::extensions::{ExtensionKey, Extensions};
use super::schema::{Primitive, SchemaKind, SchemaNode};
use crate::Error;

const PREFERRED_MEDIA_TYPES: [&str; 2] = ["application/json", "application/x-www-form-urlencoded"];

/// HTTP methods the generator emits SDK methods for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter kind based on the OpenAPI "in" field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    fn parse(value: &str) -> Self {
        match value {
            "path" => Self::Path,
            "header" => Self::Header,
            "cookie" => Self::Cookie,
            _ => Self::Query,
        }
    }
}

/// Information about a single parameter in an OpenAPI operation
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiParameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub deprecated: bool,
    pub description: Option<String>,
    pub schema: SchemaNode,
    pub extensions: Extensions,
}

/// Request body of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub media_type: Option<String>,
    /// `None` when the body declares no usable schema
    pub schema: Option<SchemaNode>,
}

/// Parsed OpenAPI operation
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiOperation {
    /// `operationId`, if the document declares one
    pub id: Option<String>,
    pub method: HttpMethod,
    /// The path where this operation is defined (e.g., "/customers/{customer-id}")
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub parameters: Vec<OpenApiParameter>,
    pub request_body: Option<RequestBody>,
    /// Status code -> response body schema, in document order
    pub responses: IndexMap<String, Option<SchemaNode>>,
    pub extensions: Extensions,
}

impl OpenApiOperation {
    /// Query parameters in declaration order
    pub fn query_parameters(&self) -> impl Iterator<Item = &OpenApiParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
    }

    /// Path parameters in declaration order
    pub fn path_parameters(&self) -> impl Iterator<Item = &OpenApiParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
    }

    /// Schema of the first 2xx response that has one
    pub fn success_schema(&self) -> Option<&SchemaNode> {
        self.responses
            .iter()
            .filter(|(code, _)| code.starts_with('2'))
            .find_map(|(_, schema)| schema.as_ref())
    }

    /// Error responses (status >= 400) with a schema, as `(status, schema)`
    pub fn error_schemas(&self) -> impl Iterator<Item = (u16, &SchemaNode)> {
        self.responses.iter().filter_map(|(code, schema)| {
            let status: u16 = code.parse().ok()?;
            if status < 400 {
                return None;
            }
            schema.as_ref().map(|s| (status, s))
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.extensions.flag(ExtensionKey::HiddenFromSdk)
    }
}

/// Parse every GET and POST operation of a document, in document order
pub fn parse_operations(document: &JsonValue) -> crate::Result<Vec<OpenApiOperation>> {
    let paths = document
        .get("paths")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::openapi("Missing 'paths' object"))?;

    let mut operations = Vec::new();
    for (path, item) in paths {
        let item = resolve_ref(document, item);
        let shared_parameters = parse_parameters(document, item.get("parameters"));

        for method in [HttpMethod::Get, HttpMethod::Post] {
            let Some(op) = item.get(method.as_str()).filter(|v| v.is_object()) else {
                continue;
            };

            let extensions = Extensions::from_json(op);
            if extensions.flag(ExtensionKey::HiddenFromSdk) {
                log::debug!("Skipping hidden operation {} {}", method, path);
                continue;
            }
            let unknown = extensions.unknown_keys();
            if !unknown.is_empty() {
                log::debug!(
                    "Operation {} {} has unrecognised extensions: {:?}",
                    method,
                    path,
                    unknown
                );
            }

            // Operation-level parameters override path-level ones with the same name and location
            let mut parameters = shared_parameters.clone();
            for param in parse_parameters(document, op.get("parameters")) {
                match parameters
                    .iter_mut()
                    .find(|p| p.name == param.name && p.location == param.location)
                {
                    Some(existing) => *existing = param,
                    None => parameters.push(param),
                }
            }

            operations.push(OpenApiOperation {
                id: string_field(op, "operationId"),
                method,
                path: path.clone(),
                summary: string_field(op, "summary"),
                description: string_field(op, "description"),
                tags: op
                    .get("tags")
                    .and_then(JsonValue::as_array)
                    .map(|arr| {
                        arr.iter()
                            .filter_map(JsonValue::as_str)
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
                deprecated: op
                    .get("deprecated")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false),
                parameters,
                request_body: op
                    .get("requestBody")
                    .map(|body| parse_request_body(document, body)),
                responses: parse_responses(document, op.get("responses")),
                extensions,
            });
        }
    }
    Ok(operations)
}

/// Follow a local `$ref` (e.g. `#/components/parameters/Limit`) one level
fn resolve_ref<'a>(document: &'a JsonValue, value: &'a JsonValue) -> &'a JsonValue {
    match value.get("$ref").and_then(JsonValue::as_str) {
        Some(reference) if reference.starts_with("#/") => {
            document.pointer(&reference[1..]).unwrap_or(value)
        }
        _ => value,
    }
}

fn parse_parameters(document: &JsonValue, params: Option<&JsonValue>) -> Vec<OpenApiParameter> {
    params
        .and_then(JsonValue::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|param| {
                    let param = resolve_ref(document, param);
                    let name = param.get("name").and_then(JsonValue::as_str)?;
                    let location = ParameterLocation::parse(
                        param.get("in").and_then(JsonValue::as_str).unwrap_or("query"),
                    );
                    let extensions = Extensions::from_json(param);
                    let mut schema = param
                        .get("schema")
                        .map(SchemaNode::from_json)
                        .unwrap_or_else(|| SchemaNode::new(SchemaKind::Primitive(Primitive::String)));
                    // Generation directives may sit on the parameter or on its schema
                    schema.extensions.merge_missing(&extensions);
                    let description = string_field(param, "description");
                    if schema.description.is_none() {
                        schema.description = description.clone();
                    }
                    let deprecated = param
                        .get("deprecated")
                        .and_then(JsonValue::as_bool)
                        .unwrap_or(false);
                    schema.deprecated |= deprecated;
                    Some(OpenApiParameter {
                        name: name.to_string(),
                        required: param
                            .get("required")
                            .and_then(JsonValue::as_bool)
                            .unwrap_or(location == ParameterLocation::Path),
                        location,
                        deprecated,
                        description,
                        schema,
                        extensions,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_request_body(document: &JsonValue, body: &JsonValue) -> RequestBody {
    let body = resolve_ref(document, body);
    match pick_media(body.get("content")) {
        Some((media_type, media)) => RequestBody {
            media_type: Some(media_type.to_string()),
            schema: media.get("schema").map(SchemaNode::from_json),
        },
        None => RequestBody {
            media_type: None,
            schema: None,
        },
    }
}

fn parse_responses(
    document: &JsonValue,
    responses: Option<&JsonValue>,
) -> IndexMap<String, Option<SchemaNode>> {
    responses
        .and_then(JsonValue::as_object)
        .map(|map| {
            map.iter()
                .map(|(code, response)| {
                    let response = resolve_ref(document, response);
                    let schema = pick_media(response.get("content"))
                        .and_then(|(_, media)| media.get("schema"))
                        .map(SchemaNode::from_json);
                    (code.clone(), schema)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Pick the preferred media type of a content map, falling back to the first one
fn pick_media(content: Option<&JsonValue>) -> Option<(&str, &JsonValue)> {
    let content = content?.as_object()?;
    PREFERRED_MEDIA_TYPES
        .iter()
        .find_map(|mt| content.get(*mt).map(|m| (*mt, m)))
        .or_else(|| content.iter().next().map(|(k, v)| (k.as_str(), v)))
}

fn string_field(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(String::from)
}

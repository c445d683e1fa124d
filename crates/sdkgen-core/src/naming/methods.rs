//! Method, module and artifact naming rules for operations.

use std::collections::HashSet;

use super::case::{singularize, to_lower_camel_case, to_snake_case, to_upper_camel_case};
use crate::openapi::{ExtensionKey, HttpMethod, OpenApiOperation, SchemaRegistry};

const BATCH_SEGMENT: &str = "batch";

/// Lookup tables shared by every naming call of one generation run
#[derive(Debug, Clone, Default)]
pub struct NamingContext {
    /// Component schema names in snake_case
    schema_names: HashSet<String>,
    reserved_words: HashSet<String>,
}

impl NamingContext {
    pub fn new<I, S>(schema_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            schema_names: schema_names
                .into_iter()
                .map(|name| to_snake_case(name.as_ref()))
                .collect(),
            reserved_words: HashSet::new(),
        }
    }

    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        Self::new(registry.names())
    }

    /// Reserved words of the target language, checked by [`avoid_keyword`]
    pub fn with_reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reserved_words = words.into_iter().map(|w| w.as_ref().to_string()).collect();
        self
    }

    /// Whether a path segment (plural or not) names a component schema
    pub fn is_schema_name(&self, segment: &str) -> bool {
        let snake = to_snake_case(segment);
        self.schema_names.contains(&snake) || self.schema_names.contains(&singularize(&snake))
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words.contains(word)
    }
}

fn is_path_param(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Path template parameter names in order of appearance
pub fn path_parameter_names(path: &str) -> Vec<String> {
    segments(path)
        .into_iter()
        .filter(|s| is_path_param(s))
        .map(|s| s.trim_matches(|c| c == '{' || c == '}').to_string())
        .collect()
}

pub fn is_batch_path(path: &str) -> bool {
    segments(path).first() == Some(&BATCH_SEGMENT)
}

/// Method name implied by the shape of a path, if it has a recognised shape
pub fn derive_method_name(
    ctx: &NamingContext,
    method: HttpMethod,
    path: &str,
    is_list: bool,
) -> Option<String> {
    let mut parts = segments(path);
    if parts.first() == Some(&BATCH_SEGMENT) {
        parts.remove(0);
    }

    let name = match (parts.as_slice(), method) {
        ([res], HttpMethod::Post) if !is_path_param(res) => "create".to_string(),
        ([res], HttpMethod::Get) if !is_path_param(res) && is_list => "list".to_string(),
        ([res, id], HttpMethod::Post) if !is_path_param(res) && is_path_param(id) => {
            "update".to_string()
        }
        ([res, id], HttpMethod::Get) if !is_path_param(res) && is_path_param(id) => {
            "retrieve".to_string()
        }
        ([res, seg], HttpMethod::Get) if !is_path_param(res) && !is_path_param(seg) && is_list => {
            to_lower_camel_case(&format!("list_{seg}"))
        }
        ([res, seg], _) if !is_path_param(res) && !is_path_param(seg) => to_lower_camel_case(seg),
        ([res1, id, res2], _) if is_path_param(id) && !is_path_param(res1) && !is_path_param(res2) => {
            if ctx.is_schema_name(res2) {
                let owner = singularize(&to_snake_case(res1));
                match method {
                    HttpMethod::Get => to_lower_camel_case(&format!("{res2}_for_{owner}")),
                    HttpMethod::Post => to_lower_camel_case(&format!("add_{res2}_for_{owner}")),
                }
            } else {
                to_lower_camel_case(res2)
            }
        }
        _ => return None,
    };
    Some(name)
}

/// Class-name stem for the params/response artifacts of an operation.
///
/// The module is only prepended when neither name already contains the other,
/// which avoids names like `CustomerCustomerRetrieve`.
pub fn derive_artifact_name(operation_id: &str, module: &str) -> String {
    let normalize = |s: &str| {
        s.to_lowercase()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
    };
    let op = normalize(operation_id);
    let module_norm = normalize(module);
    if op.contains(&module_norm) || module_norm.contains(&op) {
        to_upper_camel_case(operation_id)
    } else {
        to_upper_camel_case(&format!("{module}_{operation_id}"))
    }
}

/// `batch`-prefix a method name if it is not prefixed yet
pub fn batch_prefixed(name: &str) -> String {
    let already = name
        .strip_prefix(BATCH_SEGMENT)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(|c: char| c.is_uppercase()));
    if already {
        name.to_string()
    } else {
        format!("{BATCH_SEGMENT}{}", to_upper_camel_case(name))
    }
}

/// Prefix the method name of a `/batch/...` path with `batch`
pub fn apply_batch_prefix(path: &str, name: &str) -> String {
    if is_batch_path(path) {
        batch_prefixed(name)
    } else {
        name.to_string()
    }
}

/// Suffix reserved words with the singular form of the first path segment
pub fn avoid_keyword(ctx: &NamingContext, name: &str, path: &str) -> String {
    if !ctx.is_reserved(name) {
        return name.to_string();
    }
    let resource = segments(path)
        .into_iter()
        .find(|s| *s != BATCH_SEGMENT && !is_path_param(s))
        .map(|s| to_upper_camel_case(&singularize(&to_snake_case(s))))
        .unwrap_or_else(|| "Method".to_string());
    format!("{name}{resource}")
}

/// Module an operation belongs to, in snake_case
pub fn derive_module(operation: &OpenApiOperation) -> String {
    if let Some(resource) = operation.extensions.string(ExtensionKey::ResourceId) {
        return to_snake_case(&resource);
    }
    segments(&operation.path)
        .into_iter()
        .find(|s| *s != BATCH_SEGMENT && !is_path_param(s))
        .map(|s| singularize(&to_snake_case(s)))
        .unwrap_or_else(|| "default".to_string())
}

/// Final lowerCamel method name of an operation.
///
/// Candidates in order: the method-name extension, the name implied by the
/// path, the operation id, and the method plus path.
pub fn resolve_method_name(ctx: &NamingContext, operation: &OpenApiOperation) -> String {
    let is_list = operation.extensions.flag(ExtensionKey::IsListOperation);
    let base = operation
        .extensions
        .string(ExtensionKey::MethodName)
        .map(|name| to_lower_camel_case(&name))
        .or_else(|| derive_method_name(ctx, operation.method, &operation.path, is_list))
        .or_else(|| operation.id.as_deref().map(to_lower_camel_case))
        .unwrap_or_else(|| {
            let raw: String = format!("{}_{}", operation.method, operation.path)
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect();
            to_lower_camel_case(&raw)
        });

    let batched = if operation.extensions.get(ExtensionKey::BatchOperationPathId).is_some() {
        batch_prefixed(&base)
    } else {
        apply_batch_prefix(&operation.path, &base)
    };
    avoid_keyword(ctx, &batched, &operation.path)
}

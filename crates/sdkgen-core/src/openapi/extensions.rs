//! Vendor extensions that steer generation.
//!
//! Operations, parameters and schemas carry `x-sdk-*` annotations. The keys the
//! generator understands are a closed set ([`ExtensionKey`]) with typed
//! accessors; any other `x-` key is kept so callers can report it, but it never
//! stops a run.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

const PREFIX: &str = "x-sdk-";

/// Extension keys recognised by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKey {
    ResourceId,
    MethodName,
    IsListOperation,
    NeedsJsonInput,
    IsIdempotent,
    IsFilterParameter,
    SdkFilterName,
    IsSortParameter,
    IsCompositeArrayRequestBody,
    BatchOperationPathId,
    SubDomainName,
    IsGlobalEnum,
    GlobalEnumReference,
    HiddenFromSdk,
    SortOrder,
}

impl ExtensionKey {
    const ALL: [Self; 15] = [
        Self::ResourceId,
        Self::MethodName,
        Self::IsListOperation,
        Self::NeedsJsonInput,
        Self::IsIdempotent,
        Self::IsFilterParameter,
        Self::SdkFilterName,
        Self::IsSortParameter,
        Self::IsCompositeArrayRequestBody,
        Self::BatchOperationPathId,
        Self::SubDomainName,
        Self::IsGlobalEnum,
        Self::GlobalEnumReference,
        Self::HiddenFromSdk,
        Self::SortOrder,
    ];

    /// Key as written in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceId => "x-sdk-resource-id",
            Self::MethodName => "x-sdk-operation-method-name",
            Self::IsListOperation => "x-sdk-operation-is-list",
            Self::NeedsJsonInput => "x-sdk-operation-needs-json-input",
            Self::IsIdempotent => "x-sdk-operation-is-idempotent",
            Self::IsFilterParameter => "x-sdk-is-filter-parameter",
            Self::SdkFilterName => "x-sdk-sdk-filter-name",
            Self::IsSortParameter => "x-sdk-is-sort-parameter",
            Self::IsCompositeArrayRequestBody => "x-sdk-is-composite-array-request-body",
            Self::BatchOperationPathId => "x-sdk-batch-operation-path-id",
            Self::SubDomainName => "x-sdk-sub-domain-name",
            Self::IsGlobalEnum => "x-sdk-is-global-enum",
            Self::GlobalEnumReference => "x-sdk-global-enum-reference",
            Self::HiddenFromSdk => "x-sdk-hidden-from-sdk",
            Self::SortOrder => "x-sdk-sort-order",
        }
    }

    /// Look up a recognised key by its document spelling
    pub fn from_key(key: &str) -> Option<Self> {
        if !key.starts_with(PREFIX) {
            return None;
        }
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Vendor extensions attached to a single node, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    values: IndexMap<String, JsonValue>,
}

impl Extensions {
    /// Collect every `x-` entry of a JSON object
    pub fn from_json(node: &JsonValue) -> Self {
        let values = node
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter(|(k, _)| k.starts_with("x-"))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of a recognised key
    pub fn get(&self, key: ExtensionKey) -> Option<&JsonValue> {
        self.values.get(key.as_str())
    }

    /// String form of the value: strings verbatim, scalars via their JSON text
    pub fn string(&self, key: ExtensionKey) -> Option<String> {
        match self.get(key)? {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Bool(b) => Some(b.to_string()),
            JsonValue::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Boolean flag; strings `"true"`/`"false"` are accepted, absent means false
    pub fn flag(&self, key: ExtensionKey) -> bool {
        match self.get(key) {
            Some(JsonValue::Bool(b)) => *b,
            Some(JsonValue::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Integer value, if the extension holds one
    pub fn integer(&self, key: ExtensionKey) -> Option<i64> {
        match self.get(key)? {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// List value; a single scalar counts as a one-element list
    pub fn strings(&self, key: ExtensionKey) -> Vec<String> {
        match self.get(key) {
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    JsonValue::String(s) => Some(s.clone()),
                    JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(_) => self.string(key).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// `x-` keys the generator does not understand
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| ExtensionKey::from_key(k).is_none())
            .collect()
    }

    /// Copy entries from `other` that are not already set here
    pub fn merge_missing(&mut self, other: &Extensions) {
        for (k, v) in &other.values {
            self.values.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    /// Set a recognised key
    pub fn insert(&mut self, key: ExtensionKey, value: JsonValue) {
        self.values.insert(key.as_str().to_string(), value);
    }
}

/// Read an extension from an optional node as a string.
///
/// Absence of the node, of its extensions or of the key are all reported as
/// `None`.
pub fn read_extension(node: Option<&Extensions>, key: ExtensionKey) -> Option<String> {
    node?.string(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_extension_string_forms() {
        let ext = Extensions::from_json(&json!({
            "type": "object",
            "x-sdk-resource-id": "customer",
            "x-sdk-operation-is-list": true,
            "x-sdk-sort-order": 3
        }));
        assert_eq!(
            read_extension(Some(&ext), ExtensionKey::ResourceId),
            Some("customer".to_string())
        );
        assert_eq!(
            read_extension(Some(&ext), ExtensionKey::IsListOperation),
            Some("true".to_string())
        );
        assert_eq!(
            read_extension(Some(&ext), ExtensionKey::SortOrder),
            Some("3".to_string())
        );
        assert_eq!(read_extension(Some(&ext), ExtensionKey::SubDomainName), None);
        assert_eq!(read_extension(None, ExtensionKey::ResourceId), None);
    }

    #[test]
    fn test_typed_accessors() {
        let ext = Extensions::from_json(&json!({
            "x-sdk-is-filter-parameter": "true",
            "x-sdk-operation-needs-json-input": false,
            "x-sdk-sort-order": "7"
        }));
        assert!(ext.flag(ExtensionKey::IsFilterParameter));
        assert!(!ext.flag(ExtensionKey::NeedsJsonInput));
        assert!(!ext.flag(ExtensionKey::HiddenFromSdk));
        assert_eq!(ext.integer(ExtensionKey::SortOrder), Some(7));
    }

    #[test]
    fn test_unknown_keys_are_kept_but_flagged() {
        let ext = Extensions::from_json(&json!({
            "x-sdk-resource-id": "invoice",
            "x-internal-note": "ignored",
            "x-sdk-made-up": 1
        }));
        assert_eq!(ext.unknown_keys(), vec!["x-internal-note", "x-sdk-made-up"]);
    }

    #[test]
    fn test_from_key_round_trip() {
        for key in ExtensionKey::ALL {
            assert_eq!(ExtensionKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(ExtensionKey::from_key("x-other"), None);
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut schema = Extensions::from_json(&json!({"x-sdk-sdk-filter-name": "StringFilter"}));
        let param = Extensions::from_json(&json!({
            "x-sdk-sdk-filter-name": "EnumFilter",
            "x-sdk-is-filter-parameter": true
        }));
        schema.merge_missing(&param);
        assert_eq!(
            schema.string(ExtensionKey::SdkFilterName).as_deref(),
            Some("StringFilter")
        );
        assert!(schema.flag(ExtensionKey::IsFilterParameter));
    }

    #[test]
    fn test_strings_accepts_lists_and_scalars() {
        let ext = Extensions::from_json(&json!({
            "x-sdk-resource-id": ["customer", 7, null],
            "x-sdk-sub-domain-name": "ingest"
        }));
        assert_eq!(ext.strings(ExtensionKey::ResourceId), vec!["customer", "7"]);
        assert_eq!(ext.strings(ExtensionKey::SubDomainName), vec!["ingest"]);
        assert!(ext.strings(ExtensionKey::SortOrder).is_empty());
    }
}

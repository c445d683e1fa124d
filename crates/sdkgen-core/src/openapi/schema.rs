//! Typed, read-only view of OpenAPI schema objects.
//!
//! Schemas are converted once from the raw JSON document. References to
//! `#/components/schemas/*` stay as [`SchemaKind::Reference`] nodes and are
//! looked up through the [`SchemaRegistry`], so recursive component graphs
//! never have to be expanded.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::extensions::{ExtensionKey, Extensions};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const MAX_REF_DEPTH: usize = 32;

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Integer,
    Long,
    Number,
    Boolean,
    Timestamp,
    Date,
    Any,
}

impl Primitive {
    fn from_type(typ: &str, format: Option<&str>) -> Self {
        match (typ, format) {
            ("integer", Some("int64")) => Self::Long,
            ("integer", Some("unix-time")) => Self::Timestamp,
            ("integer", _) => Self::Integer,
            ("number", _) => Self::Number,
            ("boolean", _) => Self::Boolean,
            ("string", Some("date-time" | "unix-time")) => Self::Timestamp,
            ("string", Some("date")) => Self::Date,
            ("string", _) => Self::String,
            _ => Self::Any,
        }
    }
}

/// Shape of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Primitive(Primitive),
    Object,
    Array,
    /// Name of a component schema
    Reference(String),
}

/// A node of the schema tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
    pub enum_values: Vec<String>,
    pub items: Option<Box<SchemaNode>>,
    pub deprecated: bool,
    pub description: Option<String>,
    pub extensions: Extensions,
}

impl SchemaNode {
    /// Empty node of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            required: Vec::new(),
            enum_values: Vec::new(),
            items: None,
            deprecated: false,
            description: None,
            extensions: Extensions::default(),
        }
    }

    /// Empty object node
    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    /// Convert a JSON schema object. Unknown shapes become `Primitive::Any`.
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::new(SchemaKind::Primitive(Primitive::Any));
        };

        if let Some(reference) = obj.get("$ref").and_then(JsonValue::as_str) {
            let mut node = match reference.strip_prefix(SCHEMA_REF_PREFIX) {
                Some(name) => Self::new(SchemaKind::Reference(name.to_string())),
                None => {
                    log::warn!("Unsupported schema reference '{}'", reference);
                    Self::new(SchemaKind::Primitive(Primitive::Any))
                }
            };
            node.extensions = Extensions::from_json(value);
            node.description = string_field(value, "description");
            return node;
        }

        // allOf with a single member is a plain wrapper (often used to attach a description)
        if let Some([single]) = obj.get("allOf").and_then(JsonValue::as_array).map(Vec::as_slice) {
            let mut node = Self::from_json(single);
            node.extensions.merge_missing(&Extensions::from_json(value));
            if node.description.is_none() {
                node.description = string_field(value, "description");
            }
            node.deprecated |= bool_field(value, "deprecated");
            return node;
        }

        let typ = match obj.get("type") {
            Some(JsonValue::String(t)) => Some(t.as_str()),
            // OpenAPI 3.1 `type: [string, "null"]`
            Some(JsonValue::Array(types)) => types
                .iter()
                .filter_map(JsonValue::as_str)
                .find(|t| *t != "null"),
            _ => None,
        };
        let format = obj.get("format").and_then(JsonValue::as_str);

        let kind = match typ {
            Some("object") => SchemaKind::Object,
            Some("array") => SchemaKind::Array,
            Some(t) => SchemaKind::Primitive(Primitive::from_type(t, format)),
            None if obj.contains_key("properties") => SchemaKind::Object,
            None if obj.contains_key("items") => SchemaKind::Array,
            None if obj.contains_key("enum") => SchemaKind::Primitive(Primitive::String),
            None => SchemaKind::Primitive(Primitive::Any),
        };

        let mut node = Self::new(kind);
        node.properties = obj
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, schema)| (name.clone(), Self::from_json(schema)))
                    .collect()
            })
            .unwrap_or_default();
        node.required = obj
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        node.enum_values = obj
            .get("enum")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| match v {
                        JsonValue::Null => None,
                        JsonValue::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        node.items = obj.get("items").map(|items| Box::new(Self::from_json(items)));
        node.deprecated = bool_field(value, "deprecated");
        node.description = string_field(value, "description");
        node.extensions = Extensions::from_json(value);
        node
    }

    pub fn is_object(&self) -> bool {
        self.kind == SchemaKind::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind == SchemaKind::Array
    }

    /// Name of the referenced component, if this is a reference node
    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Reference(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    pub fn is_hidden(&self) -> bool {
        self.extensions.flag(ExtensionKey::HiddenFromSdk)
    }
}

fn string_field(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(String::from)
}

fn bool_field(value: &JsonValue, key: &str) -> bool {
    value.get(key).and_then(JsonValue::as_bool).unwrap_or(false)
}

/// Component schemas of a document, in document order
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
    /// Read `components.schemas` from a document
    pub fn from_document(document: &JsonValue) -> Self {
        let schemas = document
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
            .map(|map| {
                map.iter()
                    .map(|(name, schema)| (name.clone(), SchemaNode::from_json(schema)))
                    .collect()
            })
            .unwrap_or_default();
        Self { schemas }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.schemas.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Follow reference chains to a concrete node.
    ///
    /// Dangling or cyclic references resolve to the last reference node seen.
    pub fn resolve<'a>(&'a self, node: &'a SchemaNode) -> &'a SchemaNode {
        let mut current = node;
        for _ in 0..MAX_REF_DEPTH {
            match current.reference().and_then(|name| self.schemas.get(name)) {
                Some(next) => current = next,
                None => return current,
            }
        }
        log::warn!("Reference chain too deep or cyclic, stopping resolution");
        current
    }

    /// Insert a schema, mostly useful for building registries in tests
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaNode) {
        self.schemas.insert(name.into(), schema);
    }
}

impl FromIterator<(String, SchemaNode)> for SchemaRegistry {
    fn from_iter<T: IntoIterator<Item = (String, SchemaNode)>>(iter: T) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}

//! Schema classification.
//!
//! Explicit vendor flags win over structural checks: an object whose
//! properties happen to be called `is`, `in` or `between` is only a filter when
//! it carries the filter flag.

use crate::openapi::{ExtensionKey, SchemaKind, SchemaNode, SchemaRegistry};

/// Category of a schema for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaClass {
    Primitive,
    Enum,
    Object,
    ListOfPrimitive,
    ListOfObject,
    FilterParameter,
    SortParameter,
    CompositeArrayRequest,
}

/// Where a schema is used; composite-array bodies only exist in requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaUsage {
    Request,
    #[default]
    Response,
}

/// Classifies schemas against a registry of component schemas
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    registry: &'a SchemaRegistry,
    usage: SchemaUsage,
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a SchemaRegistry, usage: SchemaUsage) -> Self {
        Self { registry, usage }
    }

    pub fn usage(&self) -> SchemaUsage {
        self.usage
    }

    pub fn classify(&self, schema: &SchemaNode) -> SchemaClass {
        let flags = &schema.extensions;
        if flags.flag(ExtensionKey::IsFilterParameter) {
            return SchemaClass::FilterParameter;
        }
        if flags.flag(ExtensionKey::IsSortParameter) {
            return SchemaClass::SortParameter;
        }

        let resolved = self.registry.resolve(schema);
        if resolved.is_enum() {
            return SchemaClass::Enum;
        }
        if self.is_composite_array(schema, resolved) {
            return SchemaClass::CompositeArrayRequest;
        }

        match &resolved.kind {
            SchemaKind::Array => match resolved.items.as_deref() {
                Some(items) if self.is_object_like(items) => SchemaClass::ListOfObject,
                _ => SchemaClass::ListOfPrimitive,
            },
            SchemaKind::Object => SchemaClass::Object,
            // A dangling reference carries no shape; treat it as an untyped value
            SchemaKind::Primitive(_) | SchemaKind::Reference(_) => SchemaClass::Primitive,
        }
    }

    fn is_composite_array(&self, schema: &SchemaNode, resolved: &SchemaNode) -> bool {
        if self.usage != SchemaUsage::Request || !resolved.is_object() {
            return false;
        }
        if schema.extensions.flag(ExtensionKey::IsCompositeArrayRequestBody)
            || resolved
                .extensions
                .flag(ExtensionKey::IsCompositeArrayRequestBody)
        {
            return true;
        }
        !resolved.properties.is_empty()
            && resolved
                .properties
                .values()
                .all(|prop| self.registry.resolve(prop).is_array())
    }

    fn is_object_like(&self, schema: &SchemaNode) -> bool {
        let resolved = self.registry.resolve(schema);
        resolved.is_object() && !resolved.is_enum()
    }
}

/// Classify with an empty registry, for schemas without references
pub fn classify(schema: &SchemaNode, usage: SchemaUsage) -> SchemaClass {
    let registry = SchemaRegistry::default();
    Classifier::new(&registry, usage).classify(schema)
}

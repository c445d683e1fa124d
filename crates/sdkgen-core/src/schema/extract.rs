//! Recursive extraction of fields, inline enums and sub-models from a schema.

use crate::naming::{singularize, to_upper_camel_case};
use crate::openapi::{ExtensionKey, Primitive, SchemaKind, SchemaNode, SchemaRegistry};

use super::classify::{Classifier, SchemaClass, SchemaUsage};
use super::types::{EnumField, Extraction, Field, FilterMeta, Model, ModelPath, TypeDescriptor};

/// Walks schemas into [`Extraction`]s
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    registry: &'a SchemaRegistry,
    classifier: Classifier<'a>,
}

impl<'a> Extractor<'a> {
    pub fn new(registry: &'a SchemaRegistry, usage: SchemaUsage) -> Self {
        Self {
            registry,
            classifier: Classifier::new(registry, usage),
        }
    }

    /// Extract every declared property of `schema`.
    ///
    /// Sub-models found below `schema` get paths rooted at `parent`.
    pub fn extract(&self, schema: &SchemaNode, parent: &ModelPath) -> Extraction {
        let schema = self.registry.resolve(schema);
        let mut out = Extraction::default();
        for (name, prop) in &schema.properties {
            if prop.is_hidden() {
                log::debug!("Skipping hidden property '{}'", name);
                continue;
            }
            let mut field = self.extract_property(name, prop, parent, &mut out);
            field.required = schema.is_required(name);
            out.fields.push(field);
        }
        out
    }

    fn extract_property(
        &self,
        name: &str,
        prop: &SchemaNode,
        parent: &ModelPath,
        out: &mut Extraction,
    ) -> Field {
        let resolved = self.registry.resolve(prop);
        let mut field = Field::new(name, TypeDescriptor::Opaque);
        field.deprecated = prop.deprecated;
        field.description = prop
            .description
            .clone()
            .or_else(|| resolved.description.clone());

        let class = self.classifier.classify(prop);
        field.type_ = match class {
            SchemaClass::FilterParameter => {
                let meta = self.filter_meta(prop);
                let type_ = TypeDescriptor::Filter(meta.sdk_filter_name.clone());
                field.filter = Some(meta);
                type_
            }
            SchemaClass::SortParameter => {
                field.sort_attributes = first_operator_values(self.registry, resolved);
                TypeDescriptor::Sort
            }
            _ if prop.reference().is_some() => {
                self.reference_type(prop, name, parent, out, &mut Vec::new())
            }
            SchemaClass::Enum => self.enum_type(name, prop, &to_upper_camel_case(name), out),
            SchemaClass::Primitive => primitive_type(resolved),
            SchemaClass::Object => self.object_type(name, resolved, parent, out),
            SchemaClass::ListOfPrimitive | SchemaClass::ListOfObject => {
                match resolved.items.as_deref() {
                    Some(items) => TypeDescriptor::List(Box::new(self.element_type(
                        name,
                        items,
                        parent,
                        out,
                        &mut Vec::new(),
                    ))),
                    None => TypeDescriptor::List(Box::new(TypeDescriptor::Opaque)),
                }
            }
            SchemaClass::CompositeArrayRequest => self.composite_type(name, resolved, parent, out),
        };
        field
    }

    /// Type of a property that points at a component schema.
    ///
    /// `visiting` holds the component names whose array items are being
    /// resolved; meeting one of them again yields `Opaque`.
    fn reference_type(
        &self,
        prop: &SchemaNode,
        name: &str,
        parent: &ModelPath,
        out: &mut Extraction,
        visiting: &mut Vec<String>,
    ) -> TypeDescriptor {
        let Some(target_name) = prop.reference() else {
            return primitive_type(prop);
        };
        if visiting.iter().any(|seen| seen == target_name) {
            log::warn!(
                "Recursive schema reference '{}' in property '{}', leaving it untyped",
                target_name,
                name
            );
            return TypeDescriptor::Opaque;
        }
        let target = self.registry.resolve(prop);
        if target.reference().is_some() {
            log::warn!("Unresolvable schema reference '{}'", target_name);
            return TypeDescriptor::Opaque;
        }
        if target.is_enum() {
            return TypeDescriptor::GlobalEnum(to_upper_camel_case(target_name));
        }
        match &target.kind {
            SchemaKind::Object => TypeDescriptor::GlobalModel(to_upper_camel_case(target_name)),
            SchemaKind::Array => match target.items.as_deref() {
                Some(items) => {
                    visiting.push(target_name.to_string());
                    let element = self.element_type(name, items, parent, out, visiting);
                    visiting.pop();
                    TypeDescriptor::List(Box::new(element))
                }
                None => TypeDescriptor::List(Box::new(TypeDescriptor::Opaque)),
            },
            _ => primitive_type(target),
        }
    }

    /// Inline enum, or a named global enum when the property says so
    fn enum_type(
        &self,
        property: &str,
        schema: &SchemaNode,
        type_name: &str,
        out: &mut Extraction,
    ) -> TypeDescriptor {
        if let Some(global) = global_enum_name(type_name, schema) {
            return TypeDescriptor::GlobalEnum(global);
        }
        let resolved = self.registry.resolve(schema);
        let values = &resolved.enum_values;
        // Same name and values: both properties share one enum
        if let Some(existing) = out.enum_fields.iter().find(|e| e.name == type_name) {
            if existing.values == *values {
                return TypeDescriptor::InlineEnum(type_name.to_string());
            }
        }
        let name = unique_enum_name(&out.enum_fields, type_name, property);
        out.enum_fields.push(EnumField {
            name: name.clone(),
            property: property.to_string(),
            values: values.clone(),
            deprecated: schema.deprecated,
        });
        TypeDescriptor::InlineEnum(name)
    }

    fn object_type(
        &self,
        name: &str,
        resolved: &SchemaNode,
        parent: &ModelPath,
        out: &mut Extraction,
    ) -> TypeDescriptor {
        if resolved.properties.is_empty() {
            return TypeDescriptor::Opaque;
        }
        let model_name = to_upper_camel_case(name);
        let path = self.push_sub_model(name, &model_name, resolved, parent, out);
        TypeDescriptor::SubModel {
            path,
            name: model_name,
        }
    }

    /// Type of a single list element
    fn element_type(
        &self,
        name: &str,
        items: &SchemaNode,
        parent: &ModelPath,
        out: &mut Extraction,
        visiting: &mut Vec<String>,
    ) -> TypeDescriptor {
        if items.reference().is_some() {
            return self.reference_type(items, name, parent, out, visiting);
        }
        let singular = to_upper_camel_case(&singularize(name));
        if items.is_enum() {
            return self.enum_type(name, items, &singular, out);
        }
        match &items.kind {
            SchemaKind::Object if items.properties.is_empty() => TypeDescriptor::Opaque,
            SchemaKind::Object => {
                let path = self.push_sub_model(name, &singular, items, parent, out);
                TypeDescriptor::SubModel {
                    path,
                    name: singular,
                }
            }
            SchemaKind::Array => match items.items.as_deref() {
                Some(inner) => TypeDescriptor::List(Box::new(
                    self.element_type(name, inner, parent, out, visiting),
                )),
                None => TypeDescriptor::List(Box::new(TypeDescriptor::Opaque)),
            },
            _ => primitive_type(items),
        }
    }

    /// Parallel arrays become one sub-model whose fields are the element types
    fn composite_type(
        &self,
        name: &str,
        resolved: &SchemaNode,
        parent: &ModelPath,
        out: &mut Extraction,
    ) -> TypeDescriptor {
        let mut per_index = resolved.clone();
        for prop in per_index.properties.values_mut() {
            let element = self.registry.resolve(prop).items.as_deref().cloned();
            if let Some(mut element) = element {
                element.deprecated |= prop.deprecated;
                if element.description.is_none() {
                    element.description = prop.description.clone();
                }
                element.extensions.merge_missing(&prop.extensions);
                *prop = element;
            }
        }
        let model_name = to_upper_camel_case(&singularize(name));
        let path = self.push_sub_model(name, &model_name, &per_index, parent, out);
        TypeDescriptor::CompositeArray {
            path,
            name: model_name,
        }
    }

    fn push_sub_model(
        &self,
        property: &str,
        model_name: &str,
        schema: &SchemaNode,
        parent: &ModelPath,
        out: &mut Extraction,
    ) -> ModelPath {
        let path = parent.child(property);
        let inner = self.extract(schema, &path);
        out.sub_models.push(Model {
            name: model_name.to_string(),
            path: path.clone(),
            fields: inner.fields,
            enum_fields: inner.enum_fields,
            sub_models: inner.sub_models,
        });
        path
    }

    fn filter_meta(&self, schema: &SchemaNode) -> FilterMeta {
        let resolved = self.registry.resolve(schema);
        let explicit = schema
            .extensions
            .string(ExtensionKey::SdkFilterName)
            .or_else(|| resolved.extensions.string(ExtensionKey::SdkFilterName));
        FilterMeta {
            sdk_filter_name: explicit.unwrap_or_else(|| infer_filter_name(self.registry, resolved)),
            supported_operations: resolved.properties.keys().cloned().collect(),
            enum_values: first_operator_values(self.registry, resolved),
        }
    }
}

/// Name of the API-wide enum an inline enum schema stands for, if it is one.
///
/// `type_name` is the name the enum would get inline; it is kept for enums
/// flagged global without naming a reference.
pub fn global_enum_name(type_name: &str, schema: &SchemaNode) -> Option<String> {
    if let Some(reference) = schema.extensions.string(ExtensionKey::GlobalEnumReference) {
        return Some(to_upper_camel_case(&reference));
    }
    schema
        .extensions
        .flag(ExtensionKey::IsGlobalEnum)
        .then(|| type_name.to_string())
}

/// Enum name not yet taken in `taken`: the preferred name, then the property
/// name in UpperCamel, then the preferred name with a numeric suffix
fn unique_enum_name(taken: &[EnumField], preferred: &str, property: &str) -> String {
    let is_free = |candidate: &str| taken.iter().all(|e| e.name != candidate);
    if is_free(preferred) {
        return preferred.to_string();
    }
    let from_property = to_upper_camel_case(property);
    if is_free(from_property.as_str()) {
        return from_property;
    }
    (2..)
        .map(|n| format!("{preferred}{n}"))
        .find(|candidate| is_free(candidate.as_str()))
        .unwrap_or_else(|| preferred.to_string())
}

fn primitive_type(schema: &SchemaNode) -> TypeDescriptor {
    match schema.kind {
        SchemaKind::Primitive(p) => TypeDescriptor::Primitive(p),
        _ => TypeDescriptor::Primitive(Primitive::Any),
    }
}

/// Enum values of the first operator that declares any
fn first_operator_values(registry: &SchemaRegistry, filter: &SchemaNode) -> Vec<String> {
    filter
        .properties
        .values()
        .map(|op| registry.resolve(op))
        .find_map(|op| {
            if op.is_enum() {
                return Some(op.enum_values.clone());
            }
            op.items
                .as_deref()
                .map(|items| registry.resolve(items))
                .filter(|items| items.is_enum())
                .map(|items| items.enum_values.clone())
        })
        .unwrap_or_default()
}

/// Filter class name from the value type of the first operator
fn infer_filter_name(registry: &SchemaRegistry, filter: &SchemaNode) -> String {
    let Some(first) = filter.properties.values().next() else {
        return "StringFilter".to_string();
    };
    let mut operand = registry.resolve(first);
    if operand.is_array() {
        if let Some(items) = operand.items.as_deref() {
            operand = registry.resolve(items);
        }
    }
    if operand.is_enum() {
        return "EnumFilter".to_string();
    }
    let name = match operand.kind {
        SchemaKind::Primitive(Primitive::Integer | Primitive::Long | Primitive::Number) => {
            "NumberFilter"
        }
        SchemaKind::Primitive(Primitive::Boolean) => "BooleanFilter",
        SchemaKind::Primitive(Primitive::Timestamp) => "TimestampFilter",
        SchemaKind::Primitive(Primitive::Date) => "DateFilter",
        _ => "StringFilter",
    };
    name.to_string()
}

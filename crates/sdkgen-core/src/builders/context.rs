//! Serializable template contexts.
//!
//! Builders turn extracted fields and models into these structs so templates
//! never see the internal type descriptors, only language-specific spellings.

use serde::Serialize;

use crate::languages::{LanguageProfile, SdkLanguage};
use crate::naming::OperationDescriptor;
use crate::schema::{EnumField, Extraction, Field, FilterMeta, Model, TypeDescriptor};

/// Values every template receives
#[derive(Debug, Clone, Serialize)]
pub struct BaseContext {
    pub sdk_name: String,
    pub language: SdkLanguage,
    /// Package/module segments of the generated file, outermost first
    pub namespace: Vec<String>,
    pub api_version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    /// Property name as written in the document
    pub name: String,
    /// Identifier in the target language
    pub identifier: String,
    pub type_name: String,
    pub required: bool,
    pub deprecated: bool,
    pub description: Option<String>,
    pub is_list: bool,
    pub is_enum: bool,
    pub is_global_enum: bool,
    pub is_sub_model: bool,
    pub is_global_model: bool,
    pub is_composite_array: bool,
    pub is_filter: bool,
    pub is_sort: bool,
    /// Name of the enum or model the field refers to
    pub ref_name: Option<String>,
    pub filter: Option<FilterMeta>,
    pub sort_attributes: Vec<String>,
}

impl FieldContext {
    pub fn new(profile: &dyn LanguageProfile, field: &Field) -> Self {
        let element = field.type_.element();
        let ref_name = match element {
            TypeDescriptor::InlineEnum(name)
            | TypeDescriptor::GlobalEnum(name)
            | TypeDescriptor::GlobalModel(name)
            | TypeDescriptor::SubModel { name, .. }
            | TypeDescriptor::CompositeArray { name, .. } => Some(name.clone()),
            _ => None,
        };
        Self {
            name: field.name.clone(),
            identifier: profile.field_name(&field.name),
            type_name: profile.type_name(&field.type_),
            required: field.required,
            deprecated: field.deprecated,
            description: field.description.clone(),
            is_list: field.type_.is_list() || field.is_composite_array(),
            is_enum: matches!(element, TypeDescriptor::InlineEnum(_)),
            is_global_enum: matches!(element, TypeDescriptor::GlobalEnum(_)),
            is_sub_model: matches!(element, TypeDescriptor::SubModel { .. }),
            is_global_model: matches!(element, TypeDescriptor::GlobalModel(_)),
            is_composite_array: field.is_composite_array(),
            is_filter: field.filter.is_some(),
            is_sort: matches!(element, TypeDescriptor::Sort),
            ref_name,
            filter: field.filter.clone(),
            sort_attributes: field.sort_attributes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumValueContext {
    pub value: String,
    pub constant: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumContext {
    pub name: String,
    /// Property the enum belongs to, empty for standalone enums
    pub property: String,
    pub deprecated: bool,
    pub values: Vec<EnumValueContext>,
}

impl EnumContext {
    pub fn new(
        profile: &dyn LanguageProfile,
        name: &str,
        property: &str,
        values: &[String],
        deprecated: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            property: property.to_string(),
            deprecated,
            values: values
                .iter()
                .map(|value| EnumValueContext {
                    value: value.clone(),
                    constant: profile.enum_constant(value),
                })
                .collect(),
        }
    }

    pub fn from_field(profile: &dyn LanguageProfile, field: &EnumField) -> Self {
        Self::new(profile, &field.name, &field.property, &field.values, field.deprecated)
    }
}

/// A sub-model, flattened out of the tree
#[derive(Debug, Clone, Serialize)]
pub struct ModelContext {
    pub name: String,
    /// Underscore-joined path from the root schema
    pub path: String,
    pub fields: Vec<FieldContext>,
    pub enums: Vec<EnumContext>,
}

impl ModelContext {
    pub fn new(profile: &dyn LanguageProfile, model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            path: model.path.to_string(),
            fields: model
                .fields
                .iter()
                .map(|f| FieldContext::new(profile, f))
                .collect(),
            enums: model
                .enum_fields
                .iter()
                .map(|e| EnumContext::from_field(profile, e))
                .collect(),
        }
    }
}

/// Context of a model, params or response class
#[derive(Debug, Clone, Serialize)]
pub struct ClassContext {
    #[serde(flatten)]
    pub base: BaseContext,
    pub class_name: String,
    pub module: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub operation: Option<OperationDescriptor>,
    pub fields: Vec<FieldContext>,
    /// Inline enums of the class itself
    pub enums: Vec<EnumContext>,
    /// Every nested model, depth-first
    pub sub_models: Vec<ModelContext>,
}

impl ClassContext {
    pub fn new(
        profile: &dyn LanguageProfile,
        base: BaseContext,
        class_name: impl Into<String>,
        extraction: &Extraction,
    ) -> Self {
        Self {
            base,
            class_name: class_name.into(),
            module: None,
            description: None,
            deprecated: false,
            operation: None,
            fields: extraction
                .fields
                .iter()
                .map(|f| FieldContext::new(profile, f))
                .collect(),
            enums: extraction
                .enum_fields
                .iter()
                .map(|e| EnumContext::from_field(profile, e))
                .collect(),
            sub_models: extraction
                .all_sub_models()
                .into_iter()
                .map(|m| ModelContext::new(profile, m))
                .collect(),
        }
    }
}

/// Context of a standalone enum file
#[derive(Debug, Clone, Serialize)]
pub struct EnumFileContext {
    #[serde(flatten)]
    pub base: BaseContext,
    pub class_name: String,
    pub description: Option<String>,
    pub deprecated: bool,
    pub values: Vec<EnumValueContext>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::SdkLanguage;
    use crate::openapi::Primitive;
    use crate::schema::ModelPath;

    #[test]
    fn test_field_context_flags() {
        let profile = SdkLanguage::Java.profile();
        let mut field = Field::new(
            "line_items",
            TypeDescriptor::List(Box::new(TypeDescriptor::SubModel {
                path: ModelPath::root().child("line_items"),
                name: "LineItem".into(),
            })),
        );
        field.required = true;
        let ctx = FieldContext::new(profile, &field);
        assert_eq!(ctx.identifier, "lineItems");
        assert_eq!(ctx.type_name, "java.util.List<LineItem>");
        assert!(ctx.is_list && ctx.is_sub_model && ctx.required);
        assert_eq!(ctx.ref_name.as_deref(), Some("LineItem"));

        let plain = FieldContext::new(profile, &Field::new("id", TypeDescriptor::Primitive(Primitive::String)));
        assert!(!plain.is_list && plain.ref_name.is_none());
    }

    #[test]
    fn test_enum_constants_follow_profile() {
        let profile = SdkLanguage::Python.profile();
        let ctx = EnumContext::new(profile, "Status", "status", &["in_trial".to_string()], false);
        assert_eq!(ctx.values[0].constant, "IN_TRIAL");
        assert_eq!(ctx.values[0].value, "in_trial");
    }
}

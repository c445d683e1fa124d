//! Java naming rules.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::{upper_snake_constant, LanguageProfile, SdkLanguage};
use crate::naming::{to_lower_camel_case, to_snake_case};
use crate::openapi::Primitive;
use crate::schema::TypeDescriptor;

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
        "final", "finally", "float", "for", "goto", "if", "implements", "import",
        "instanceof", "int", "interface", "long", "native", "new", "null", "package",
        "private", "protected", "public", "return", "short", "static", "strictfp", "super",
        "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
        "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaProfile;

impl LanguageProfile for JavaProfile {
    fn language(&self) -> SdkLanguage {
        SdkLanguage::Java
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn class_file_name(&self, class_name: &str) -> String {
        format!("{class_name}.java")
    }

    fn module_dir_name(&self, module: &str) -> String {
        // package names are lower case without separators
        to_snake_case(module).replace('_', "")
    }

    fn field_name(&self, property: &str) -> String {
        let name = to_lower_camel_case(property);
        if self.is_reserved(&name) {
            format!("{name}Value")
        } else {
            name
        }
    }

    fn enum_constant(&self, value: &str) -> String {
        upper_snake_constant(value)
    }

    fn type_name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(p) => match p {
                Primitive::String => "String",
                Primitive::Integer => "Integer",
                Primitive::Long => "Long",
                Primitive::Number => "Number",
                Primitive::Boolean => "Boolean",
                Primitive::Timestamp => "Timestamp",
                Primitive::Date => "LocalDate",
                Primitive::Any => "Object",
            }
            .to_string(),
            TypeDescriptor::Opaque => "java.util.Map<String, Object>".to_string(),
            TypeDescriptor::InlineEnum(name)
            | TypeDescriptor::GlobalEnum(name)
            | TypeDescriptor::GlobalModel(name)
            | TypeDescriptor::Filter(name)
            | TypeDescriptor::SubModel { name, .. } => name.clone(),
            TypeDescriptor::List(inner) => format!("java.util.List<{}>", self.type_name(inner)),
            TypeDescriptor::Sort => "SortOrder".to_string(),
            TypeDescriptor::CompositeArray { name, .. } => format!("java.util.List<{name}>"),
        }
    }

    fn reserved_words(&self) -> &'static HashSet<&'static str> {
        &RESERVED
    }
}

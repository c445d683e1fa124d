//! Ruby naming rules. Types are only used in YARD comments.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::{upper_snake_constant, LanguageProfile, SdkLanguage};
use crate::naming::to_snake_case;
use crate::openapi::Primitive;
use crate::schema::TypeDescriptor;

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?",
        "do", "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next",
        "nil", "not", "or", "redo", "rescue", "retry", "return", "self", "super", "then",
        "true", "undef", "unless", "until", "when", "while", "yield",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct RubyProfile;

impl LanguageProfile for RubyProfile {
    fn language(&self) -> SdkLanguage {
        SdkLanguage::Ruby
    }

    fn file_extension(&self) -> &'static str {
        "rb"
    }

    fn class_file_name(&self, class_name: &str) -> String {
        format!("{}.rb", to_snake_case(class_name))
    }

    fn module_dir_name(&self, module: &str) -> String {
        to_snake_case(module)
    }

    fn field_name(&self, property: &str) -> String {
        to_snake_case(property)
    }

    fn enum_constant(&self, value: &str) -> String {
        upper_snake_constant(value)
    }

    fn type_name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(p) => match p {
                Primitive::String | Primitive::Date => "String",
                Primitive::Integer | Primitive::Long | Primitive::Timestamp => "Integer",
                Primitive::Number => "Float",
                Primitive::Boolean => "Boolean",
                Primitive::Any => "Object",
            }
            .to_string(),
            TypeDescriptor::Opaque | TypeDescriptor::Filter(_) | TypeDescriptor::Sort => {
                "Hash".to_string()
            }
            TypeDescriptor::InlineEnum(_) | TypeDescriptor::GlobalEnum(_) => "String".to_string(),
            TypeDescriptor::GlobalModel(name) | TypeDescriptor::SubModel { name, .. } => {
                name.clone()
            }
            TypeDescriptor::List(inner) => format!("Array<{}>", self.type_name(inner)),
            TypeDescriptor::CompositeArray { name, .. } => format!("Array<{name}>"),
        }
    }

    fn reserved_words(&self) -> &'static HashSet<&'static str> {
        &RESERVED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let ruby = RubyProfile;
        assert_eq!(ruby.type_name(&TypeDescriptor::InlineEnum("Status".into())), "String");
        assert_eq!(
            ruby.type_name(&TypeDescriptor::List(Box::new(TypeDescriptor::Primitive(
                Primitive::Number
            )))),
            "Array<Float>"
        );
    }

    #[test]
    fn test_names() {
        let ruby = RubyProfile;
        assert_eq!(ruby.class_file_name("CustomerCreateParams"), "customer_create_params.rb");
        assert!(ruby.is_reserved("end"));
    }
}

//! Python naming rules.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::{upper_snake_constant, LanguageProfile, SdkLanguage};
use crate::naming::to_snake_case;
use crate::openapi::Primitive;
use crate::schema::TypeDescriptor;

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
        "return", "try", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonProfile;

impl LanguageProfile for PythonProfile {
    fn language(&self) -> SdkLanguage {
        SdkLanguage::Python
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn class_file_name(&self, class_name: &str) -> String {
        format!("{}.py", to_snake_case(class_name))
    }

    fn module_dir_name(&self, module: &str) -> String {
        to_snake_case(module)
    }

    fn field_name(&self, property: &str) -> String {
        let name = to_snake_case(property);
        if self.is_reserved(&name) {
            format!("{name}_")
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
                Primitive::String | Primitive::Date => "str",
                Primitive::Integer | Primitive::Long | Primitive::Timestamp => "int",
                Primitive::Number => "float",
                Primitive::Boolean => "bool",
                Primitive::Any => "Any",
            }
            .to_string(),
            TypeDescriptor::Opaque => "Dict[str, Any]".to_string(),
            TypeDescriptor::InlineEnum(name) => format!("\"{name}\""),
            TypeDescriptor::GlobalEnum(name) => format!("enums.{name}"),
            TypeDescriptor::GlobalModel(name) => format!("\"{name}\""),
            TypeDescriptor::SubModel { name, .. } => format!("\"{name}\""),
            TypeDescriptor::Filter(name) => format!("filters.{name}"),
            TypeDescriptor::Sort => "filters.Sort".to_string(),
            TypeDescriptor::List(inner) => format!("List[{}]", self.type_name(inner)),
            TypeDescriptor::CompositeArray { name, .. } => format!("List[\"{name}\"]"),
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
        let python = PythonProfile;
        assert_eq!(python.type_name(&TypeDescriptor::Primitive(Primitive::Timestamp)), "int");
        assert_eq!(
            python.type_name(&TypeDescriptor::List(Box::new(TypeDescriptor::GlobalEnum(
                "Channel".into()
            )))),
            "List[enums.Channel]"
        );
        assert_eq!(
            python.type_name(&TypeDescriptor::Filter("TimestampFilter".into())),
            "filters.TimestampFilter"
        );
    }

    #[test]
    fn test_names() {
        let python = PythonProfile;
        assert_eq!(python.class_file_name("PaymentSource"), "payment_source.py");
        assert_eq!(python.field_name("from"), "from_");
        assert_eq!(python.field_name("autoCollection"), "auto_collection");
    }
}

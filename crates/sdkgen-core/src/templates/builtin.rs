//! Template sets compiled into the library.

use crate::languages::SdkLanguage;

/// Manifest and templates of one built-in set
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplates {
    pub manifest: &'static str,
    /// `(template name, source)` pairs
    pub templates: &'static [(&'static str, &'static str)],
}

mod java {
    pub const MANIFEST: &str = include_str!("../../templates/java/manifest.yaml");
    pub const TEMPLATES: &[(&str, &str)] = &[
        ("model.java.tera", include_str!("../../templates/java/model.java.tera")),
        ("params.java.tera", include_str!("../../templates/java/params.java.tera")),
        ("response.java.tera", include_str!("../../templates/java/response.java.tera")),
        ("service.java.tera", include_str!("../../templates/java/service.java.tera")),
        ("enum.java.tera", include_str!("../../templates/java/enum.java.tera")),
        ("exceptions.java.tera", include_str!("../../templates/java/exceptions.java.tera")),
    ];
}

mod python {
    pub const MANIFEST: &str = include_str!("../../templates/python/manifest.yaml");
    pub const TEMPLATES: &[(&str, &str)] = &[
        ("model.py.tera", include_str!("../../templates/python/model.py.tera")),
        ("params.py.tera", include_str!("../../templates/python/params.py.tera")),
        ("response.py.tera", include_str!("../../templates/python/response.py.tera")),
        ("service.py.tera", include_str!("../../templates/python/service.py.tera")),
        ("enum.py.tera", include_str!("../../templates/python/enum.py.tera")),
        ("exceptions.py.tera", include_str!("../../templates/python/exceptions.py.tera")),
    ];
}

mod ruby {
    pub const MANIFEST: &str = include_str!("../../templates/ruby/manifest.yaml");
    pub const TEMPLATES: &[(&str, &str)] = &[
        ("model.rb.tera", include_str!("../../templates/ruby/model.rb.tera")),
        ("params.rb.tera", include_str!("../../templates/ruby/params.rb.tera")),
        ("response.rb.tera", include_str!("../../templates/ruby/response.rb.tera")),
        ("service.rb.tera", include_str!("../../templates/ruby/service.rb.tera")),
        ("enum.rb.tera", include_str!("../../templates/ruby/enum.rb.tera")),
        ("exceptions.rb.tera", include_str!("../../templates/ruby/exceptions.rb.tera")),
    ];
}

pub fn builtin_templates(language: SdkLanguage) -> BuiltinTemplates {
    match language {
        SdkLanguage::Java => BuiltinTemplates {
            manifest: java::MANIFEST,
            templates: java::TEMPLATES,
        },
        SdkLanguage::Python => BuiltinTemplates {
            manifest: python::MANIFEST,
            templates: python::TEMPLATES,
        },
        SdkLanguage::Ruby => BuiltinTemplates {
            manifest: ruby::MANIFEST,
            templates: ruby::TEMPLATES,
        },
    }
}

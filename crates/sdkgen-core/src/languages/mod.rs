//! Target SDK languages.
//!
//! Each language supplies a [`LanguageProfile`]: how files and directories
//! are named, how field types are spelled and which words are reserved.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::languages::SdkLanguage;
//! use std::str::FromStr;
//!
//! let language = SdkLanguage::from_str("python").unwrap();
//! assert_eq!(language, SdkLanguage::Python);
//! assert_eq!(language.profile().class_file_name("CustomerCreateParams"), "customer_create_params.py");
//! ```

pub mod java;
pub mod python;
pub mod ruby;

// Internal imports (std, crate)
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::schema::TypeDescriptor;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Supported SDK languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkLanguage {
    #[default]
    Java,
    Python,
    Ruby,
}

impl FromStr for SdkLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(SdkLanguage::Java),
            "python" => Ok(SdkLanguage::Python),
            "ruby" => Ok(SdkLanguage::Ruby),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

impl SdkLanguage {
    /// Returns the language identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
            Self::Ruby => "ruby",
        }
    }

    /// Returns an iterator over all supported languages
    pub fn all() -> impl Iterator<Item = Self> {
        use SdkLanguage::*;
        [Java, Python, Ruby].iter().copied()
    }

    /// Naming and typing rules of the language
    pub fn profile(&self) -> &'static dyn LanguageProfile {
        match self {
            Self::Java => &java::JavaProfile,
            Self::Python => &python::PythonProfile,
            Self::Ruby => &ruby::RubyProfile,
        }
    }
}

impl fmt::Display for SdkLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language-specific naming and type rendering
pub trait LanguageProfile: Send + Sync {
    fn language(&self) -> SdkLanguage;

    /// File extension without the dot
    fn file_extension(&self) -> &'static str;

    /// File name of the source file holding a class
    fn class_file_name(&self, class_name: &str) -> String;

    /// Directory a module's files are written to
    fn module_dir_name(&self, module: &str) -> String;

    /// Identifier of a field named `property` in the document
    fn field_name(&self, property: &str) -> String;

    /// Constant name of an enum value
    fn enum_constant(&self, value: &str) -> String;

    /// Type of a field as written in source
    fn type_name(&self, ty: &TypeDescriptor) -> String;

    fn reserved_words(&self) -> &'static HashSet<&'static str>;

    fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words().contains(word)
    }
}

/// Enum constants shared by all languages: UPPER_SNAKE, never starting with a digit
pub(crate) fn upper_snake_constant(value: &str) -> String {
    let constant = crate::naming::to_upper_snake_case(value);
    match constant.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{constant}"),
        None => "EMPTY".to_string(),
        _ => constant,
    }
}

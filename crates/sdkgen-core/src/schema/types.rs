//! Field, enum and sub-model representations produced by extraction.

use std::fmt;

use serde::Serialize;

use crate::openapi::Primitive;

/// Ancestry of a sub-model from its root schema, one segment per property.
///
/// The path is the permanent identity of a sub-model: renaming changes
/// [`Model::name`], never the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelPath(Vec<String>);

impl ModelPath {
    /// Path of the root schema itself
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segment right before the last one
    pub fn parent_segment(&self) -> Option<&str> {
        let len = self.0.len();
        (len >= 2).then(|| self.0[len - 2].as_str())
    }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("_"))
    }
}

impl Serialize for ModelPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ModelPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(|s| s.as_ref().to_string()).collect())
    }
}

/// Resolved type of a field
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Object without declared properties
    Opaque,
    /// Enum declared inline on the property
    InlineEnum(String),
    /// Enum declared once for the whole API
    GlobalEnum(String),
    /// Inline object emitted as a sub-model of the artifact
    SubModel { path: ModelPath, name: String },
    /// Reference to a component schema emitted as its own model
    GlobalModel(String),
    List(Box<TypeDescriptor>),
    /// Filter parameter, carrying the SDK filter class name
    Filter(String),
    Sort,
    /// Parallel-array request body emitted per index
    CompositeArray { path: ModelPath, name: String },
}

impl TypeDescriptor {
    /// Innermost type of nested lists
    pub fn element(&self) -> &TypeDescriptor {
        match self {
            Self::List(inner) => inner.element(),
            other => other,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Path of the sub-model this type points at, if any
    pub fn sub_model_path(&self) -> Option<&ModelPath> {
        match self.element() {
            Self::SubModel { path, .. } | Self::CompositeArray { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Point a sub-model reference at a new name
    pub(crate) fn rename_sub_model(&mut self, new_name: &str) {
        match self {
            Self::List(inner) => inner.rename_sub_model(new_name),
            Self::SubModel { name, .. } | Self::CompositeArray { name, .. } => {
                *name = new_name.to_string();
            }
            _ => {}
        }
    }
}

/// Filter parameter metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterMeta {
    pub sdk_filter_name: String,
    pub supported_operations: Vec<String>,
    pub enum_values: Vec<String>,
}

/// A single property of a model, params or response class
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name as written in the document
    pub name: String,
    pub type_: TypeDescriptor,
    pub required: bool,
    pub deprecated: bool,
    pub description: Option<String>,
    pub filter: Option<FilterMeta>,
    /// Sortable attributes of a sort parameter
    pub sort_attributes: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            type_,
            required: false,
            deprecated: false,
            description: None,
            filter: None,
            sort_attributes: Vec::new(),
        }
    }

    pub fn is_composite_array(&self) -> bool {
        matches!(self.type_, TypeDescriptor::CompositeArray { .. })
    }
}

/// Inline enumeration attached to a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumField {
    /// Enum type name (UpperCamel)
    pub name: String,
    /// Property the enum was declared on
    pub property: String,
    pub values: Vec<String>,
    pub deprecated: bool,
}

/// Sub-model of an artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub path: ModelPath,
    pub fields: Vec<Field>,
    pub enum_fields: Vec<EnumField>,
    pub sub_models: Vec<Model>,
}

impl Model {
    /// This model followed by all nested models, depth-first
    pub fn flatten(&self) -> Vec<&Model> {
        let mut out = vec![self];
        for sub in &self.sub_models {
            out.extend(sub.flatten());
        }
        out
    }
}

/// Result of walking one schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub fields: Vec<Field>,
    pub enum_fields: Vec<EnumField>,
    pub sub_models: Vec<Model>,
}

impl Extraction {
    /// All sub-models, nested ones included, depth-first in declaration order
    pub fn all_sub_models(&self) -> Vec<&Model> {
        self.sub_models.iter().flat_map(Model::flatten).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_display_and_parent() {
        let path = ModelPath::root().child("card").child("billing_address");
        assert_eq!(path.to_string(), "card_billing_address");
        assert_eq!(path.parent_segment(), Some("card"));
        assert_eq!(ModelPath::root().child("card").parent_segment(), None);
        assert!(ModelPath::root().is_root());
    }

    #[test]
    fn test_model_path_identity_is_segment_based() {
        let a: ModelPath = ["a_b", "c"].into_iter().collect();
        let b: ModelPath = ["a", "b_c"].into_iter().collect();
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_rename_reaches_through_lists() {
        let path = ModelPath::root().child("line_items");
        let mut ty = TypeDescriptor::List(Box::new(TypeDescriptor::SubModel {
            path: path.clone(),
            name: "LineItem".into(),
        }));
        assert_eq!(ty.sub_model_path(), Some(&path));
        ty.rename_sub_model("InvoiceLineItem");
        assert_eq!(
            ty.element(),
            &TypeDescriptor::SubModel {
                path,
                name: "InvoiceLineItem".into()
            }
        );
    }
}

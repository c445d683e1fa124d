//! Schema classification and field/model extraction.
//!
//! [`Classifier`] decides what kind of type a schema becomes, [`Extractor`]
//! walks a schema into fields, inline enums and nested sub-models keyed by
//! their [`ModelPath`].

pub mod classify;
pub mod extract;
pub mod types;

pub use classify::{classify, Classifier, SchemaClass, SchemaUsage};
pub use extract::{global_enum_name, Extractor};
pub use types::{EnumField, Extraction, Field, FilterMeta, Model, ModelPath, TypeDescriptor};

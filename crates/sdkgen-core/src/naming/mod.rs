//! Identifier naming: case conversion, sub-model collision resolution and
//! operation/method naming.

pub mod case;
pub mod mapper;
pub mod methods;
pub mod resolver;

pub use case::{
    capitalize, pluralize, singularize, to_lower_camel_case, to_snake_case, to_upper_camel_case,
    to_upper_snake_case,
};
pub use mapper::{map_operations, OperationDescriptor};
pub use methods::{
    apply_batch_prefix, avoid_keyword, derive_artifact_name, derive_method_name, derive_module,
    resolve_method_name, NamingContext,
};
pub use resolver::{resolve, NameResolution};

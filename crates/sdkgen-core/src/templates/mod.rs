//! Template sets, their manifests and rendering.

pub mod builtin;
pub mod dir;
pub mod kind;
pub mod manager;
pub mod manifest;

pub use dir::*;
pub use kind::*;
pub use manager::*;
pub use manifest::*;

//! sdkgen Core Library
//!
//! This library generates multi-language SDK sources (models, params,
//! responses, services, enums and exceptions) from OpenAPI documents
//! annotated with `x-sdk-` vendor extensions.
//!
//! The pipeline reads extensions ([`openapi`]), classifies and extracts
//! schemas ([`schema`]), names operations and sub-models ([`naming`]) and
//! renders each artifact kind through [`builders`] into an ordered list of
//! [`FileOp`]s that [`FileOpExecutor`] applies.

pub mod builders;
pub mod config;
pub mod error;
pub mod fileops;
pub mod generate;
pub mod languages;
pub mod naming;
pub mod openapi;
pub mod schema;
pub mod templates;

pub use crate::{
    builders::{builder_for, ArtifactBuilder, GenerationContext},
    config::Config,
    error::{Error, Result},
    fileops::{ApplyReport, FileOp, FileOpExecutor, FileOps},
    generate::{generate, plan, GenerationReport},
    languages::SdkLanguage,
    openapi::{ApiDocument, OpenApiContext},
    templates::{ArtifactKind, TemplateDir, TemplateManager},
};

//! Artifact builders.
//!
//! Each [`ArtifactKind`] has a builder turning the document into the file ops
//! of that artifact. Builders render through the [`TemplateManager`] and never
//! touch the file system themselves.

pub mod context;
pub mod enums;
pub mod exceptions;
pub mod models;
pub mod params;
pub mod responses;
pub mod services;

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use self::context::BaseContext;
use crate::fileops::{FileOp, FileOps};
use crate::languages::LanguageProfile;
use crate::naming::{map_operations, NamingContext, OperationDescriptor};
use crate::openapi::ApiDocument;
use crate::templates::{ArtifactKind, ArtifactTemplate, TemplateManager};
use crate::{Error, Result};

pub use context::{ClassContext, EnumContext, EnumFileContext, FieldContext, ModelContext};

/// Turns a loaded document into the file ops of one artifact kind
pub trait ArtifactBuilder {
    fn kind(&self) -> ArtifactKind;

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>>;
}

/// Builder of an artifact kind
pub fn builder_for(kind: ArtifactKind) -> Box<dyn ArtifactBuilder> {
    match kind {
        ArtifactKind::Models => Box::new(models::ModelsBuilder),
        ArtifactKind::GetParams => Box::new(params::ParamsBuilder::get()),
        ArtifactKind::PostParams => Box::new(params::ParamsBuilder::post()),
        ArtifactKind::GetResponses => Box::new(responses::ResponsesBuilder::get()),
        ArtifactKind::PostResponses => Box::new(responses::ResponsesBuilder::post()),
        ArtifactKind::Services => Box::new(services::ServicesBuilder),
        ArtifactKind::Enums => Box::new(enums::EnumsBuilder),
        ArtifactKind::Exceptions => Box::new(exceptions::ExceptionsBuilder),
    }
}

/// Everything a builder reads during one generation run
#[derive(Debug)]
pub struct GenerationContext<'a> {
    pub sdk_name: String,
    pub document: &'a ApiDocument,
    /// Operations selected for generation, in document order
    pub operations: Vec<OperationDescriptor>,
    pub naming: NamingContext,
    pub templates: &'a TemplateManager,
    pub output_dir: PathBuf,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        sdk_name: impl Into<String>,
        document: &'a ApiDocument,
        templates: &'a TemplateManager,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let profile = templates.language().profile();
        let naming = NamingContext::from_registry(&document.schemas)
            .with_reserved_words(profile.reserved_words().iter());
        let visible: Vec<_> = document
            .operations
            .iter()
            .filter(|op| {
                if op.is_hidden() {
                    log::debug!("Skipping hidden operation {} {}", op.method, op.path);
                }
                !op.is_hidden()
            })
            .cloned()
            .collect();
        let operations = map_operations(&naming, &visible);

        Self {
            sdk_name: sdk_name.into(),
            document,
            operations,
            naming,
            templates,
            output_dir: output_dir.into(),
        }
    }

    /// Keep only operations selected by `include` (all when empty) and not by `exclude`
    pub fn with_operation_filter(mut self, include: &[String], exclude: &[String]) -> Self {
        self.operations.retain(|op| {
            let included = include.is_empty() || include.iter().any(|name| op.matches(name));
            included && !exclude.iter().any(|name| op.matches(name))
        });
        self
    }

    pub fn profile(&self) -> &'static dyn LanguageProfile {
        self.templates.language().profile()
    }

    /// Values shared by every template of this run
    pub fn base_context(&self, namespace: Vec<String>) -> BaseContext {
        BaseContext {
            sdk_name: self.sdk_name.clone(),
            language: self.templates.language(),
            namespace,
            api_version: self.document.version.clone(),
            base_url: self.document.base_url.clone(),
        }
    }

    /// Manifest entry of `kind`, after checking the run can produce output
    pub fn prepare(&self, kind: ArtifactKind) -> Result<&ArtifactTemplate> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config("No output directory configured"));
        }
        self.templates.artifact(kind)
    }

    /// Operations with the given HTTP method
    pub fn operations_with(
        &self,
        method: crate::openapi::HttpMethod,
    ) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter().filter(move |op| op.method == method)
    }
}

/// Output directory of an artifact, with the module sub-directory if given
pub(crate) fn artifact_dir(
    ops: &mut FileOps,
    ctx: &GenerationContext<'_>,
    artifact: &ArtifactTemplate,
    module: Option<&str>,
) -> PathBuf {
    let relative = match module {
        Some(module) => Path::new(&artifact.output_dir).join(ctx.profile().module_dir_name(module)),
        None => PathBuf::from(&artifact.output_dir),
    };
    ops.create_directory(&ctx.output_dir, relative)
}

/// Namespace segments of a generated file, from the SDK name down
pub(crate) fn namespace(ctx: &GenerationContext<'_>, artifact: &ArtifactTemplate, module: Option<&str>) -> Vec<String> {
    let mut segments = vec![ctx.sdk_name.clone()];
    segments.extend(
        artifact
            .output_dir
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from),
    );
    if let Some(module) = module {
        segments.push(ctx.profile().module_dir_name(module));
    }
    segments
}

/// Stable sort by `sort-order`; entries without one keep their place after all sorted ones
pub(crate) fn sort_by_order<T>(items: &mut [T], order: impl Fn(&T) -> Option<i64>) {
    items.sort_by_key(|item| order(item).unwrap_or(i64::MAX));
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::openapi::{ApiDocument, OpenApiContext};
    use crate::templates::TemplateManager;
    use crate::languages::SdkLanguage;

    pub fn document(value: serde_json::Value) -> ApiDocument {
        ApiDocument::from_context(&OpenApiContext::new(value)).unwrap()
    }

    pub fn templates(language: SdkLanguage) -> TemplateManager {
        TemplateManager::builtin(language).unwrap()
    }

    /// `(relative path, content)` of every written file
    pub fn written(ops: &[crate::fileops::FileOp], root: &std::path::Path) -> Vec<(String, String)> {
        ops.iter()
            .filter_map(|op| match op {
                crate::fileops::FileOp::WriteString { content, .. } => Some((
                    op.path()
                        .strip_prefix(root)
                        .unwrap()
                        .to_string_lossy()
                        .into_owned(),
                    content.clone(),
                )),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::languages::SdkLanguage;
    use serde_json::json;

    fn spec() -> serde_json::Value {
        json!({
            "openapi": "3.0.0",
            "info": {"title": "Billing", "version": "2.0"},
            "paths": {
                "/customers": {
                    "get": {"operationId": "list_customers", "x-sdk-operation-is-list": true, "responses": {}},
                    "post": {"operationId": "create_customer", "responses": {}}
                },
                "/internal/audit": {
                    "get": {"operationId": "audit", "x-sdk-hidden-from-sdk": true, "responses": {}}
                }
            }
        })
    }

    #[test]
    fn test_context_skips_hidden_and_filters() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Python);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        assert_eq!(ctx.operations.len(), 2);

        let only_list = GenerationContext::new("billing", &document, &templates, "/out")
            .with_operation_filter(&["customer.list".to_string()], &[]);
        assert_eq!(only_list.operations.len(), 1);
        assert_eq!(only_list.operations[0].method_name, "list");

        let without_create = GenerationContext::new("billing", &document, &templates, "/out")
            .with_operation_filter(&[], &["create_customer".to_string()]);
        assert_eq!(without_create.operations.len(), 1);
    }

    #[test]
    fn test_prepare_requires_output_dir() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Java);
        let ctx = GenerationContext::new("billing", &document, &templates, "");
        assert!(matches!(ctx.prepare(ArtifactKind::Models), Err(Error::Config(_))));
        let ops = builder_for(ArtifactKind::Services).build(&ctx);
        assert!(matches!(ops, Err(Error::Config(_))));
    }

    #[test]
    fn test_sort_by_order_is_stable_and_puts_missing_last() {
        let mut items = vec![("a", None), ("b", Some(2)), ("c", Some(1)), ("d", None), ("e", Some(2))];
        sort_by_order(&mut items, |(_, order)| *order);
        let names: Vec<_> = items.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["c", "b", "e", "a", "d"]);
    }

    #[test]
    fn test_every_kind_has_a_builder() {
        for kind in ArtifactKind::all() {
            assert_eq!(builder_for(kind).kind(), kind);
        }
    }
}

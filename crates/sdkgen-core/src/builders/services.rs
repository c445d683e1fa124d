//! One service class per module, listing its operations.

use indexmap::IndexMap;
use serde::Serialize;

use super::context::BaseContext;
use super::params::{has_params, params_class_name};
use super::responses::{response_class_name, response_extraction};
use super::{artifact_dir, namespace, sort_by_order, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::{to_upper_camel_case, OperationDescriptor};
use crate::schema::{Extractor, SchemaUsage};
use crate::templates::ArtifactKind;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceOperationContext {
    #[serde(flatten)]
    pub operation: OperationDescriptor,
    /// `None` when the operation takes no parameters
    pub params_class: Option<String>,
    /// `None` when the operation has no response class
    pub response_class: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceContext {
    #[serde(flatten)]
    pub base: BaseContext,
    pub class_name: String,
    pub module: String,
    pub operations: Vec<ServiceOperationContext>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesBuilder;

impl ServicesBuilder {
    /// Operations grouped by module; modules ordered by their lowest sort order
    fn modules<'c>(ctx: &'c GenerationContext<'_>) -> Vec<(&'c str, Vec<&'c OperationDescriptor>)> {
        let mut grouped: IndexMap<&str, Vec<&OperationDescriptor>> = IndexMap::new();
        for op in &ctx.operations {
            grouped.entry(op.module.as_str()).or_default().push(op);
        }
        let mut modules: Vec<_> = grouped.into_iter().collect();
        for (_, ops) in &mut modules {
            sort_by_order(ops, |op| op.sort_order);
        }
        sort_by_order(&mut modules, |(_, ops)| {
            ops.iter().filter_map(|op| op.sort_order).min()
        });
        modules
    }
}

impl ArtifactBuilder for ServicesBuilder {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Services
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let profile = ctx.profile();
        let extractor = Extractor::new(&ctx.document.schemas, SchemaUsage::Response);

        let mut ops = FileOps::new();
        let dir = artifact_dir(&mut ops, ctx, artifact, None);
        let modules = Self::modules(ctx);
        for (module, operations) in &modules {
            let class_name = format!("{}Service", to_upper_camel_case(module));
            let operations = operations
                .iter()
                .map(|op| ServiceOperationContext {
                    operation: (*op).clone(),
                    params_class: has_params(op).then(|| params_class_name(op)),
                    response_class: response_extraction(&extractor, op)
                        .map(|_| response_class_name(op)),
                })
                .collect();
            let service = ServiceContext {
                base: ctx.base_context(namespace(ctx, artifact, None)),
                class_name: class_name.clone(),
                module: module.to_string(),
                operations,
            };

            let content = ctx.templates.render(&artifact.template, &service, &class_name)?;
            log::debug!("Rendered service {}", class_name);
            ops.write_string(&dir, profile.class_file_name(&class_name), content);
        }
        log::info!("Built {} services", modules.len());
        Ok(ops.into_vec())
    }
}

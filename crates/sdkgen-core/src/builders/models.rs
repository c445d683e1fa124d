//! Model classes of component object schemas.

use super::context::ClassContext;
use super::{artifact_dir, namespace, sort_by_order, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::{resolve, to_snake_case, to_upper_camel_case};
use crate::openapi::{ExtensionKey, SchemaNode};
use crate::schema::{Extractor, ModelPath, SchemaUsage};
use crate::templates::ArtifactKind;
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelsBuilder;

impl ModelsBuilder {
    /// Component schemas that become models, in generation order
    fn model_schemas<'d>(ctx: &GenerationContext<'d>) -> Vec<(&'d str, &'d SchemaNode)> {
        let mut schemas: Vec<_> = ctx
            .document
            .schemas
            .iter()
            .filter(|(name, schema)| {
                if schema.is_hidden() {
                    log::debug!("Skipping hidden schema '{}'", name);
                    return false;
                }
                schema.is_object() && !schema.properties.is_empty()
            })
            .map(|(name, schema)| (name.as_str(), schema))
            .collect();
        sort_by_order(&mut schemas, |(_, schema)| {
            schema.extensions.integer(ExtensionKey::SortOrder)
        });
        schemas
    }
}

impl ArtifactBuilder for ModelsBuilder {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Models
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let profile = ctx.profile();
        let extractor = Extractor::new(&ctx.document.schemas, SchemaUsage::Response);

        let mut ops = FileOps::new();
        let dir = artifact_dir(&mut ops, ctx, artifact, None);
        let schemas = Self::model_schemas(ctx);
        for (name, schema) in &schemas {
            let class_name = to_upper_camel_case(name);
            let module = to_snake_case(name);
            let extraction = extractor.extract(schema, &ModelPath::root());
            let extraction = resolve(&extraction, &module).apply(&extraction);

            let mut class = ClassContext::new(
                profile,
                ctx.base_context(namespace(ctx, artifact, None)),
                &class_name,
                &extraction,
            );
            class.module = Some(module);
            class.description = schema.description.clone();
            class.deprecated = schema.deprecated;

            let content = ctx.templates.render(&artifact.template, &class, &class_name)?;
            log::debug!("Rendered model {}", class_name);
            ops.write_string(&dir, profile.class_file_name(&class_name), content);
        }
        log::info!("Built {} models", schemas.len());
        Ok(ops.into_vec())
    }
}

//! API-wide enums: component enum schemas and inline enums flagged global.

use indexmap::IndexMap;

use super::context::{EnumContext, EnumFileContext};
use super::{artifact_dir, namespace, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::{singularize, to_upper_camel_case};
use crate::openapi::SchemaNode;
use crate::schema::global_enum_name;
use crate::templates::ArtifactKind;
use crate::Result;

/// A global enum found in the document
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalEnum {
    pub name: String,
    pub values: Vec<String>,
    pub description: Option<String>,
    pub deprecated: bool,
}

/// Every global enum of the document by name, first declaration wins
pub fn collect_global_enums(ctx: &GenerationContext<'_>) -> IndexMap<String, GlobalEnum> {
    let mut found = IndexMap::new();
    for (name, schema) in ctx.document.schemas.iter() {
        if schema.is_hidden() {
            continue;
        }
        if schema.is_enum() {
            insert(&mut found, to_upper_camel_case(name), schema);
        }
        collect_flagged(schema, &mut found);
    }
    for op in &ctx.operations {
        let schemas = op
            .request_schema
            .iter()
            .chain(op.response_schema.iter());
        for schema in schemas {
            collect_flagged(schema, &mut found);
        }
    }
    found
}

fn insert(found: &mut IndexMap<String, GlobalEnum>, name: String, schema: &SchemaNode) {
    found.entry(name.clone()).or_insert_with(|| GlobalEnum {
        name,
        values: schema.enum_values.clone(),
        description: schema.description.clone(),
        deprecated: schema.deprecated,
    });
}

/// Inline enums below `schema` flagged as global; references are not followed
fn collect_flagged(schema: &SchemaNode, found: &mut IndexMap<String, GlobalEnum>) {
    for (property, prop) in &schema.properties {
        if prop.is_hidden() {
            continue;
        }
        visit(&to_upper_camel_case(property), prop, found);
        if let Some(items) = prop.items.as_deref() {
            visit(&to_upper_camel_case(&singularize(property)), items, found);
        }
    }
}

fn visit(type_name: &str, node: &SchemaNode, found: &mut IndexMap<String, GlobalEnum>) {
    if node.reference().is_some() {
        return;
    }
    if node.is_enum() {
        if let Some(name) = global_enum_name(type_name, node) {
            insert(found, name, node);
        }
    }
    collect_flagged(node, found);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnumsBuilder;

impl ArtifactBuilder for EnumsBuilder {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Enums
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let profile = ctx.profile();
        let enums = collect_global_enums(ctx);

        let mut ops = FileOps::new();
        let dir = artifact_dir(&mut ops, ctx, artifact, None);
        for global in enums.values() {
            let values = EnumContext::new(profile, &global.name, "", &global.values, global.deprecated).values;
            let file = EnumFileContext {
                base: ctx.base_context(namespace(ctx, artifact, None)),
                class_name: global.name.clone(),
                description: global.description.clone(),
                deprecated: global.deprecated,
                values,
            };
            let content = ctx.templates.render(&artifact.template, &file, &global.name)?;
            log::debug!("Rendered enum {}", global.name);
            ops.write_string(&dir, profile.class_file_name(&global.name), content);
        }
        log::info!("Built {} enums", enums.len());
        Ok(ops.into_vec())
    }
}

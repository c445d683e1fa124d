//! Response classes of operations with a success schema.

use super::context::ClassContext;
use super::{artifact_dir, namespace, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::{resolve, OperationDescriptor};
use crate::openapi::HttpMethod;
use crate::schema::{Extraction, Extractor, ModelPath, SchemaUsage};
use crate::templates::ArtifactKind;
use crate::Result;

/// Property holding the entries of a list response
const LIST_PROPERTY: &str = "list";

#[derive(Debug, Clone, Copy)]
pub struct ResponsesBuilder {
    method: HttpMethod,
}

impl ResponsesBuilder {
    pub fn get() -> Self {
        Self {
            method: HttpMethod::Get,
        }
    }

    pub fn post() -> Self {
        Self {
            method: HttpMethod::Post,
        }
    }
}

/// Class name of the response of an operation
pub fn response_class_name(op: &OperationDescriptor) -> String {
    format!("{}Response", op.artifact_name)
}

/// Response class extraction of an operation, `None` when there is nothing to emit
pub fn response_extraction(extractor: &Extractor<'_>, op: &OperationDescriptor) -> Option<Extraction> {
    let schema = op.response_schema.as_ref()?;
    let mut extraction = extractor.extract(schema, &ModelPath::root());
    if extraction.is_empty() {
        return None;
    }
    if op.is_list {
        name_list_item(&mut extraction, &format!("{}Item", op.artifact_name));
    }
    Some(resolve(&extraction, &op.module).apply(&extraction))
}

/// Give the model of the `list` entries the operation-specific item name
fn name_list_item(extraction: &mut Extraction, item_name: &str) {
    let list_path = ModelPath::root().child(LIST_PROPERTY);
    for model in &mut extraction.sub_models {
        if model.path == list_path {
            model.name = item_name.to_string();
        }
    }
    for field in &mut extraction.fields {
        if field.type_.sub_model_path() == Some(&list_path) {
            field.type_.rename_sub_model(item_name);
        }
    }
}

impl ArtifactBuilder for ResponsesBuilder {
    fn kind(&self) -> ArtifactKind {
        match self.method {
            HttpMethod::Get => ArtifactKind::GetResponses,
            HttpMethod::Post => ArtifactKind::PostResponses,
        }
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let profile = ctx.profile();
        let extractor = Extractor::new(&ctx.document.schemas, SchemaUsage::Response);

        let mut ops = FileOps::new();
        let mut count = 0;
        for op in ctx.operations_with(self.method) {
            let Some(extraction) = response_extraction(&extractor, op) else {
                log::debug!("{} {} has no response properties, skipping", op.method, op.path);
                continue;
            };

            let class_name = response_class_name(op);
            let module = Some(op.module.as_str());
            let mut class = ClassContext::new(
                profile,
                ctx.base_context(namespace(ctx, artifact, module)),
                &class_name,
                &extraction,
            );
            class.module = Some(op.module.clone());
            class.description = op.description.clone();
            class.deprecated = op.deprecated;
            class.operation = Some(op.clone());

            let dir = artifact_dir(&mut ops, ctx, artifact, module);
            let content = ctx.templates.render(&artifact.template, &class, &class_name)?;
            log::debug!("Rendered response {}", class_name);
            ops.write_string(&dir, profile.class_file_name(&class_name), content);
            count += 1;
        }
        log::info!("Built {} {} response classes", count, self.method);
        Ok(ops.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::languages::SdkLanguage;
    use crate::schema::TypeDescriptor;
    use serde_json::json;
    use std::path::Path;

    fn spec() -> serde_json::Value {
        json!({
            "openapi": "3.0.0",
            "info": {"title": "Billing", "version": "2.0"},
            "paths": {
                "/customers": {
                    "get": {
                        "operationId": "list_customers",
                        "x-sdk-operation-is-list": true,
                        "responses": {"200": {"content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {
                                "list": {"type": "array", "items": {
                                    "type": "object",
                                    "properties": {"customer": {"$ref": "#/components/schemas/Customer"}}
                                }},
                                "next_offset": {"type": "string"}
                            }
                        }}}}}
                    },
                    "post": {
                        "operationId": "create_customer",
                        "responses": {"200": {"content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {"customer": {"$ref": "#/components/schemas/Customer"}}
                        }}}}}
                    }
                },
                "/customers/{customer-id}/delete": {
                    "post": {
                        "operationId": "delete_customer",
                        "responses": {"200": {"content": {"application/json": {"schema": {"type": "object"}}}}}
                    }
                }
            },
            "components": {"schemas": {
                "Customer": {"type": "object", "properties": {"id": {"type": "string"}}}
            }}
        })
    }

    #[test]
    fn test_list_item_is_named_after_operation() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Ruby);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let extractor = Extractor::new(&document.schemas, SchemaUsage::Response);
        let extraction = response_extraction(&extractor, &ctx.operations[0]).unwrap();
        assert_eq!(extraction.sub_models[0].name, "ListCustomersItem");
        assert_eq!(
            extraction.fields[0].type_,
            TypeDescriptor::List(Box::new(TypeDescriptor::SubModel {
                path: ModelPath::root().child("list"),
                name: "ListCustomersItem".into(),
            }))
        );
    }

    #[test]
    fn test_responses_skip_empty_schemas() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Ruby);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");

        let get = ResponsesBuilder::get().build(&ctx).unwrap();
        let files = written(&get, Path::new("/out"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "responses/customer/list_customers_response.rb");
        assert!(files[0].1.contains("class ListCustomersResponse"));
        assert!(files[0].1.contains("class ListCustomersItem"));

        let post = ResponsesBuilder::post().build(&ctx).unwrap();
        let files = written(&post, Path::new("/out"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "responses/customer/create_customer_response.rb");
    }
}

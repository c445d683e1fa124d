//! Request parameter classes: query parameters of GET operations and request
//! bodies of POST operations.

use super::context::ClassContext;
use super::{artifact_dir, namespace, ArtifactBuilder, GenerationContext};
use crate::fileops::{FileOp, FileOps};
use crate::naming::{resolve, OperationDescriptor};
use crate::openapi::HttpMethod;
use crate::schema::{Extraction, Extractor, ModelPath, SchemaUsage};
use crate::templates::ArtifactKind;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct ParamsBuilder {
    method: HttpMethod,
}

impl ParamsBuilder {
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

/// Whether an operation gets a params class
pub fn has_params(op: &OperationDescriptor) -> bool {
    match op.method {
        HttpMethod::Get => op.request_schema.is_some(),
        HttpMethod::Post => op.has_request_body,
    }
}

/// Class name of the parameters of an operation
pub fn params_class_name(op: &OperationDescriptor) -> String {
    format!("{}Params", op.artifact_name)
}

impl ArtifactBuilder for ParamsBuilder {
    fn kind(&self) -> ArtifactKind {
        match self.method {
            HttpMethod::Get => ArtifactKind::GetParams,
            HttpMethod::Post => ArtifactKind::PostParams,
        }
    }

    fn build(&self, ctx: &GenerationContext<'_>) -> Result<Vec<FileOp>> {
        let artifact = ctx.prepare(self.kind())?;
        let profile = ctx.profile();
        let extractor = Extractor::new(&ctx.document.schemas, SchemaUsage::Request);

        let mut ops = FileOps::new();
        let mut count = 0;
        for op in ctx.operations_with(self.method) {
            if !has_params(op) {
                continue;
            }
            let extraction = match &op.request_schema {
                Some(schema) => extractor.extract(schema, &ModelPath::root()),
                None => {
                    log::warn!(
                        "{} {} has a request body without a usable schema, emitting empty params",
                        op.method,
                        op.path
                    );
                    Extraction::default()
                }
            };
            let extraction = resolve(&extraction, &op.module).apply(&extraction);

            let class_name = params_class_name(op);
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
            log::debug!("Rendered params {}", class_name);
            ops.write_string(&dir, profile.class_file_name(&class_name), content);
            count += 1;
        }
        log::info!("Built {} {} params classes", count, self.method);
        Ok(ops.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::languages::SdkLanguage;
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
                        "parameters": [
                            {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                            {
                                "name": "email",
                                "in": "query",
                                "x-sdk-is-filter-parameter": true,
                                "schema": {
                                    "type": "object",
                                    "properties": {"is": {"type": "string"}, "starts_with": {"type": "string"}}
                                }
                            }
                        ],
                        "responses": {}
                    },
                    "post": {
                        "operationId": "create_customer",
                        "requestBody": {"content": {"application/x-www-form-urlencoded": {"schema": {
                            "type": "object",
                            "required": ["first_name"],
                            "properties": {
                                "first_name": {"type": "string"},
                                "billing_address": {"type": "object", "properties": {"city": {"type": "string"}}}
                            }
                        }}}},
                        "responses": {}
                    }
                },
                "/customers/{customer-id}": {
                    "get": {"operationId": "retrieve_customer", "responses": {}},
                    "post": {
                        "operationId": "update_customer",
                        "requestBody": {"content": {"text/plain": {}}},
                        "responses": {}
                    }
                }
            }
        })
    }

    #[test]
    fn test_get_params_only_for_query_operations() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Python);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let ops = ParamsBuilder::get().build(&ctx).unwrap();
        let files = written(&ops, Path::new("/out"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "params/customer/list_customers_params.py");
        assert!(files[0].1.contains("class ListCustomersParams"));
        assert!(files[0].1.contains("filters.StringFilter"));
    }

    #[test]
    fn test_post_params_with_and_without_schema() {
        let document = document(spec());
        let templates = templates(SdkLanguage::Java);
        let ctx = GenerationContext::new("billing", &document, &templates, "/out");
        let ops = ParamsBuilder::post().build(&ctx).unwrap();
        assert_eq!(ops[0].path(), Path::new("/out/params/customer"));
        let files = written(&ops, Path::new("/out"));
        let names: Vec<_> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "params/customer/CreateCustomerParams.java",
                "params/customer/UpdateCustomerParams.java"
            ]
        );
        assert!(files[0].1.contains("BillingAddress"));
        assert!(files[1].1.contains("class UpdateCustomerParams"));
        // directory created once for both files
        assert_eq!(ops.len(), 3);
    }
}

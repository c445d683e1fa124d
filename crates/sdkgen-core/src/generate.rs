//! Code generation entry points.
//!
//! [`plan`] is the synchronous core: it runs the artifact builders and
//! concatenates their file ops. [`generate`] wraps it with loading the
//! document and templates, applying the ops and running hooks.

// Internal imports (std, crate)
use std::path::PathBuf;

use crate::builders::{builder_for, GenerationContext};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fileops::{ApplyReport, FileOp, FileOpExecutor, FileOps};
use crate::openapi::{ApiDocument, OpenApiContext};
use crate::templates::{ArtifactKind, TemplateManifest, TemplateManager};

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Every planned file op, in application order
    pub planned: Vec<FileOp>,
    /// `None` on a dry run
    pub applied: Option<ApplyReport>,
}

/// Run the builders of `kinds` in order and concatenate their file ops.
///
/// Directories requested by several builders are created once.
pub fn plan(ctx: &GenerationContext<'_>, kinds: &[ArtifactKind]) -> Result<Vec<FileOp>> {
    let mut ops = FileOps::new();
    for kind in kinds {
        log::debug!("Building {}", kind);
        let built = builder_for(*kind).build(ctx)?;
        ops.extend(built);
    }
    Ok(ops.into_vec())
}

/// Requested kinds in manifest order; requested kinds the manifest lacks come last
fn ordered_kinds(manifest: &TemplateManifest, requested: &[ArtifactKind]) -> Vec<ArtifactKind> {
    if requested.is_empty() {
        return manifest.artifacts.keys().copied().collect();
    }
    let mut kinds: Vec<ArtifactKind> = manifest
        .artifacts
        .keys()
        .copied()
        .filter(|kind| requested.contains(kind))
        .collect();
    for kind in requested {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    kinds
}

/// Main entry point for code generation
pub async fn generate(config: &Config, dry_run: bool) -> Result<GenerationReport> {
    if config.output_dir.is_empty() {
        return Err(Error::config("No output directory configured"));
    }

    // 1. Load the OpenAPI document
    let spec = OpenApiContext::from_file_or_url(&config.openapi_schema_path).await?;
    let mut document = ApiDocument::from_context(&spec)?;
    if let Some(base_url) = &config.base_url {
        document.base_url = Some(base_url.to_string());
    }

    // 2. Initialize the template manager
    let template_dir = config.template_dir.as_ref().map(PathBuf::from);
    let templates = TemplateManager::new(config.language, template_dir).await?;

    // 3. Plan every requested artifact
    let ctx = GenerationContext::new(&config.sdk_name, &document, &templates, &config.output_dir)
        .with_operation_filter(&config.include_operations, &config.exclude_operations);
    let kinds = ordered_kinds(templates.manifest(), &config.artifacts);
    let planned = plan(&ctx, &kinds)?;
    log::info!(
        "Planned {} file operations for {} operations",
        planned.len(),
        ctx.operations.len()
    );

    if dry_run {
        return Ok(GenerationReport {
            planned,
            applied: None,
        });
    }

    // 4. Apply and run hooks
    let applied = FileOpExecutor::new(config.overwrite).apply(&planned).await?;
    if config.run_hooks {
        templates
            .execute_post_generation_hooks(&PathBuf::from(&config.output_dir))
            .await?;
    }

    Ok(GenerationReport {
        planned,
        applied: Some(applied),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::SdkLanguage;
    use tempfile::tempdir;

    const SPEC: &str = r##"
openapi: 3.0.0
info:
  title: Billing API
  version: 2.0.0
paths:
  /customers:
    get:
      operationId: list_customers
      x-sdk-operation-is-list: true
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        "200":
          content:
            application/json:
              schema:
                type: object
                properties:
                  list:
                    type: array
                    items:
                      type: object
                      properties:
                        customer:
                          $ref: "#/components/schemas/Customer"
    post:
      operationId: create_customer
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema:
              type: object
              properties:
                email:
                  type: string
      responses:
        "400":
          content:
            application/json:
              schema:
                type: object
                properties:
                  api_error_code:
                    type: string
                    enum: [a, b]
                  type:
                    type: string
                    enum: [payment, invalid_request]
components:
  schemas:
    Customer:
      type: object
      properties:
        id:
          type: string
        channel:
          $ref: "#/components/schemas/Channel"
    Channel:
      type: string
      enum: [web, app_store]
"##;

    async fn config(dir: &std::path::Path, language: SdkLanguage) -> Result<Config> {
        let spec_path = dir.join("openapi.yaml");
        tokio::fs::write(&spec_path, SPEC).await?;
        let mut config = Config::new(
            "billing",
            spec_path.to_string_lossy(),
            dir.join("sdk").to_string_lossy(),
        );
        config.language = language;
        Ok(config)
    }

    #[tokio::test]
    async fn test_generate_writes_every_artifact() -> Result<()> {
        let dir = tempdir()?;
        let config = config(dir.path(), SdkLanguage::Python).await?;
        let report = generate(&config, false).await?;
        let applied = report.applied.unwrap();
        assert!(applied.files_skipped.is_empty());

        let sdk = dir.path().join("sdk");
        for file in [
            "models/customer.py",
            "params/customer/list_customers_params.py",
            "params/customer/create_customer_params.py",
            "responses/customer/list_customers_response.py",
            "services/customer_service.py",
            "enums/channel.py",
            "exceptions/api_exception.py",
            "exceptions/bad_request_api_error_code.py",
            "exceptions/error_type.py",
        ] {
            assert!(sdk.join(file).is_file(), "missing {file}");
        }

        // second run keeps existing files
        let again = generate(&config, false).await?;
        assert_eq!(again.applied.unwrap().files_written, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_dry_run_plans_without_writing() -> Result<()> {
        let dir = tempdir()?;
        let mut config = config(dir.path(), SdkLanguage::Java).await?;
        config.artifacts = vec![ArtifactKind::Enums, ArtifactKind::Models];
        let report = generate(&config, true).await?;
        assert!(report.applied.is_none());
        assert!(!dir.path().join("sdk").exists());

        let paths: Vec<_> = report.planned.iter().map(|op| op.to_string()).collect();
        assert!(paths[0].starts_with("mkdir ") && paths[0].ends_with("models"));
        assert!(paths.iter().any(|p| p.contains("Customer.java")));
        assert!(paths.iter().any(|p| p.contains("Channel.java")));
        Ok(())
    }

    #[test]
    fn test_ordered_kinds_follow_manifest() {
        let manifest = TemplateManager::builtin(SdkLanguage::Ruby).unwrap().manifest().clone();
        assert_eq!(ordered_kinds(&manifest, &[]).len(), 8);
        assert_eq!(
            ordered_kinds(&manifest, &[ArtifactKind::Exceptions, ArtifactKind::Models]),
            vec![ArtifactKind::Models, ArtifactKind::Exceptions]
        );
    }

    #[tokio::test]
    async fn test_empty_output_dir_is_config_error() {
        let config = Config::new("billing", "openapi.yaml", "");
        assert!(matches!(generate(&config, true).await, Err(Error::Config(_))));
    }
}

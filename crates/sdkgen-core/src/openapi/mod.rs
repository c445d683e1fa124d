//! OpenAPI specification loading and the typed document used by the generators.
//!
//! [`OpenApiContext`] holds the raw JSON of a specification loaded from a file or
//! URL (YAML or JSON). [`ApiDocument`] is the read-only view the builders work
//! on: component schemas plus the GET/POST operations.
//!
//! # Examples
//!
//! ```no_run
//! use sdkgen_core::openapi::{ApiDocument, OpenApiContext};
//! use sdkgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file_or_url("openapi.yaml").await?;
//! if let Some(title) = spec.title() {
//!     println!("API Title: {}", title);
//! }
//! let document = ApiDocument::from_context(&spec)?;
//! println!("{} operations", document.operations.len());
//! # Ok(())
//! # }
//! ```

pub mod extensions;
pub mod operation;
pub mod schema;

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

pub use extensions::{read_extension, ExtensionKey, Extensions};
pub use operation::{
    HttpMethod, OpenApiOperation, OpenApiParameter, ParameterLocation, RequestBody,
};
pub use schema::{Primitive, SchemaKind, SchemaNode, SchemaRegistry};

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// Represents a loaded OpenAPI specification
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Wrap an already parsed document
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Load a spec from a file path or an http(s) URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::from_url(url.as_str()).await,
            _ => Self::from_file(location).await,
        }
    }

    /// Load a spec from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load a spec from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI spec from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        // Try to parse as JSON first
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        // If JSON parsing fails, try YAML
        if let Ok(json) = serde_yaml::from_str(content) {
            return Ok(Self { json });
        }

        Err("content is neither valid JSON nor YAML".to_string())
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// First server URL of the document
    pub fn base_url(&self) -> Option<&str> {
        self.json
            .get("servers")?
            .as_array()?
            .first()?
            .get("url")?
            .as_str()
    }
}

/// Read-only view of a document for code generation
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub title: Option<String>,
    pub version: Option<String>,
    pub base_url: Option<String>,
    pub schemas: SchemaRegistry,
    pub operations: Vec<OpenApiOperation>,
}

impl ApiDocument {
    /// Build the typed view of a loaded specification
    pub fn from_context(spec: &OpenApiContext) -> crate::Result<Self> {
        if !spec.json.is_object() {
            return Err(Error::config("OpenAPI document is empty or not an object"));
        }

        let operations = operation::parse_operations(&spec.json)?;
        let schemas = SchemaRegistry::from_document(&spec.json);

        for (name, schema) in schemas.iter() {
            let unknown = schema.extensions.unknown_keys();
            if !unknown.is_empty() {
                log::debug!("Schema '{}' has unrecognised extensions: {:?}", name, unknown);
            }
        }

        log::debug!(
            "Loaded document with {} schemas and {} operations",
            schemas.iter().count(),
            operations.len()
        );

        Ok(Self {
            title: spec.title().map(String::from),
            version: spec.version().map(String::from),
            base_url: spec.base_url().map(String::from),
            schemas,
            operations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_from_file_yaml() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("openapi.yaml");
        let yaml_content = r#"
openapi: 3.0.0
info:
  title: Billing API
  version: 2.0.0
servers:
  - url: https://{site}.example.com/api/v2
paths: {}
"#;
        tokio::fs::write(&file_path, yaml_content).await?;

        let spec = OpenApiContext::from_file_or_url(file_path.to_string_lossy()).await?;
        assert_eq!(spec.title(), Some("Billing API"));
        assert_eq!(spec.version(), Some("2.0.0"));
        assert_eq!(spec.base_url(), Some("https://{site}.example.com/api/v2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_from_file_rejects_garbage() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("broken.json");
        tokio::fs::write(&file_path, "{ not: [valid").await?;

        let err = OpenApiContext::from_file(&file_path).await.unwrap_err();
        assert!(matches!(err, Error::OpenApi(_)));
        Ok(())
    }

    #[test]
    fn test_document_requires_object() {
        let err = ApiDocument::from_context(&OpenApiContext::new(JsonValue::Null)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_document_collects_schemas_and_operations() {
        let spec = OpenApiContext::new(json!({
            "info": {"title": "Billing", "version": "1"},
            "paths": {
                "/customers": {"get": {"operationId": "list_customers", "responses": {}}}
            },
            "components": {"schemas": {"Customer": {"type": "object"}}}
        }));
        let document = ApiDocument::from_context(&spec).unwrap();
        assert_eq!(document.title.as_deref(), Some("Billing"));
        assert!(document.schemas.contains("Customer"));
        assert_eq!(document.operations.len(), 1);
    }
}

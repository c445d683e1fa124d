//! Configuration management for SDK generation.
//!
//! This module defines the `Config` struct holding everything a generation run
//! needs. The configuration can be loaded from a YAML file, created
//! programmatically, or assembled from command-line arguments.
//!
//! # Examples
//!
//! ```no_run
//! use sdkgen_core::config::Config;
//! use sdkgen_core::languages::SdkLanguage;
//!
//! // Create a new config programmatically
//! let mut config = Config::new("billing", "openapi.yaml", "sdk/python");
//! config.language = SdkLanguage::Python;
//! config.exclude_operations.push("customer.delete".to_string());
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::languages::SdkLanguage;
use crate::templates::ArtifactKind;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Configuration for SDK generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SDK name, the root namespace of generated code
    pub sdk_name: String,

    /// Path or URL of the OpenAPI document
    pub openapi_schema_path: String,

    /// Output directory for generated code
    pub output_dir: String,

    /// Target language
    #[serde(default)]
    pub language: SdkLanguage,

    /// Optional path to a template directory replacing the built-in set
    #[serde(default)]
    pub template_dir: Option<String>,

    /// Artifact kinds to generate, all of them when empty
    #[serde(default)]
    pub artifacts: Vec<ArtifactKind>,

    /// Operations to generate (operation ids or `module.method`), all when empty
    #[serde(default)]
    pub include_operations: Vec<String>,

    /// Operations to leave out
    #[serde(default)]
    pub exclude_operations: Vec<String>,

    /// Replace files that already exist in the output directory
    #[serde(default)]
    pub overwrite: bool,

    /// Run the template set's post-generation hooks
    #[serde(default = "default_run_hooks")]
    pub run_hooks: bool,

    /// Base URL overriding the document's first server (Optional)
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        sdk_name: impl Into<String>,
        openapi_schema_path: impl Into<String>,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            sdk_name: sdk_name.into(),
            openapi_schema_path: openapi_schema_path.into(),
            output_dir: output_dir.into(),
            language: SdkLanguage::default(),
            template_dir: None,
            artifacts: Vec::new(),
            include_operations: Vec::new(),
            exclude_operations: Vec::new(),
            overwrite: false,
            run_hooks: default_run_hooks(),
            base_url: None,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

fn default_run_hooks() -> bool {
    true
}

//! Manifest file format for template sets.
//!
//! A template set carries a `manifest.yaml` (or `manifest.toml`) naming the
//! template and output directory of each artifact kind, plus optional hooks.

// Internal imports (std, crate)
use std::path::Path;

use super::ArtifactKind;
use crate::languages::SdkLanguage;
use crate::Error;

// External imports (alphabetized)
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// The root manifest structure of a template set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// The name of the template set
    pub name: String,

    /// A short description of what the set generates
    #[serde(default)]
    pub description: String,

    /// The target SDK language
    pub language: SdkLanguage,

    /// Template and output directory per artifact kind
    #[serde(default)]
    pub artifacts: IndexMap<ArtifactKind, ArtifactTemplate>,

    /// Optional hooks that run after generation
    #[serde(default)]
    pub hooks: TemplateHooks,
}

/// Where one artifact kind is rendered from and written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactTemplate {
    /// Template name, relative to the template directory
    pub template: String,

    /// Output directory, relative to the SDK output directory
    pub output_dir: String,

    /// Secondary template (error-code enums of the exceptions artifact)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_template: Option<String>,
}

/// Hooks that run at specific points during code generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateHooks {
    /// Commands to run after all files are written, from the output directory
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub post_generate: Vec<String>,
}

impl TemplateManifest {
    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::template(format!("Invalid YAML in template manifest: {}", e)))
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::template(format!("Invalid TOML in template manifest: {}", e)))
    }

    /// Load `manifest.yaml`, or `manifest.toml` when there is no YAML manifest
    pub async fn load_from_dir(template_dir: &Path) -> crate::Result<Self> {
        let yaml_path = template_dir.join("manifest.yaml");
        let toml_path = template_dir.join("manifest.toml");

        if fs::try_exists(&yaml_path).await? {
            log::debug!("Reading template manifest {}", yaml_path.display());
            let content = fs::read_to_string(&yaml_path).await?;
            Self::from_yaml_str(&content)
        } else if fs::try_exists(&toml_path).await? {
            log::debug!("Reading template manifest {}", toml_path.display());
            let content = fs::read_to_string(&toml_path).await?;
            Self::from_toml_str(&content)
        } else {
            Err(Error::template(format!(
                "No manifest.yaml or manifest.toml in {}",
                template_dir.display()
            )))
        }
    }

    /// Template entry of an artifact kind; a missing entry is a configuration error
    pub fn artifact(&self, kind: ArtifactKind) -> crate::Result<&ArtifactTemplate> {
        self.artifacts.get(&kind).ok_or_else(|| {
            Error::config(format!(
                "Template set '{}' has no template for artifact '{}'",
                self.name, kind
            ))
        })
    }

    /// Every template name the manifest refers to
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.values().flat_map(|a| {
            std::iter::once(a.template.as_str()).chain(a.enum_template.as_deref())
        })
    }
}

/// Helper function to deserialize either a single command or a list of commands
fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "Expected string or array of strings",
                )),
            })
            .collect(),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}

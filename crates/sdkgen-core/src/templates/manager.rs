//! Template loading and rendering

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::builtin::builtin_templates;
use super::{ArtifactKind, ArtifactTemplate, TemplateDir, TemplateManifest};
use crate::languages::SdkLanguage;
use crate::naming::{
    pluralize, singularize, to_lower_camel_case, to_snake_case, to_upper_camel_case,
    to_upper_snake_case,
};
use crate::{Error, Result};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    /// The template manifest
    manifest: TemplateManifest,
    language: SdkLanguage,
    /// `None` for the built-in set
    template_dir: Option<TemplateDir>,
}

impl TemplateManager {
    /// Create a TemplateManager for a language.
    ///
    /// An explicit `template_dir` must exist. Without one, user templates are
    /// looked up in the standard locations and the built-in set is used when
    /// none are found.
    pub async fn new(language: SdkLanguage, template_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match template_dir {
            Some(dir) => Some(TemplateDir::from_path(language, &dir)?),
            None => TemplateDir::discover(language),
        };
        match dir {
            Some(dir) => Self::from_dir(dir).await,
            None => Self::builtin(language),
        }
    }

    /// Load the templates compiled into the library
    pub fn builtin(language: SdkLanguage) -> Result<Self> {
        let set = builtin_templates(language);
        let manifest = TemplateManifest::from_yaml_str(set.manifest)?;
        let mut tera = Tera::default();
        tera.add_raw_templates(set.templates.iter().copied())
            .map_err(|e| {
                Error::template(format!(
                    "Failed to parse built-in {} templates: {}",
                    language, e
                ))
            })?;
        log::debug!("Using built-in {} templates", language);
        Self::assemble(tera, manifest, language, None)
    }

    /// Load every `.tera` file of a template directory
    pub async fn from_dir(dir: TemplateDir) -> Result<Self> {
        let manifest = TemplateManifest::load_from_dir(dir.template_path()).await?;
        let pattern = format!("{}/**/*.tera", dir.template_path().display());
        let tera = Tera::new(&pattern).map_err(|e| {
            Error::template(format!("Failed to parse templates in {}: {}", dir.display(), e))
        })?;
        log::debug!("Using templates from {}", dir.display());
        Self::assemble(tera, manifest, dir.language(), Some(dir))
    }

    fn assemble(
        mut tera: Tera,
        manifest: TemplateManifest,
        language: SdkLanguage,
        template_dir: Option<TemplateDir>,
    ) -> Result<Self> {
        if manifest.language != language {
            return Err(Error::template(format!(
                "Template set '{}' is for {}, not {}",
                manifest.name, manifest.language, language
            )));
        }
        for name in manifest.template_names() {
            if tera.get_template(name).is_err() {
                return Err(Error::config(format!(
                    "Template '{}' named in manifest '{}' does not exist",
                    name, manifest.name
                )));
            }
        }
        register_filters(&mut tera);

        Ok(Self {
            tera: Arc::new(tera),
            manifest,
            language,
            template_dir,
        })
    }

    pub fn language(&self) -> SdkLanguage {
        self.language
    }

    /// Get a reference to the template manifest
    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    /// The template directory, `None` for built-in templates
    pub fn template_dir(&self) -> Option<&TemplateDir> {
        self.template_dir.as_ref()
    }

    /// Manifest entry of an artifact kind
    pub fn artifact(&self, kind: ArtifactKind) -> Result<&ArtifactTemplate> {
        self.manifest.artifact(kind)
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// Render `template` for the artifact named `target`
    pub fn render<T: Serialize>(&self, template: &str, context: &T, target: &str) -> Result<String> {
        let context = Context::from_serialize(context).map_err(|e| Error::render(target, e))?;
        log::debug!("Rendering {} with template {}", target, template);
        self.tera
            .render(template, &context)
            .map_err(|e| Error::render(target, e))
    }

    /// Execute post-generation hooks from the manifest
    pub async fn execute_post_generation_hooks(&self, output_path: &Path) -> Result<()> {
        use tokio::process::Command as AsyncCommand;

        for command in &self.manifest.hooks.post_generate {
            log::info!("Running post-generation hook: {}", command);
            let output = AsyncCommand::new("sh")
                .arg("-c")
                .arg(command)
                .current_dir(output_path)
                .output()
                .await
                .map_err(|e| {
                    Error::template(format!(
                        "Failed to execute post-generation hook '{}': {}",
                        command, e
                    ))
                })?;

            if !output.status.success() {
                return Err(Error::template(format!(
                    "Post-generation hook '{}' failed with status {}\n{}{}",
                    command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr),
                    String::from_utf8_lossy(&output.stdout)
                )));
            }
        }
        Ok(())
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("snake", case_filter("snake", to_snake_case));
    tera.register_filter("camel", case_filter("camel", to_lower_camel_case));
    tera.register_filter("pascal", case_filter("pascal", to_upper_camel_case));
    tera.register_filter("upper_snake", case_filter("upper_snake", to_upper_snake_case));
    tera.register_filter("singular", case_filter("singular", singularize));
    tera.register_filter("plural", case_filter("plural", pluralize));
    tera.register_filter("doc", case_filter("doc", sanitize_doc));
}

static TYPOGRAPHIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u2018\u2019\u201C\u201D\u2014]").expect("valid pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Flatten a description into one line that is safe inside any comment syntax
pub fn sanitize_doc(input: &str) -> String {
    let plain = TYPOGRAPHIC.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        _ => "-",
    });
    WHITESPACE
        .replace_all(plain.trim(), " ")
        .replace("*/", "* /")
        .replace("\"\"\"", "'''")
}

/// Tera filter applying a string conversion
fn case_filter(name: &'static str, convert: fn(&str) -> String) -> impl tera::Filter {
    move |value: &JsonValue, _: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
        let text = value
            .as_str()
            .ok_or_else(|| tera::Error::msg(format!("Filter `{}` expects a string", name)))?;
        Ok(JsonValue::String(convert(text)))
    }
}

//! Error handling for the sdkgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Structural problems (missing
//! output path, missing template, unusable document) abort a run; malformed
//! schema data is logged and skipped by the builders instead of surfacing here.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::error::{Error, Result};
//!
//! fn needs_output(path: Option<&str>) -> Result<&str> {
//!     path.ok_or_else(|| Error::config("output directory is not set"))
//! }
//!
//! assert!(needs_output(None).is_err());
//! ```

use thiserror::Error;

/// Result type for sdkgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sdkgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP error while fetching a remote document
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenAPI error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Template loading or manifest error
    #[error("Template error: {0}")]
    Template(String),

    /// Rendering a single artifact failed
    #[error("Failed to render {target}: {source}")]
    Render {
        /// Class or file that was being generated
        target: String,
        source: tera::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Wrap a render failure with the artifact it belongs to
    pub fn render<S: Into<String>>(target: S, source: tera::Error) -> Self {
        Self::Render {
            target: target.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_names_target() {
        let err = Error::render("CustomerCreateParams", tera::Error::msg("boom"));
        let text = err.to_string();
        assert!(text.contains("CustomerCreateParams"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            Error::config("missing output path").to_string(),
            "Configuration error: missing output path"
        );
    }
}

//! Resolution of user template directories

use std::io;
use std::path::{Path, PathBuf};

use crate::languages::SdkLanguage;

/// Environment variable pointing at a template root
pub const TEMPLATE_DIR_ENV: &str = "SDKGEN_TEMPLATE_DIR";

/// A template directory on disk for one language
#[derive(Debug, Clone)]
pub struct TemplateDir {
    /// Root directory containing one sub-directory per language
    root_dir: PathBuf,
    /// Path to the language's template directory (root_dir/language)
    template_path: PathBuf,
    language: SdkLanguage,
}

impl TemplateDir {
    /// Create a new TemplateDir with explicit paths
    pub fn new(root_dir: PathBuf, template_path: PathBuf, language: SdkLanguage) -> Self {
        Self {
            root_dir,
            template_path,
            language,
        }
    }

    /// Returns a displayable version of the template path
    pub fn display(&self) -> std::path::Display<'_> {
        self.template_path.display()
    }

    /// Resolve an explicit template directory.
    ///
    /// `dir` may point at the root holding one directory per language, or at
    /// the language directory itself.
    pub fn from_path(language: SdkLanguage, dir: &Path) -> io::Result<Self> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", dir.display()),
            ));
        }

        let points_at_language = dir
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == language.as_str());
        let (root_dir, template_path) = if points_at_language {
            let root = dir.parent().map(Path::to_path_buf).unwrap_or_default();
            (root, dir.to_path_buf())
        } else {
            (dir.to_path_buf(), dir.join(language.as_str()))
        };

        if !template_path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", template_path.display()),
            ));
        }

        Ok(Self::new(root_dir, template_path, language))
    }

    /// Look for user templates in the standard locations.
    ///
    /// Checks `$SDKGEN_TEMPLATE_DIR` and then `~/.sdkgen/templates`. `None`
    /// means the built-in templates should be used.
    pub fn discover(language: SdkLanguage) -> Option<Self> {
        Self::find_template_base_dir()
            .and_then(|root| Self::from_path(language, &root).ok())
    }

    fn find_template_base_dir() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                return Some(path);
            }
            log::warn!(
                "{} points at {}, which is not a directory",
                TEMPLATE_DIR_ENV,
                path.display()
            );
        }

        // 2. Check in the user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            let templates_dir = home_dir.join(".sdkgen").join("templates");
            if templates_dir.is_dir() {
                return Some(templates_dir);
            }
        }

        None
    }

    /// Get the root directory containing the templates
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn language(&self) -> SdkLanguage {
        self.language
    }

    /// Get the path to the language's template directory
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_path_accepts_root_or_language_dir() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("templates");
        let python = root.join("python");
        fs::create_dir_all(&python).unwrap();

        let from_root = TemplateDir::from_path(SdkLanguage::Python, &root).unwrap();
        assert_eq!(from_root.template_path(), python.as_path());
        assert_eq!(from_root.root_dir(), root.as_path());

        let direct = TemplateDir::from_path(SdkLanguage::Python, &python).unwrap();
        assert_eq!(direct.template_path(), python.as_path());
        assert_eq!(direct.root_dir(), root.as_path());

        assert!(TemplateDir::from_path(SdkLanguage::Java, &root).is_err());
        assert!(TemplateDir::from_path(SdkLanguage::Java, Path::new("/nonexistent")).is_err());
    }
}

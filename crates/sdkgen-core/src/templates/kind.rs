//! Kinds of generated artifacts.
//!
//! Every kind has its own builder and its own entry in the template manifest.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::templates::ArtifactKind;
//! use std::str::FromStr;
//!
//! let kind = ArtifactKind::from_str("get_params").unwrap();
//! assert_eq!(kind, ArtifactKind::GetParams);
//! assert_eq!(kind.to_string(), "get_params");
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Artifact kinds, in the order a full run generates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Models,
    GetParams,
    PostParams,
    GetResponses,
    PostResponses,
    Services,
    Enums,
    Exceptions,
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "models" => Ok(ArtifactKind::Models),
            "get_params" => Ok(ArtifactKind::GetParams),
            "post_params" => Ok(ArtifactKind::PostParams),
            "get_responses" => Ok(ArtifactKind::GetResponses),
            "post_responses" => Ok(ArtifactKind::PostResponses),
            "services" => Ok(ArtifactKind::Services),
            "enums" => Ok(ArtifactKind::Enums),
            "exceptions" => Ok(ArtifactKind::Exceptions),
            _ => Err(format!("Unknown artifact kind: {}", s)),
        }
    }
}

impl ArtifactKind {
    /// Returns the artifact identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::GetParams => "get_params",
            Self::PostParams => "post_params",
            Self::GetResponses => "get_responses",
            Self::PostResponses => "post_responses",
            Self::Services => "services",
            Self::Enums => "enums",
            Self::Exceptions => "exceptions",
        }
    }

    /// Returns an iterator over all artifact kinds
    pub fn all() -> impl Iterator<Item = Self> {
        use ArtifactKind::*;
        [
            Models,
            GetParams,
            PostParams,
            GetResponses,
            PostResponses,
            Services,
            Enums,
            Exceptions,
        ]
        .iter()
        .copied()
    }

    /// Whether files of this kind are grouped in one directory per module
    pub fn is_per_module(&self) -> bool {
        matches!(
            self,
            Self::GetParams | Self::PostParams | Self::GetResponses | Self::PostResponses
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Theme loading errors.

use std::path::PathBuf;

/// Error returned when a theme document cannot be loaded or named.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid YAML.
    #[error("invalid theme YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The document is not valid JSON.
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed, but its root is not a mapping.
    #[error("theme document root is a {found}, expected a mapping")]
    NotAMapping { found: &'static str },
    /// A mapping key has no string form (sequences or mappings used as keys).
    #[error("theme document has a {found} used as a mapping key")]
    UnsupportedKey { found: &'static str },
    /// No theme name could be derived from the document.
    #[error("theme document does not name a theme")]
    Unnamed,
}

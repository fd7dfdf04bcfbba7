//! Cache configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Deserializer, Serialize};

/// Entry limit used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Error returned when a configuration document cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid cache config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid cache config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a [`StyleCache`](crate::StyleCache) bounds its entries.
///
/// With a capacity, the least recently used entry is evicted once the
/// limit is reached. Without one, entries are only dropped by theme
/// changes and explicit clears.
///
/// As a document, `capacity` may be a positive number, or `null`/`0` for
/// an unbounded cache. A missing field means [`DEFAULT_CAPACITY`].
///
/// ```rust
/// use themed_style_cache::CacheConfig;
///
/// let config = CacheConfig::from_yaml_str("capacity: 250").unwrap();
/// assert_eq!(config.capacity().map(|c| c.get()), Some(250));
///
/// let config = CacheConfig::from_yaml_str("capacity: ~").unwrap();
/// assert!(config.capacity().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(
        default = "default_capacity",
        deserialize_with = "deserialize_capacity"
    )]
    capacity: Option<NonZeroUsize>,
}

fn default_capacity() -> Option<NonZeroUsize> {
    NonZeroUsize::new(DEFAULT_CAPACITY)
}

fn deserialize_capacity<'de, D>(deserializer: D) -> Result<Option<NonZeroUsize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<usize>::deserialize(deserializer)?;
    Ok(raw.and_then(NonZeroUsize::new))
}

impl CacheConfig {
    /// An LRU-bounded cache holding at most `capacity` entries.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    /// A cache that only shrinks on theme change or clear.
    pub fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// Parses a YAML configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

//! An engine that resolves nothing.

use super::error::EngineError;
use super::StyleEngine;

/// Engine used when no style engine is available.
///
/// Every selector resolves to no styles and inline styles pass through
/// unchanged, so a cache built on it renders everything unstyled rather
/// than failing.
///
/// ```rust
/// use themed_style_cache::{NullEngine, StyleCache};
///
/// let cache = StyleCache::new(NullEngine);
/// assert!(cache.get_styles("button", "primary").is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl StyleEngine for NullEngine {
    fn compute_styles(
        &self,
        _selector: &str,
        _classes: &[String],
        _theme_json: &str,
    ) -> Result<String, EngineError> {
        Ok("{}".to_string())
    }

    fn expand_styles(&self, props_json: &str, _theme_json: &str) -> Result<String, EngineError> {
        Ok(props_json.to_string())
    }

    fn default_state(&self) -> Result<String, EngineError> {
        Ok("{}".to_string())
    }

    fn render_css(&self, _usage_json: &str, _theme_json: &str) -> Result<String, EngineError> {
        Ok(String::new())
    }

    fn version(&self) -> Result<String, EngineError> {
        Ok(concat!("null-", env!("CARGO_PKG_VERSION")).to_string())
    }
}

//! Theme documents and the active theme state.
//!
//! This module provides:
//!
//! - [`ThemeSource`]: YAML/JSON theme documents normalized to engine JSON
//! - [`DeviceMetrics`]: Display densities that travel with the theme
//! - [`theme_name`]: Readable theme names for diagnostics
//! - [`ThemeError`]: Errors from loading or naming a theme
//!
//! Exactly one theme is active per [`StyleCache`](crate::StyleCache); the
//! cache holds it as a [`ThemeState`].

mod error;
mod metrics;
mod name;
mod source;

pub use error::ThemeError;
pub use metrics::{DeviceMetrics, DISPLAY_DENSITY_KEY, SCALED_DENSITY_KEY};
pub use name::{name_from_document, theme_name, UNKNOWN_THEME};
pub use source::{normalize_yaml, ThemeSource};

use log::warn;

/// The theme a cache is currently computing styles under.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeState {
    json: String,
    payload: String,
    name: String,
    metrics: DeviceMetrics,
}

impl ThemeState {
    /// Builds the state for a serialized theme.
    ///
    /// The name falls back to [`UNKNOWN_THEME`] when the payload does not
    /// yield one; a theme is never rejected for being unnamed.
    pub fn new(json: impl Into<String>, metrics: DeviceMetrics) -> Self {
        let json = json.into();
        let name = match theme_name(&json) {
            Ok(name) => name,
            Err(err) => {
                warn!("could not derive theme name, using '{}': {}", UNKNOWN_THEME, err);
                UNKNOWN_THEME.to_string()
            }
        };
        let payload = metrics.embed(&json);
        Self {
            json,
            payload,
            name,
            metrics,
        }
    }

    /// The theme as it was handed in.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// The theme with the device metrics embedded, as passed to style computations.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Readable name for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> DeviceMetrics {
        self.metrics
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            json: "{}".to_string(),
            payload: DeviceMetrics::default().embed("{}"),
            name: UNKNOWN_THEME.to_string(),
            metrics: DeviceMetrics::default(),
        }
    }
}

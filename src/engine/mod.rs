//! Style engine abstraction.
//!
//! This module defines the [`StyleEngine`] trait, the boundary between the
//! cache and the engine that actually resolves styles. The engine usually
//! lives behind a foreign-function or cross-runtime call, so every payload
//! crosses as JSON text and every call is treated as expensive.
//!
//! Engines handle:
//! - Selector matching and cascade resolution for a selector/class list
//! - Shorthand expansion and unit conversion for inline styles
//! - Theme initialization with device metrics
//! - Supplying the theme bundled with the engine, if it has one
//! - CSS rendering for a usage snapshot, if supported

mod error;
mod null;
mod usage;

use std::sync::Arc;

pub use error::EngineError;
pub use null::NullEngine;
pub use usage::UsageSnapshot;

use crate::theme::DeviceMetrics;

/// An engine that resolves styles for a theme.
///
/// All methods take the theme as serialized JSON; the cache passes the
/// active theme with device metrics embedded (see
/// [`DeviceMetrics::embed`]). Responses are JSON text. An empty response,
/// `null`, or `{}` all mean "no styles".
///
/// Implementations must be callable from several threads at once.
pub trait StyleEngine: Send + Sync {
    /// Resolves the properties that apply to `selector` with `classes`.
    fn compute_styles(
        &self,
        selector: &str,
        classes: &[String],
        theme_json: &str,
    ) -> Result<String, EngineError>;

    /// Expands shorthands and converts units in a property map.
    fn expand_styles(&self, props_json: &str, theme_json: &str) -> Result<String, EngineError>;

    /// Prepares the engine for a newly activated theme.
    fn initialize(&self, _theme_json: &str, _metrics: DeviceMetrics) -> Result<(), EngineError> {
        Ok(())
    }

    /// The theme bundled with the engine, as JSON text.
    ///
    /// A cache starts out under this theme until one is set explicitly.
    fn default_state(&self) -> Result<String, EngineError> {
        Err(EngineError::Unsupported("default_state"))
    }

    /// Renders a stylesheet covering the classes and tags in a usage snapshot.
    fn render_css(&self, _usage_json: &str, _theme_json: &str) -> Result<String, EngineError> {
        Err(EngineError::Unsupported("render_css"))
    }

    /// The engine's version string.
    fn version(&self) -> Result<String, EngineError> {
        Err(EngineError::Unsupported("version"))
    }
}

impl<E: StyleEngine + ?Sized> StyleEngine for Arc<E> {
    fn compute_styles(
        &self,
        selector: &str,
        classes: &[String],
        theme_json: &str,
    ) -> Result<String, EngineError> {
        (**self).compute_styles(selector, classes, theme_json)
    }

    fn expand_styles(&self, props_json: &str, theme_json: &str) -> Result<String, EngineError> {
        (**self).expand_styles(props_json, theme_json)
    }

    fn initialize(&self, theme_json: &str, metrics: DeviceMetrics) -> Result<(), EngineError> {
        (**self).initialize(theme_json, metrics)
    }

    fn default_state(&self) -> Result<String, EngineError> {
        (**self).default_state()
    }

    fn render_css(&self, usage_json: &str, theme_json: &str) -> Result<String, EngineError> {
        (**self).render_css(usage_json, theme_json)
    }

    fn version(&self) -> Result<String, EngineError> {
        (**self).version()
    }
}

impl<E: StyleEngine + ?Sized> StyleEngine for Box<E> {
    fn compute_styles(
        &self,
        selector: &str,
        classes: &[String],
        theme_json: &str,
    ) -> Result<String, EngineError> {
        (**self).compute_styles(selector, classes, theme_json)
    }

    fn expand_styles(&self, props_json: &str, theme_json: &str) -> Result<String, EngineError> {
        (**self).expand_styles(props_json, theme_json)
    }

    fn initialize(&self, theme_json: &str, metrics: DeviceMetrics) -> Result<(), EngineError> {
        (**self).initialize(theme_json, metrics)
    }

    fn default_state(&self) -> Result<String, EngineError> {
        (**self).default_state()
    }

    fn render_css(&self, usage_json: &str, theme_json: &str) -> Result<String, EngineError> {
        (**self).render_css(usage_json, theme_json)
    }

    fn version(&self) -> Result<String, EngineError> {
        (**self).version()
    }
}

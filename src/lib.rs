//! Theme-scoped style caching in front of an external style engine.
//!
//! Style resolution (selector matching, cascade, unit conversion, CSS
//! rendering) is done by an engine that usually sits across a language
//! boundary and is expensive to call. This crate provides the caller side:
//!
//! - [`StyleCache`]: memoizes lookups per (selector, class list), dropping
//!   every entry whenever the active theme changes
//! - [`StyleEngine`]: the trait an engine binding implements
//! - [`ThemeSource`]: loads YAML/JSON theme documents into the JSON text
//!   the engine consumes
//! - [`DeviceMetrics`]: display densities passed along with the theme
//!
//! # Quick Start
//!
//! ```rust
//! use themed_style_cache::{DeviceMetrics, NullEngine, StyleCache, ThemeSource};
//!
//! let theme = ThemeSource::from_yaml_str(
//!     "themes:\n  dark:\n    name: Dark Theme\ncurrent_theme: dark\n",
//! )
//! .unwrap();
//!
//! let cache = StyleCache::new(NullEngine);
//! cache.set_theme_source(&theme, DeviceMetrics::new(2.0, 2.0));
//! assert_eq!(cache.theme_name(), "Dark Theme");
//!
//! let styles = cache.get_styles("button", "primary large");
//! assert!(styles.is_empty());
//! ```
//!
//! # Failure Policy
//!
//! Lookups never fail. An engine error, an empty answer, or a malformed
//! answer all read as "no styles" (or, for [`StyleCache::process_styles`],
//! "leave the input alone") and are logged through the [`log`] facade.
//! Theme loading through [`ThemeSource`] and configuration parsing through
//! [`CacheConfig`] do return errors, since they happen at setup time.
//!
//! # Ownership
//!
//! There is no global cache. Construct a [`StyleCache`] where the engine is
//! set up and pass it (or an `Arc` of it) to whatever renders.

pub mod cache;
pub mod engine;
pub mod style;
pub mod theme;

pub use cache::{CacheConfig, CacheStats, ConfigError, StyleCache, StyleKey, DEFAULT_CAPACITY};
pub use engine::{EngineError, NullEngine, StyleEngine, UsageSnapshot};
pub use style::{parse_property_map, split_class_list, PayloadError, PropertyMap};
pub use theme::{
    normalize_yaml, theme_name, DeviceMetrics, ThemeError, ThemeSource, ThemeState,
    UNKNOWN_THEME,
};

//! Theme-scoped style cache.
//!
//! This module provides [`StyleCache`], which memoizes engine lookups keyed
//! on (selector, class list) under the active theme.
//!
//! # Design
//!
//! Entries, the active theme, and a generation counter share one lock.
//! Engine calls are made with the lock released:
//!
//! 1. **Lookup**: under the lock, return a hit or snapshot (theme, generation)
//! 2. **Compute**: call the engine with the snapshot theme, unlocked
//! 3. **Fill**: re-lock and insert only if the generation is unchanged
//!
//! [`StyleCache::set_theme`] and [`StyleCache::clear`] wipe the entries and
//! bump the generation in one critical section, so once they return no
//! lookup can observe an entry computed under the previous theme, and a
//! computation that straddled the switch cannot put one back.
//!
//! Two lookups missing on the same key at the same time may both call the
//! engine. The later fill keeps the entry that is already present, so both
//! callers observe equivalent maps.
//!
//! Hits take the same exclusive lock as everything else, since touching an
//! entry reorders the LRU list. Concurrent readers serialize on it for the
//! length of a map lookup; the engine is never called under it.
//!
//! Theme switches are serialized on a second lock, held from
//! [`StyleEngine::initialize`] through the state swap, so the engine is
//! always initialized with the theme the cache reports as active. Lookups
//! do not take it and keep running against the outgoing theme meanwhile.
//!
//! A new cache starts under the engine's bundled theme
//! ([`StyleEngine::default_state`]), or `"{}"` when the engine has none.
//!
//! # Failure Policy
//!
//! No operation here returns an error. Engine failures, malformed
//! responses, and unnamed themes degrade to an empty map, the unmodified
//! input, an empty stylesheet, or the `"unknown"` label, and are logged at
//! `warn`. Rendering with missing styles is preferred over not rendering.

mod config;
mod key;
mod stats;

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::{debug, trace, warn};
use lru::LruCache;
use parking_lot::Mutex;

pub use config::{CacheConfig, ConfigError, DEFAULT_CAPACITY};
pub use key::StyleKey;
pub use stats::CacheStats;

use self::stats::Counters;
use crate::engine::{StyleEngine, UsageSnapshot};
use crate::style::{parse_property_map, PropertyMap};
use crate::theme::{DeviceMetrics, ThemeSource, ThemeState};

struct Inner {
    entries: LruCache<StyleKey, Arc<PropertyMap>>,
    theme: Arc<ThemeState>,
    generation: u64,
}

impl Inner {
    fn invalidate(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Memoizing front for a [`StyleEngine`].
///
/// The cache is an ordinary owned value: build one per engine and share it
/// by reference or through an `Arc`. All methods take `&self` and may be
/// called from several threads.
///
/// # Example
///
/// ```rust
/// use themed_style_cache::{DeviceMetrics, EngineError, StyleCache, StyleEngine};
///
/// struct Buttons;
///
/// impl StyleEngine for Buttons {
///     fn compute_styles(&self, selector: &str, _: &[String], _: &str) -> Result<String, EngineError> {
///         Ok(if selector == "button" { r#"{"color":"red"}"# } else { "{}" }.to_string())
///     }
///
///     fn expand_styles(&self, props: &str, _: &str) -> Result<String, EngineError> {
///         Ok(props.to_string())
///     }
/// }
///
/// let cache = StyleCache::new(Buttons);
/// let styles = cache.get_styles("button", "primary");
/// assert_eq!(styles["color"], "red");
///
/// // Served from the cache until the theme changes.
/// assert_eq!(cache.stats().hits, 0);
/// cache.get_styles("button", "primary");
/// assert_eq!(cache.stats().hits, 1);
///
/// cache.set_theme(r#"{"name":"Dark"}"#, DeviceMetrics::default());
/// assert!(cache.is_empty());
/// assert_eq!(cache.theme_name(), "Dark");
/// ```
pub struct StyleCache<E> {
    engine: E,
    config: CacheConfig,
    inner: Mutex<Inner>,
    theme_switch: Mutex<()>,
    counters: Counters,
}

impl<E: StyleEngine> StyleCache<E> {
    /// Creates a cache with the default configuration.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, CacheConfig::default())
    }

    /// Creates a cache with an explicit configuration.
    pub fn with_config(engine: E, config: CacheConfig) -> Self {
        let entries = match config.capacity() {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        let theme = match bundled_theme(&engine) {
            Some(json) => ThemeState::new(json, DeviceMetrics::default()),
            None => ThemeState::default(),
        };
        Self {
            engine,
            config,
            inner: Mutex::new(Inner {
                entries,
                theme: Arc::new(theme),
                generation: 0,
            }),
            theme_switch: Mutex::new(()),
            counters: Counters::default(),
        }
    }

    /// The theme bundled with the engine, or `"{}"` if it has none.
    pub fn default_theme_json(&self) -> String {
        bundled_theme(&self.engine).unwrap_or_else(|| "{}".to_string())
    }

    /// Returns the styles for `selector` with the classes in `class_list`.
    ///
    /// A hit returns the cached map itself. A miss asks the engine and
    /// caches the answer; a failed or empty answer is cached as an empty map.
    pub fn get_styles(&self, selector: &str, class_list: &str) -> Arc<PropertyMap> {
        let key = StyleKey::new(selector, class_list);

        let (theme, generation) = {
            let mut inner = self.inner.lock();
            if let Some(hit) = inner.entries.get(&key) {
                self.counters.hit();
                trace!("style cache hit for {}", key);
                return Arc::clone(hit);
            }
            (Arc::clone(&inner.theme), inner.generation)
        };

        self.counters.miss();
        debug!("style cache miss for {}, computing", key);
        let computed = Arc::new(self.compute(&key, &theme));

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            self.counters.stale_discard();
            debug!("discarding styles for {}: theme changed during computation", key);
            return computed;
        }
        if let Some(existing) = inner.entries.get(&key) {
            return Arc::clone(existing);
        }
        if inner.entries.push(key, Arc::clone(&computed)).is_some() {
            self.counters.eviction();
        }
        computed
    }

    fn compute(&self, key: &StyleKey, theme: &ThemeState) -> PropertyMap {
        let response = match self
            .engine
            .compute_styles(key.selector(), &key.classes(), theme.payload())
        {
            Ok(response) => response,
            Err(err) => {
                warn!("engine failed computing styles for {}: {}", key, err);
                return PropertyMap::new();
            }
        };

        match parse_property_map(&response) {
            Ok(Some(styles)) => styles,
            Ok(None) => PropertyMap::new(),
            Err(err) => {
                warn!("unreadable styles for {}: {}", key, err);
                PropertyMap::new()
            }
        }
    }

    /// Expands shorthands and converts units in an inline style map.
    ///
    /// Returns a copy of `styles` unchanged if anything along the way fails
    /// or the engine answers with no styles. Results are not cached.
    pub fn process_styles(&self, styles: &PropertyMap) -> PropertyMap {
        let request = match serde_json::to_string(styles) {
            Ok(request) => request,
            Err(err) => {
                warn!("could not encode inline styles: {}", err);
                return styles.clone();
            }
        };

        let theme = self.theme();
        let response = match self.engine.expand_styles(&request, theme.payload()) {
            Ok(response) => response,
            Err(err) => {
                warn!("engine failed processing inline styles: {}", err);
                return styles.clone();
            }
        };

        match parse_property_map(&response) {
            Ok(Some(processed)) => processed,
            Ok(None) => styles.clone(),
            Err(err) => {
                warn!("unreadable processed styles: {}", err);
                styles.clone()
            }
        }
    }

    /// Activates a serialized theme and drops every cached entry.
    ///
    /// The engine is initialized with the new theme first; if that fails
    /// the switch still happens. An unnamed or malformed theme is labelled
    /// `"unknown"`.
    pub fn set_theme(&self, theme_json: impl Into<String>, metrics: DeviceMetrics) {
        let state = Arc::new(ThemeState::new(theme_json, metrics));

        let switching = self.theme_switch.lock();
        if let Err(err) = self.engine.initialize(state.json(), metrics) {
            warn!("engine failed to initialize theme '{}': {}", state.name(), err);
        }

        let dropped = {
            let mut inner = self.inner.lock();
            let dropped = inner.entries.len();
            inner.theme = Arc::clone(&state);
            inner.invalidate();
            dropped
        };
        drop(switching);
        self.counters.invalidation();

        debug!(
            "theme '{}' active (density {}, scaled {}), dropped {} cached styles",
            state.name(),
            metrics.display_density,
            metrics.scaled_density,
            dropped
        );
    }

    /// Activates a loaded theme document. See [`set_theme`](Self::set_theme).
    pub fn set_theme_source(&self, source: &ThemeSource, metrics: DeviceMetrics) {
        self.set_theme(source.json(), metrics);
    }

    /// Drops every cached entry. The active theme is kept.
    pub fn clear(&self) {
        let dropped = {
            let mut inner = self.inner.lock();
            let dropped = inner.entries.len();
            inner.invalidate();
            dropped
        };
        self.counters.invalidation();
        debug!("style cache cleared, dropped {} entries", dropped);
    }

    /// Renders a stylesheet for `usage` under the active theme.
    ///
    /// Returns an empty string if the engine cannot render one.
    pub fn render_css(&self, usage: &UsageSnapshot) -> String {
        let request = match usage.to_json() {
            Ok(request) => request,
            Err(err) => {
                warn!("could not encode usage snapshot: {}", err);
                return String::new();
            }
        };

        let theme = self.theme();
        match self.engine.render_css(&request, theme.payload()) {
            Ok(css) => css,
            Err(err) => {
                warn!("engine failed rendering css: {}", err);
                String::new()
            }
        }
    }

    /// The engine's version, or `"unknown"`.
    pub fn engine_version(&self) -> String {
        self.engine.version().unwrap_or_else(|err| {
            debug!("engine version unavailable: {}", err);
            "unknown".to_string()
        })
    }
}

fn bundled_theme<E: StyleEngine>(engine: &E) -> Option<String> {
    match engine.default_state() {
        Ok(json) if !json.trim().is_empty() => Some(json),
        Ok(_) => {
            warn!("engine returned an empty default theme, using {{}}");
            None
        }
        Err(err) => {
            warn!("engine has no default theme, using {{}}: {}", err);
            None
        }
    }
}

impl<E> StyleCache<E> {
    fn theme(&self) -> Arc<ThemeState> {
        Arc::clone(&self.inner.lock().theme)
    }

    /// The readable name of the active theme.
    pub fn theme_name(&self) -> String {
        self.theme().name().to_string()
    }

    /// The active theme as it was handed to [`set_theme`](StyleCache::set_theme).
    pub fn theme_json(&self) -> String {
        self.theme().json().to_string()
    }

    /// The device metrics of the active theme.
    pub fn metrics(&self) -> DeviceMetrics {
        self.theme().metrics()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entry limit, or `None` when unbounded.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.config.capacity()
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }
}

impl<E> fmt::Debug for StyleCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("StyleCache")
            .field("theme", &inner.theme.name())
            .field("entries", &inner.entries.len())
            .field("capacity", &self.config.capacity())
            .field("generation", &inner.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::theme::UNKNOWN_THEME;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        computes: AtomicUsize,
    }

    impl StyleEngine for Counting {
        fn compute_styles(
            &self,
            selector: &str,
            classes: &[String],
            _theme_json: &str,
        ) -> Result<String, EngineError> {
            self.computes.fetch_add(1, Ordering::SeqCst);
            Ok(format!(
                r#"{{"selector":"{}","classes":{}}}"#,
                selector,
                classes.len()
            ))
        }

        fn expand_styles(&self, _props_json: &str, _theme_json: &str) -> Result<String, EngineError> {
            Err(EngineError::call("not expected"))
        }
    }

    fn computes(cache: &StyleCache<Counting>) -> usize {
        cache.engine().computes.load(Ordering::SeqCst)
    }

    #[test]
    fn test_hit_returns_same_map() {
        let cache = StyleCache::new(Counting::default());
        let first = cache.get_styles("div", "a b");
        let second = cache.get_styles("div", "a b");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first["classes"], 2);
        assert_eq!(computes(&cache), 1);
    }

    #[test]
    fn test_distinct_keys_computed_separately() {
        let cache = StyleCache::new(Counting::default());
        cache.get_styles("div", "a");
        cache.get_styles("div", "b");
        cache.get_styles("span", "a");
        assert_eq!(computes(&cache), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let cache = StyleCache::new(Counting::default());
        cache.get_styles("div", "a");
        cache.clear();
        assert!(cache.is_empty());
        cache.get_styles("div", "a");
        assert_eq!(computes(&cache), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let cache = StyleCache::new(Counting::default());
        cache.clear();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 2);
    }

    #[test]
    fn test_set_theme_keeps_metrics_and_name() {
        let cache = StyleCache::new(Counting::default());
        cache.set_theme(r#"{"name":"Night"}"#, DeviceMetrics::new(2.0, 2.0));
        assert_eq!(cache.theme_name(), "Night");
        assert_eq!(cache.metrics(), DeviceMetrics::new(2.0, 2.0));
        assert_eq!(cache.theme_json(), r#"{"name":"Night"}"#);
    }

    #[test]
    fn test_initial_theme_is_unknown() {
        let cache = StyleCache::new(Counting::default());
        assert_eq!(cache.theme_name(), UNKNOWN_THEME);
        assert_eq!(cache.metrics(), DeviceMetrics::default());
    }

    #[test]
    fn test_default_theme_json_falls_back_to_empty_object() {
        let cache = StyleCache::new(Counting::default());
        assert_eq!(cache.default_theme_json(), "{}");
        assert_eq!(cache.theme_json(), "{}");
    }

    #[test]
    fn test_bounded_eviction_counted() {
        let config = CacheConfig::bounded(NonZeroUsize::new(2).unwrap());
        let cache = StyleCache::with_config(Counting::default(), config);
        cache.get_styles("a", "");
        cache.get_styles("b", "");
        cache.get_styles("c", "");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_unbounded_never_evicts() {
        let cache = StyleCache::with_config(Counting::default(), CacheConfig::unbounded());
        for i in 0..(DEFAULT_CAPACITY + 10) {
            cache.get_styles("div", &format!("c{}", i));
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY + 10);
        assert_eq!(cache.stats().evictions, 0);
        assert!(cache.capacity().is_none());
    }

    #[test]
    fn test_process_styles_engine_error_returns_input() {
        let cache = StyleCache::new(Counting::default());
        let mut input = PropertyMap::new();
        input.insert("margin".into(), 4.into());
        assert_eq!(cache.process_styles(&input), input);
    }

    #[test]
    fn test_render_css_unsupported_is_empty() {
        let cache = StyleCache::new(Counting::default());
        assert_eq!(cache.render_css(&UsageSnapshot::new()), "");
        assert_eq!(cache.engine_version(), "unknown");
    }

    #[test]
    fn test_debug_output() {
        let cache = StyleCache::new(Counting::default());
        cache.get_styles("div", "");
        let debug = format!("{:?}", cache);
        assert!(debug.contains("StyleCache"));
        assert!(debug.contains("entries: 1"));
    }
}

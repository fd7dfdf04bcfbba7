#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use themed_style_cache::{DeviceMetrics, EngineError, StyleEngine};

/// What the stub answers for a call.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Fail(String),
}

impl Reply {
    pub fn body(text: &str) -> Self {
        Reply::Body(text.to_string())
    }

    fn into_result(self) -> Result<String, EngineError> {
        match self {
            Reply::Body(text) => Ok(text),
            Reply::Fail(message) => Err(EngineError::call(message)),
        }
    }
}

/// Scriptable engine that records every call.
pub struct StubEngine {
    styles: Mutex<HashMap<(String, Vec<String>), Reply>>,
    fallback: Mutex<Reply>,
    expand: Mutex<Option<Reply>>,
    fail_initialize: Mutex<bool>,
    bundled: Mutex<Option<String>>,
    compute_calls: AtomicUsize,
    expand_calls: AtomicUsize,
    initialize_calls: AtomicUsize,
    compute_themes: Mutex<Vec<String>>,
    initialized: Mutex<Vec<(String, DeviceMetrics)>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            styles: Mutex::new(HashMap::new()),
            fallback: Mutex::new(Reply::body("{}")),
            expand: Mutex::new(None),
            fail_initialize: Mutex::new(false),
            bundled: Mutex::new(None),
            compute_calls: AtomicUsize::new(0),
            expand_calls: AtomicUsize::new(0),
            initialize_calls: AtomicUsize::new(0),
            compute_themes: Mutex::new(Vec::new()),
            initialized: Mutex::new(Vec::new()),
        }
    }

    /// Answers `reply` for exactly this selector and class sequence.
    pub fn on(&self, selector: &str, classes: &[&str], reply: Reply) {
        let classes = classes.iter().map(|c| c.to_string()).collect();
        self.styles
            .lock()
            .insert((selector.to_string(), classes), reply);
    }

    /// Answers `reply` for every unscripted lookup.
    pub fn otherwise(&self, reply: Reply) {
        *self.fallback.lock() = reply;
    }

    /// Answers `reply` for expansions; unset means echo the input.
    pub fn on_expand(&self, reply: Reply) {
        *self.expand.lock() = Some(reply);
    }

    /// Ships `theme_json` as the engine's default theme.
    pub fn bundle_theme(&self, theme_json: &str) {
        *self.bundled.lock() = Some(theme_json.to_string());
    }

    pub fn fail_initialize(&self) {
        *self.fail_initialize.lock() = true;
    }

    pub fn compute_calls(&self) -> usize {
        self.compute_calls.load(Ordering::SeqCst)
    }

    pub fn expand_calls(&self) -> usize {
        self.expand_calls.load(Ordering::SeqCst)
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn compute_themes(&self) -> Vec<String> {
        self.compute_themes.lock().clone()
    }

    pub fn initialized(&self) -> Vec<(String, DeviceMetrics)> {
        self.initialized.lock().clone()
    }
}

impl StyleEngine for StubEngine {
    fn compute_styles(
        &self,
        selector: &str,
        classes: &[String],
        theme_json: &str,
    ) -> Result<String, EngineError> {
        self.compute_calls.fetch_add(1, Ordering::SeqCst);
        self.compute_themes.lock().push(theme_json.to_string());
        let scripted = self
            .styles
            .lock()
            .get(&(selector.to_string(), classes.to_vec()))
            .cloned();
        scripted
            .unwrap_or_else(|| self.fallback.lock().clone())
            .into_result()
    }

    fn expand_styles(&self, props_json: &str, _theme_json: &str) -> Result<String, EngineError> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
        match self.expand.lock().clone() {
            Some(reply) => reply.into_result(),
            None => Ok(props_json.to_string()),
        }
    }

    fn initialize(&self, theme_json: &str, metrics: DeviceMetrics) -> Result<(), EngineError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.initialized
            .lock()
            .push((theme_json.to_string(), metrics));
        if *self.fail_initialize.lock() {
            return Err(EngineError::call("initialize rejected"));
        }
        Ok(())
    }

    fn default_state(&self) -> Result<String, EngineError> {
        match self.bundled.lock().clone() {
            Some(theme) => Ok(theme),
            None => Err(EngineError::Unsupported("default_state")),
        }
    }

    fn render_css(&self, usage_json: &str, _theme_json: &str) -> Result<String, EngineError> {
        Ok(format!("/* {} */", usage_json))
    }

    fn version(&self) -> Result<String, EngineError> {
        Ok("stub-1.0".to_string())
    }
}

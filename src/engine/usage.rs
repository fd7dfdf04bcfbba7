//! Observed class and tag usage, the input to CSS rendering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// The classes, tags, and tag/class pairs seen on rendered elements.
///
/// Pairs are encoded as `"tag|class"`. Sets are ordered so the encoded
/// snapshot is stable for identical usage.
///
/// # Example
///
/// ```rust
/// use themed_style_cache::UsageSnapshot;
///
/// let mut usage = UsageSnapshot::new();
/// usage.record("button", "btn primary");
/// assert!(usage.used_tag_classes.contains("button|primary"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    #[serde(default)]
    pub used_classes: BTreeSet<String>,
    #[serde(default)]
    pub used_tags: BTreeSet<String>,
    #[serde(default)]
    pub used_tag_classes: BTreeSet<String>,
}

impl UsageSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an element with the given tag and class list.
    pub fn record(&mut self, tag: &str, class_list: &str) {
        let tag = tag.trim();
        if !tag.is_empty() {
            self.used_tags.insert(tag.to_string());
        }
        for class in class_list.split_ascii_whitespace() {
            self.used_classes.insert(class.to_string());
            if !tag.is_empty() {
                self.used_tag_classes.insert(format!("{}|{}", tag, class));
            }
        }
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.used_classes.is_empty() && self.used_tags.is_empty()
    }

    /// Encodes the snapshot as JSON for the engine.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}

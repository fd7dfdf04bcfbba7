//! Cache keys.

use std::fmt;

use crate::style::split_class_list;

/// The (selector, class list) pair a cached style mapping belongs to.
///
/// Both parts are kept verbatim: `"a b"` and `"a  b"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    selector: String,
    class_list: String,
}

impl StyleKey {
    pub fn new(selector: impl Into<String>, class_list: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            class_list: class_list.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn class_list(&self) -> &str {
        &self.class_list
    }

    /// The class tokens, in order, as handed to the engine.
    pub fn classes(&self) -> Vec<String> {
        split_class_list(&self.class_list)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.selector, self.class_list)
    }
}

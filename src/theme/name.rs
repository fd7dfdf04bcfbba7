//! Human-readable theme names for diagnostics.

use serde_json::Value;

use super::error::ThemeError;

/// Label used when a theme payload does not yield a name.
pub const UNKNOWN_THEME: &str = "unknown";

/// Derives a readable name from a serialized theme document.
///
/// For a multi-theme document (`themes: { key: {...} }`) the active key is
/// `current_theme`, then `default_theme`, then the first theme listed. The
/// name is that theme's `name` field, or the key itself. A single-theme
/// document with a top-level `name` uses that.
///
/// # Example
///
/// ```rust
/// use themed_style_cache::theme_name;
///
/// let doc = r#"{
///     "themes": { "dark": { "name": "Dark Theme" }, "light": {} },
///     "current_theme": "dark"
/// }"#;
/// assert_eq!(theme_name(doc).unwrap(), "Dark Theme");
/// assert!(theme_name("not json").is_err());
/// ```
pub fn theme_name(theme_json: &str) -> Result<String, ThemeError> {
    let document: Value = serde_json::from_str(theme_json)?;
    name_from_document(&document).ok_or(ThemeError::Unnamed)
}

/// Same as [`theme_name`], on an already-parsed document.
pub fn name_from_document(document: &Value) -> Option<String> {
    let root = document.as_object()?;

    if let Some(themes) = root.get("themes").and_then(Value::as_object) {
        let key = ["current_theme", "default_theme"]
            .iter()
            .filter_map(|field| root.get(*field).and_then(Value::as_str))
            .find(|key| themes.contains_key(*key))
            .or_else(|| themes.keys().next().map(String::as_str))?;

        let display = themes
            .get(key)
            .and_then(|entry| entry.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty());

        return Some(display.unwrap_or(key).to_string());
    }

    root.get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
}

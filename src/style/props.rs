//! Property maps and their text encoding.

use serde_json::Value;

use super::error::PayloadError;

/// A resolved set of style properties.
///
/// Keys are property names (`"color"`, `"paddingTop"`, ...); values are
/// whatever the engine produced: strings, numbers, or nested objects.
pub type PropertyMap = serde_json::Map<String, Value>;

/// Decodes an engine response into a property map.
///
/// Returns `Ok(None)` when the response carries no styles: an empty or
/// blank string, `null`, or an empty object. Callers decide what "no
/// styles" means for them.
///
/// # Example
///
/// ```rust
/// use themed_style_cache::parse_property_map;
///
/// let styles = parse_property_map(r#"{"color":"red"}"#).unwrap().unwrap();
/// assert_eq!(styles["color"], "red");
///
/// assert!(parse_property_map("").unwrap().is_none());
/// assert!(parse_property_map("{}").unwrap().is_none());
/// assert!(parse_property_map("[1, 2]").is_err());
/// ```
pub fn parse_property_map(text: &str) -> Result<Option<PropertyMap>, PayloadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(trimmed)? {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(PayloadError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

/// Splits a class-list string into its class tokens.
///
/// Tokens are separated by ASCII whitespace; empty tokens are dropped
/// and order is preserved.
///
/// ```rust
/// use themed_style_cache::split_class_list;
///
/// assert_eq!(split_class_list("  btn   primary "), vec!["btn", "primary"]);
/// assert!(split_class_list("").is_empty());
/// ```
pub fn split_class_list(class_list: &str) -> Vec<String> {
    class_list
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

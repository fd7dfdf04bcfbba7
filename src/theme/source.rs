//! Loading human-authored theme documents.
//!
//! Themes are written in YAML (or JSON, which YAML accepts) and handed to
//! the engine as JSON text. [`ThemeSource`] performs that normalization once
//! so the cache and the engine only ever see the JSON form.
//!
//! # Example
//!
//! ```rust
//! use themed_style_cache::ThemeSource;
//!
//! let source = ThemeSource::from_yaml_str(
//!     r##"
//! themes:
//!   dark:
//!     name: Dark Theme
//!     selectors:
//!       button:
//!         color: "#ffffff"
//! current_theme: dark
//! "##,
//! )
//! .unwrap();
//!
//! assert_eq!(source.name(), Some("Dark Theme"));
//! assert!(source.json().starts_with(r#"{"themes":"#));
//! ```

use std::path::Path;

use log::warn;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use super::error::ThemeError;
use super::name::name_from_document;
use crate::style::json_kind;

/// A theme document normalized to the JSON form the engine consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSource {
    document: Value,
    json: String,
    name: Option<String>,
}

impl ThemeSource {
    /// Parses a YAML theme document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ThemeError> {
        let parsed: YamlValue = serde_yaml::from_str(text)?;
        Self::from_document(yaml_to_json(parsed)?)
    }

    /// Parses a JSON theme document.
    pub fn from_json_str(text: &str) -> Result<Self, ThemeError> {
        let parsed: Value = serde_json::from_str(text)?;
        Self::from_document(parsed)
    }

    /// Reads a theme file.
    ///
    /// Files with a `.json` extension are parsed as JSON; anything else
    /// (`.yaml`, `.yml`, no extension) as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    fn from_document(document: Value) -> Result<Self, ThemeError> {
        if !document.is_object() {
            return Err(ThemeError::NotAMapping {
                found: json_kind(&document),
            });
        }
        let json = document.to_string();
        let name = name_from_document(&document);
        Ok(Self {
            document,
            json,
            name,
        })
    }

    /// The normalized JSON text.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// The theme's readable name, if the document names one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The parsed document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Consumes the source, returning the normalized JSON text.
    pub fn into_json(self) -> String {
        self.json
    }
}

/// Normalizes YAML theme text to JSON, returning `"{}"` on any failure.
///
/// For callers that hand the result straight to the engine, where an empty
/// theme is preferable to no theme at all.
pub fn normalize_yaml(text: &str) -> String {
    match ThemeSource::from_yaml_str(text) {
        Ok(source) => source.into_json(),
        Err(err) => {
            warn!("failed to normalize theme YAML: {}", err);
            "{}".to_string()
        }
    }
}

fn yaml_to_json(value: YamlValue) -> Result<Value, ThemeError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut out = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                out.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(out)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // .nan and .inf have no JSON form
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

// YAML allows scalar keys of any type; JSON keys are strings.
fn yaml_key(key: YamlValue) -> Result<String, ThemeError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) => Err(ThemeError::UnsupportedKey { found: "sequence" }),
        YamlValue::Mapping(_) => Err(ThemeError::UnsupportedKey { found: "mapping" }),
    }
}

//! Device display metrics carried alongside the active theme.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name under which the display density is embedded in a theme payload.
pub const DISPLAY_DENSITY_KEY: &str = "displayDensity";
/// Field name under which the scaled (font) density is embedded in a theme payload.
pub const SCALED_DENSITY_KEY: &str = "scaledDensity";

/// Display densities the engine uses for unit conversion.
///
/// `display_density` scales `dp` values, `scaled_density` scales `sp`
/// values. Both default to `1.0`, the mdpi baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    #[serde(default = "baseline_density")]
    pub display_density: f32,
    #[serde(default = "baseline_density")]
    pub scaled_density: f32,
}

fn baseline_density() -> f32 {
    1.0
}

impl DeviceMetrics {
    /// Creates metrics from a display density and a scaled density.
    pub fn new(display_density: f32, scaled_density: f32) -> Self {
        Self {
            display_density,
            scaled_density,
        }
    }

    /// Returns `theme_json` with the densities added as top-level fields.
    ///
    /// Style computations receive the theme in this form. Payloads that are
    /// not JSON objects are returned unchanged: the engine treats them as
    /// "no theme" either way.
    ///
    /// ```rust
    /// use themed_style_cache::DeviceMetrics;
    ///
    /// let payload = DeviceMetrics::new(2.0, 2.5).embed(r#"{"themes":{}}"#);
    /// let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    /// assert_eq!(value["displayDensity"], 2.0);
    /// assert_eq!(value["scaledDensity"], 2.5);
    /// ```
    pub fn embed(&self, theme_json: &str) -> String {
        let mut document = match serde_json::from_str::<Value>(theme_json) {
            Ok(Value::Object(map)) => map,
            _ => return theme_json.to_string(),
        };

        document.insert(
            DISPLAY_DENSITY_KEY.to_string(),
            density_value(self.display_density),
        );
        document.insert(
            SCALED_DENSITY_KEY.to_string(),
            density_value(self.scaled_density),
        );

        Value::Object(document).to_string()
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self::new(baseline_density(), baseline_density())
    }
}

// Non-finite densities have no JSON form; fall back to the baseline.
fn density_value(density: f32) -> Value {
    serde_json::Number::from_f64(f64::from(density))
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(baseline_density()))
}

//! Viewer preferences
//!
//! Read once at startup: from the page's query string on the web, from an
//! optional JSON file on native. Nothing is ever written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{AUTO_ROTATE_SPEED, DEFAULT_RADIUS, DEFAULT_SPEED, RING_SEGMENTS};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Segments per revolution ring
    pub fn ring_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => RING_SEGMENTS / 2,
            QualityPreset::Medium => RING_SEGMENTS,
            QualityPreset::High => RING_SEGMENTS * 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Viewer preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,
    /// Auto-play speed multiplier
    pub speed: f32,
    pub radius: f32,
    /// Show the revolution axis in phase 2
    pub show_axis: bool,
    pub show_grid: bool,
    /// Camera orbit speed once complete
    pub auto_rotate_speed: f32,
    /// Disable breathing and color cycling
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            speed: DEFAULT_SPEED,
            radius: DEFAULT_RADIUS,
            show_axis: false,
            show_grid: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            reduced_motion: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

impl Settings {
    /// Apply one `key=value` pair; unknown keys and bad values keep the default
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        let applied = match key {
            "quality" => QualityPreset::from_str(value).map(|q| self.quality = q),
            "speed" => parse_number(value).map(|v| self.speed = v),
            "radius" => parse_number(value).map(|v| self.radius = v),
            "axis" | "show_axis" => parse_flag(value).map(|v| self.show_axis = v),
            "grid" | "show_grid" => parse_flag(value).map(|v| self.show_grid = v),
            "rotate" | "auto_rotate_speed" => parse_number(value)
                .filter(|v| *v >= 0.0)
                .map(|v| self.auto_rotate_speed = v),
            "reduced_motion" => parse_flag(value).map(|v| self.reduced_motion = v),
            _ => {
                log::warn!("Unknown setting '{}'", key);
                return false;
            }
        };

        if applied.is_none() {
            log::warn!("Ignoring invalid value '{}' for '{}'", value, key);
        }
        applied.is_some()
    }

    /// Apply `key=value` pairs in order
    pub fn with_overrides<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (key, value) in pairs {
            self.apply_override(key, value);
        }
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from the page's query string (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window().and_then(|w| w.location().search().ok());
        let params = search.and_then(|s| web_sys::UrlSearchParams::new_with_str(&s).ok());

        let Some(params) = params else {
            log::info!("Using default settings");
            return Self::default();
        };

        let mut settings = Self::default();
        for key in [
            "quality",
            "speed",
            "radius",
            "axis",
            "grid",
            "rotate",
            "reduced_motion",
        ] {
            if let Some(value) = params.get(key) {
                settings.apply_override(key, &value);
            }
        }
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_presets() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Medium.ring_segments(), 64);
        assert!(QualityPreset::Low.ring_segments() < QualityPreset::High.ring_segments());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides([
            ("speed", "1.5"),
            ("radius", "2"),
            ("axis", "1"),
            ("grid", "off"),
            ("quality", "low"),
            ("reduced_motion", "true"),
        ]);
        assert_eq!(settings.speed, 1.5);
        assert_eq!(settings.radius, 2.0);
        assert!(settings.show_axis);
        assert!(!settings.show_grid);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.reduced_motion);
    }

    #[test]
    fn test_invalid_overrides_keep_defaults() {
        let mut settings = Settings::default();
        assert!(!settings.apply_override("speed", "fast"));
        assert!(!settings.apply_override("radius", "NaN"));
        assert!(!settings.apply_override("grid", "maybe"));
        assert!(!settings.apply_override("rotate", "-1"));
        assert!(!settings.apply_override("volume", "11"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "speed": 2.0, "quality": "High" }"#).unwrap();
        assert_eq!(settings.speed, 2.0);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.radius, DEFAULT_RADIUS);

        assert!(matches!(Settings::from_json("{ nope"), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from_path("/nonexistent/archimedes-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}

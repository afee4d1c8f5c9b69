use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReaderError, Result};
use crate::text_map::DEFAULT_LINE_MERGE_TOLERANCE;

const APP_NAME: &str = "lectern";
const SETTINGS_FILENAME: &str = "settings.json";

/// Viewer tunables, read once at startup
///
/// Every field falls back to its default when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rasterization scale, independent of on-screen zoom
    pub render_scale: f64,
    /// Vertical tolerance in points for merging word boxes into one band
    pub line_merge_tolerance: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Wheel delta (120 per notch) divided by this gives the zoom change
    pub wheel_divisor: f64,
    pub fit_width_margin: f64,
    pub fit_width_min: f64,
    pub highlight_padding: f64,
    /// RGBA, 0-255 per channel
    pub highlight_color: [u8; 4],
    /// Space around the page, in points
    pub page_margin: i32,
    /// Directory containing the PDFium shared library
    pub pdfium_library_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render_scale: 4.0,
            line_merge_tolerance: DEFAULT_LINE_MERGE_TOLERANCE,
            zoom_step: 0.2,
            min_zoom: 0.1,
            max_zoom: 10.0,
            wheel_divisor: 1200.0,
            fit_width_margin: 100.0,
            fit_width_min: 100.0,
            highlight_padding: 2.0,
            highlight_color: [255, 255, 0, 100],
            page_margin: 40,
            pdfium_library_path: None,
        }
    }
}

impl Settings {
    /// Load from the user config dir, falling back to defaults on any problem
    pub fn load_or_default() -> Self {
        match settings_path() {
            Some(path) => Self::load_or_default_from(&path),
            None => {
                debug!("No config directory; using default settings");
                Self::default()
            }
        }
    }

    /// Load `path`; a missing file gives defaults, a bad one defaults plus a warning
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}; using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ReaderError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ReaderError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(contents)?;
        Ok(settings.sanitized())
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        self.render_scale = positive(self.render_scale, defaults.render_scale);
        self.line_merge_tolerance =
            positive(self.line_merge_tolerance, defaults.line_merge_tolerance);
        self.zoom_step = positive(self.zoom_step, defaults.zoom_step);
        self.min_zoom = positive(self.min_zoom, defaults.min_zoom);
        self.max_zoom = positive(self.max_zoom, defaults.max_zoom);
        self.wheel_divisor = positive(self.wheel_divisor, defaults.wheel_divisor);
        self.fit_width_min = positive(self.fit_width_min, defaults.fit_width_min);
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        if !self.highlight_padding.is_finite() || self.highlight_padding < 0.0 {
            self.highlight_padding = defaults.highlight_padding;
        }
        if !self.fit_width_margin.is_finite() || self.fit_width_margin < 0.0 {
            self.fit_width_margin = defaults.fit_width_margin;
        }
        self.page_margin = self.page_margin.max(0);
        self
    }

    /// Highlight fill as cairo-style floats
    pub fn highlight_rgba(&self) -> (f64, f64, f64, f64) {
        let [r, g, b, a] = self.highlight_color;
        (
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME).join(SETTINGS_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.render_scale, 4.0);
        assert_eq!(settings.line_merge_tolerance, 5.0);
        assert_eq!(settings.min_zoom, 0.1);
        assert_eq!(settings.max_zoom, 10.0);
        assert_eq!(settings.page_margin, 40);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::parse(r#"{ "render_scale": 2.0 }"#).unwrap();
        assert_eq!(settings.render_scale, 2.0);
        assert_eq!(settings.zoom_step, 0.2);
        assert_eq!(settings.highlight_color, [255, 255, 0, 100]);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::parse("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(Settings::parse("render_scale = 2").is_err());
        assert!(Settings::parse(r#"{ "render_scale": "big" }"#).is_err());
    }

    #[test]
    fn test_sanitizes_bad_values() {
        let settings = Settings::parse(
            r#"{ "render_scale": -1.0, "min_zoom": 5.0, "max_zoom": 0.5, "page_margin": -3 }"#,
        )
        .unwrap();
        assert_eq!(settings.render_scale, 4.0);
        assert_eq!(settings.min_zoom, 0.5);
        assert_eq!(settings.max_zoom, 5.0);
        assert_eq!(settings.page_margin, 0);
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("lectern-no-such-settings.json");
        assert!(matches!(
            Settings::load_from(&path),
            Err(ReaderError::Settings { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "lectern-settings-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "line_merge_tolerance": 3.5 }"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(settings.line_merge_tolerance, 3.5);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "lectern-malformed-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ render_scale: ").unwrap();
        let settings = Settings::load_or_default_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("lectern-absent-settings.json");
        assert_eq!(Settings::load_or_default_from(&path), Settings::default());
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "lectern-valid-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "page_margin": 12 }"#).unwrap();
        let settings = Settings::load_or_default_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(settings.page_margin, 12);
    }

    #[test]
    fn test_highlight_rgba() {
        let (r, g, b, a) = Settings::default().highlight_rgba();
        assert_eq!((r, g, b), (1.0, 1.0, 0.0));
        assert!((a - 100.0 / 255.0).abs() < 1e-9);
    }
}

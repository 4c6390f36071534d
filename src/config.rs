use std::path::Path;

use egui::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables of the editing surface. Every field may be omitted in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width/height a resize can produce, in logical units.
    pub min_element_size: f32,
    /// Side of a resize or endpoint handle in screen pixels.
    pub handle_size: f32,
    /// Distance of the rotation handle above the top edge, in logical units.
    pub rotation_handle_offset: f32,
    /// Side of the rotation handle in screen pixels.
    pub rotation_handle_size: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom change per ctrl+scroll notch.
    pub zoom_step: f32,
    /// Screen-space margin kept around the slide by zoom-to-fit.
    pub fit_margin: f32,
    pub slide_width: f32,
    pub slide_height: f32,
    /// Text shown in an empty text box. Committing an empty edit stores this.
    pub text_placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_element_size: 20.0,
            handle_size: 8.0,
            rotation_handle_offset: 30.0,
            rotation_handle_size: 8.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 0.1,
            fit_margin: 40.0,
            slide_width: 1200.0,
            slide_height: 800.0,
            text_placeholder: "Double-click to edit text".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_element_size", self.min_element_size),
            ("handle_size", self.handle_size),
            ("rotation_handle_size", self.rotation_handle_size),
            ("min_zoom", self.min_zoom),
            ("zoom_step", self.zoom_step),
            ("slide_width", self.slide_width),
            ("slide_height", self.slide_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.fit_margin < 0.0 || self.rotation_handle_offset < 0.0 {
            return Err(ConfigError::Invalid("fit_margin and rotation_handle_offset must not be negative".into()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    pub fn slide_size(&self) -> Vec2 {
        Vec2::new(self.slide_width, self.slide_height)
    }
}

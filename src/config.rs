use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds used by the diagnostic heuristics.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticConfig {
    /// Visual viewport scale above which the page counts as zoomed.
    pub zoom_warning_scale: f64,
    /// Visual viewport scale above which the Larger Text heuristic may fire.
    pub large_text_scale: f64,
    /// iOS auto-zooms focused inputs with a font smaller than this (px).
    pub min_input_font_px: f64,
    /// How far (in percent of the viewport width) the document may exceed
    /// the viewport before it counts as overflowing.
    pub overflow_tolerance_percent: u32,
    /// Substring the meta viewport content must contain.
    pub required_viewport_token: String,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            zoom_warning_scale: 1.1,
            large_text_scale: 1.3,
            min_input_font_px: 16.0,
            overflow_tolerance_percent: 5,
            required_viewport_token: "width=device-width".to_string(),
        }
    }
}

impl DiagnosticConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("zoom_warning_scale", self.zoom_warning_scale),
            ("large_text_scale", self.large_text_scale),
            ("min_input_font_px", self.min_input_font_px),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.required_viewport_token.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "required_viewport_token must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

//! Render settings and their TOML file format.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Parameters controlling framing, resolution, and render quality.
///
/// All fields have defaults, so a TOML settings file may set any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Camera azimuth around the model (degrees).
    pub azimuth: f64,
    /// Camera elevation above the horizontal plane (degrees).
    pub elevation: f64,
    /// Image width in pixels; 0 selects the 512 default.
    pub width: u32,
    /// Image height in pixels; 0 selects the 512 default.
    pub height: u32,
    /// Width-over-height ratio applied when auto-framing.
    pub aspect: f64,
    /// Pixel samples for the final configuration.
    pub samples: u32,
    /// Explicit view diameter, bypassing the bounding-box fit.
    pub view_size_override: Option<f64>,
    /// Eye distance from the view center, in view units.
    pub eye_backoff: f64,
    /// Directories searched for shaders and other render resources.
    pub search_paths: Vec<String>,
    /// Name recorded in the project document.
    pub project_name: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            azimuth: 35.0,
            elevation: 25.0,
            width: 0,
            height: 0,
            aspect: 1.0,
            samples: 25,
            view_size_override: None,
            eye_backoff: std::f64::consts::SQRT_2,
            search_paths: Vec::new(),
            project_name: "glint project".to_string(),
        }
    }
}

impl RenderSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.azimuth.is_finite() || !self.elevation.is_finite() {
            return Err(RenderError::InvalidSettings(
                "azimuth and elevation must be finite".into(),
            ));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(RenderError::InvalidSettings(
                "aspect must be positive".into(),
            ));
        }
        if self.samples == 0 {
            return Err(RenderError::InvalidSettings(
                "samples must be at least 1".into(),
            ));
        }
        if !self.eye_backoff.is_finite() {
            return Err(RenderError::InvalidSettings(
                "eye_backoff must be finite".into(),
            ));
        }
        if let Some(size) = self.view_size_override {
            if !size.is_finite() {
                return Err(RenderError::InvalidSettings(
                    "view_size_override must be finite".into(),
                ));
            }
        }
        Ok(())
    }

    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

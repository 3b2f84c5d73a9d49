//! Scene configuration. Every field has a default, so an empty JSON object
//! (or no config at all) yields the stock scene.

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::{Result, SceneError};
use crate::sky::{SkyParameter, SkyParameters};
use crate::text::{TextParams, SIZE_RANGE};

/// `id` of the optional `<script type="application/json">` block read at
/// startup.
pub const CONFIG_ELEMENT_ID: &str = "scene-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub max_pixel_ratio: f32,
    /// Seconds from burst to disposal.
    pub firework_duration: f32,
    pub particle_textures: Vec<String>,
    pub font_url: String,
    pub default_text: String,
    pub sky: SkyParameters,
    pub text: TextParams,
    pub orbit_damping: f32,
    pub panel_width: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            max_pixel_ratio: 2.0,
            firework_duration: 3.0,
            particle_textures: (1..=8).map(|i| format!("./particles/{i}.png")).collect(),
            font_url: "/Juice ITC_Regular.json".to_owned(),
            default_text: crate::text::DEFAULT_TEXT.to_owned(),
            sky: SkyParameters::default(),
            text: TextParams::default(),
            orbit_damping: 0.05,
            panel_width: 340,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: SceneConfig =
            serde_json::from_str(json).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        config.clamp_to_controls();
        Ok(config)
    }

    /// Pulls panel-backed values onto their slider ranges.
    fn clamp_to_controls(&mut self) {
        for param in SkyParameter::ALL {
            let value = self.sky.get(param);
            self.sky.set(param, value);
        }
        self.text.size = SIZE_RANGE.clamp(self.text.size);
    }

    fn validate(&self) -> Result<()> {
        if !(self.firework_duration > 0.0) {
            return Err(SceneError::Config("fireworkDuration must be positive".into()));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(SceneError::Config("maxPixelRatio must be at least 1".into()));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(SceneError::Config("camera needs 0 < near < far".into()));
        }
        if !(0.0..=1.0).contains(&self.orbit_damping) {
            return Err(SceneError::Config("orbitDamping must be in [0, 1]".into()));
        }
        Ok(())
    }
}

//! Atmospheric sky parameters and the slider table the debug panel is built
//! from.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::firework::spherical_to_cartesian;

/// Side length the unit sky cube is scaled to.
pub const SKY_SCALE: f32 = 450_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkyParameters {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    /// Sun elevation in degrees above the horizon.
    pub elevation: f32,
    /// Sun azimuth in degrees.
    pub azimuth: f32,
    pub exposure: f32,
}

impl Default for SkyParameters {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.95,
            elevation: -2.2,
            azimuth: 180.0,
            exposure: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyParameter {
    Turbidity,
    Rayleigh,
    MieCoefficient,
    MieDirectionalG,
    Elevation,
    Azimuth,
    Exposure,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Renders `value` with as many decimals as the step has.
    pub fn format(&self, value: f32) -> String {
        let decimals = if self.step > 0.0 && self.step < 1.0 {
            (-self.step.log10() - 1e-3).ceil() as usize
        } else {
            0
        };
        format!("{value:.decimals$}")
    }
}

impl SkyParameter {
    /// Panel order.
    pub const ALL: [SkyParameter; 7] = [
        SkyParameter::Turbidity,
        SkyParameter::Rayleigh,
        SkyParameter::MieCoefficient,
        SkyParameter::MieDirectionalG,
        SkyParameter::Elevation,
        SkyParameter::Azimuth,
        SkyParameter::Exposure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkyParameter::Turbidity => "turbidity",
            SkyParameter::Rayleigh => "rayleigh",
            SkyParameter::MieCoefficient => "mieCoefficient",
            SkyParameter::MieDirectionalG => "mieDirectionalG",
            SkyParameter::Elevation => "elevation",
            SkyParameter::Azimuth => "azimuth",
            SkyParameter::Exposure => "exposure",
        }
    }

    pub fn range(self) -> ParameterRange {
        match self {
            SkyParameter::Turbidity => ParameterRange::new(0.0, 20.0, 0.1),
            SkyParameter::Rayleigh => ParameterRange::new(0.0, 4.0, 0.001),
            SkyParameter::MieCoefficient => ParameterRange::new(0.0, 0.1, 0.001),
            SkyParameter::MieDirectionalG => ParameterRange::new(0.0, 1.0, 0.001),
            SkyParameter::Elevation => ParameterRange::new(-10.0, 10.0, 0.01),
            SkyParameter::Azimuth => ParameterRange::new(-180.0, 180.0, 0.1),
            SkyParameter::Exposure => ParameterRange::new(0.0, 1.0, 0.0001),
        }
    }
}

impl SkyParameters {
    pub fn get(&self, param: SkyParameter) -> f32 {
        match param {
            SkyParameter::Turbidity => self.turbidity,
            SkyParameter::Rayleigh => self.rayleigh,
            SkyParameter::MieCoefficient => self.mie_coefficient,
            SkyParameter::MieDirectionalG => self.mie_directional_g,
            SkyParameter::Elevation => self.elevation,
            SkyParameter::Azimuth => self.azimuth,
            SkyParameter::Exposure => self.exposure,
        }
    }

    /// Writes `value` clamped to the parameter's slider range. Non-finite
    /// input is ignored.
    pub fn set(&mut self, param: SkyParameter, value: f32) {
        if !value.is_finite() {
            tracing::warn!(param = param.label(), "ignoring non-finite sky value");
            return;
        }
        let value = param.range().clamp(value);
        let slot = match param {
            SkyParameter::Turbidity => &mut self.turbidity,
            SkyParameter::Rayleigh => &mut self.rayleigh,
            SkyParameter::MieCoefficient => &mut self.mie_coefficient,
            SkyParameter::MieDirectionalG => &mut self.mie_directional_g,
            SkyParameter::Elevation => &mut self.elevation,
            SkyParameter::Azimuth => &mut self.azimuth,
            SkyParameter::Exposure => &mut self.exposure,
        };
        *slot = value;
    }

    /// Unit vector towards the sun.
    pub fn sun_position(&self) -> Vec3 {
        let phi = (90.0 - self.elevation).to_radians();
        let theta = self.azimuth.to_radians();
        spherical_to_cartesian(1.0, phi, theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_precision_follows_step() {
        assert_eq!(SkyParameter::Turbidity.range().format(10.0), "10.0");
        assert_eq!(SkyParameter::Rayleigh.range().format(3.0), "3.000");
        assert_eq!(SkyParameter::Exposure.range().format(0.5), "0.5000");
        assert_eq!(ParameterRange::new(0.0, 10.0, 1.0).format(4.0), "4");
    }

    #[test]
    fn defaults_sit_inside_their_ranges() {
        let params = SkyParameters::default();
        for param in SkyParameter::ALL {
            let range = param.range();
            let value = params.get(param);
            assert!(value >= range.min && value <= range.max, "{}", param.label());
        }
    }

    #[test]
    fn set_clamps() {
        let mut params = SkyParameters::default();
        params.set(SkyParameter::Turbidity, 50.0);
        assert_eq!(params.turbidity, 20.0);
        params.set(SkyParameter::Azimuth, -500.0);
        assert_eq!(params.azimuth, -180.0);
        params.set(SkyParameter::Exposure, f32::NAN);
        assert_eq!(params.exposure, 1.0);
    }

    #[test]
    fn sun_on_horizon_points_along_azimuth() {
        let mut params = SkyParameters::default();
        params.set(SkyParameter::Elevation, 0.0);
        params.set(SkyParameter::Azimuth, 0.0);
        let sun = params.sun_position();
        assert!((sun - Vec3::Z).length() < 1e-5);

        params.set(SkyParameter::Azimuth, 90.0);
        assert!((params.sun_position() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn default_sun_is_just_below_horizon() {
        let sun = SkyParameters::default().sun_position();
        assert!(sun.y < 0.0 && sun.y > -0.05);
        assert!(sun.z < -0.99);
        assert!((sun.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn deserializes_partial_json() {
        let params: SkyParameters = serde_json::from_str(r#"{"turbidity": 4.5}"#).unwrap();
        assert_eq!(params.turbidity, 4.5);
        assert_eq!(params.rayleigh, 3.0);
    }
}

//! Detector configuration.
//!
//! The file format is JSON with human units (centimetres, degrees, nanometres)
//! so a config can be written by hand. [`DetectorConfig::grid_config`] converts
//! to the internal units expected by [`sphere_param`].
//!
//! Every field has a default, so `{}` is a valid config that reproduces the
//! reference detector: a 1 m water world holding a 5 cm water sphere cut into
//! 1 cm shells and 45 degree phi/theta sectors.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sphere_param::units::{cm, deg, nm};
use sphere_param::{DIVISIBILITY_TOLERANCE, SafetyMargins, SphereGridConfig, ThetaBinning};

/// Top-level detector configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// The world (mother) volume.
    pub world: WorldConfig,
    /// The parameterised sphere placed inside the world.
    pub voxels: VoxelConfig,
}

/// The world volume: a solid sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Outer radius in centimetres.
    pub radius_cm: f64,
    /// Material label.
    pub material: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius_cm: 100.0,
            material: "G4_WATER".to_owned(),
        }
    }
}

/// Start, end and step of an angular axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    /// First angle.
    pub start: f64,
    /// Last angle.
    pub end: f64,
    /// Segment size.
    pub step: f64,
}

impl AngleRange {
    /// Build a range from degree values.
    #[must_use]
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }
}

/// Margins between adjacent voxels, in human units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Radial margin in nanometres.
    pub radius_nm: f64,
    /// Phi margin in degrees.
    pub phi_deg: f64,
    /// Theta margin in degrees.
    pub theta_deg: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            radius_nm: 1e-3,
            phi_deg: 0.0,
            theta_deg: 0.0,
        }
    }
}

impl SafetyConfig {
    /// Convert to internal units.
    #[must_use]
    pub fn margins(&self) -> SafetyMargins {
        SafetyMargins {
            radius: self.radius_nm * nm,
            phi: self.phi_deg * deg,
            theta: self.theta_deg * deg,
        }
    }
}

/// The parameterised sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelConfig {
    /// Name given to the parameterised placement.
    pub name: String,
    /// Material label of every voxel.
    pub material: String,
    /// Inner radius in centimetres.
    pub inner_radius_cm: f64,
    /// Outer radius in centimetres.
    pub outer_radius_cm: f64,
    /// Shell thickness in centimetres.
    pub radial_step_cm: f64,
    /// Phi axis in degrees.
    pub phi_deg: AngleRange,
    /// Theta axis in degrees.
    pub theta_deg: AngleRange,
    /// Gaps between adjacent voxels.
    pub safety: SafetyConfig,
    /// Largest accepted divisibility remainder, in internal units.
    pub tolerance: f64,
    /// Theta start-angle formula.
    pub theta_binning: ThetaBinning,
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            name: "SphericalParameterisation".to_owned(),
            material: "G4_WATER".to_owned(),
            inner_radius_cm: 0.0,
            outer_radius_cm: 5.0,
            radial_step_cm: 1.0,
            phi_deg: AngleRange::new(0.0, 180.0, 45.0),
            theta_deg: AngleRange::new(0.0, 180.0, 45.0),
            safety: SafetyConfig::default(),
            tolerance: DIVISIBILITY_TOLERANCE,
            theta_binning: ThetaBinning::Legacy,
        }
    }
}

impl DetectorConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize config")
    }

    /// Grid configuration for the parameterised sphere, in internal units.
    #[must_use]
    pub fn grid_config(&self) -> SphereGridConfig {
        let v = &self.voxels;
        SphereGridConfig::radial(
            v.inner_radius_cm * cm,
            v.outer_radius_cm * cm,
            v.radial_step_cm * cm,
        )
        .with_phi(v.phi_deg.start * deg, v.phi_deg.end * deg, v.phi_deg.step * deg)
        .with_theta(
            v.theta_deg.start * deg,
            v.theta_deg.end * deg,
            v.theta_deg.step * deg,
        )
        .with_safety(v.safety.margins())
        .with_tolerance(v.tolerance)
        .with_theta_binning(v.theta_binning)
    }
}

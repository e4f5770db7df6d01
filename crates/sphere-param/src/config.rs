//! Configuration for a spherical parameterisation.
//!
//! [`SphereGridConfig`] is the unvalidated user input. Calling
//! [`SphereGridConfig::build`] checks it and produces a
//! [`SphericalParameterisation`], so a half-valid grid never exists.
//!
//! All values are in internal units (see [`crate::units`]).
//!
//! # Example
//!
//! ```
//! use sphere_param::SphereGridConfig;
//! use sphere_param::units::{cm, deg};
//!
//! let param = SphereGridConfig::radial(0.0 * cm, 5.0 * cm, 1.0 * cm)
//!     .with_phi(0.0 * deg, 180.0 * deg, 45.0 * deg)
//!     .with_theta(0.0 * deg, 180.0 * deg, 45.0 * deg)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(param.copy_count(), 80);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::param::SphericalParameterisation;
use crate::units::{PI, TWO_PI, nm, rad};

/// Largest `range % step` remainder accepted as "evenly divisible".
///
/// Floating-point remainders of exactly divisible pairs are not reliably zero,
/// so near-divisible ranges pass and the excess is truncated when the segment
/// count is derived. The value is in the range's own internal unit: millimetres
/// for the radial axis and radians for the angular axes.
pub const DIVISIBILITY_TOLERANCE: f64 = 0.2;

/// Default gap left on the inner face of every radial shell.
pub const DEFAULT_RADIUS_SAFETY: f64 = 1e-3 * nm;

/// Default gap trimmed from the end of every phi and theta span.
pub const DEFAULT_ANGLE_SAFETY: f64 = 1e-9 * rad;

/// Gaps between adjacent voxels.
///
/// The radial margin moves each shell's inner face outward. The angular margins
/// shorten each span from its nominal end. Together they keep two neighbours
/// from sharing a coincident surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SafetyMargins {
    /// Added to every voxel's inner radius.
    pub radius: f64,
    /// Subtracted from every voxel's delta phi.
    pub phi: f64,
    /// Subtracted from every voxel's delta theta.
    pub theta: f64,
}

impl Default for SafetyMargins {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_SAFETY,
            phi: DEFAULT_ANGLE_SAFETY,
            theta: DEFAULT_ANGLE_SAFETY,
        }
    }
}

impl SafetyMargins {
    /// No margins at all. Adjacent voxels share faces exactly.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            radius: 0.0,
            phi: 0.0,
            theta: 0.0,
        }
    }

    /// Set the radial margin.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the phi margin.
    #[must_use]
    pub const fn with_phi(mut self, phi: f64) -> Self {
        self.phi = phi;
        self
    }

    /// Set the theta margin.
    #[must_use]
    pub const fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }
}

/// How the start angle of a theta bin is derived.
///
/// The established placement formula offsets theta bins with the *phi* step
/// and start (`theta_index * phi_step + start_phi`). That is only correct when
/// the phi and theta parameters coincide. Downstream geometry checks may depend
/// on either behaviour, so the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThetaBinning {
    /// `theta_index * phi_step + start_phi`.
    #[default]
    Legacy,
    /// `theta_index * theta_step + start_theta`.
    Corrected,
}

const fn default_start() -> f64 {
    0.0
}

const fn default_end_phi() -> f64 {
    TWO_PI
}

const fn default_end_theta() -> f64 {
    PI
}

const fn default_tolerance() -> f64 {
    DIVISIBILITY_TOLERANCE
}

/// Requested bounds and segment sizes of a spherical grid.
///
/// Phi and theta default to the full sphere in a single segment
/// (0 to 360 degrees and 0 to 180 degrees).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereGridConfig {
    /// Inner radius of the parameterised sphere.
    pub inner_radius: f64,
    /// Outer radius of the parameterised sphere.
    pub outer_radius: f64,
    /// Thickness of each radial shell.
    pub radial_step: f64,

    /// First phi angle.
    #[cfg_attr(feature = "serde", serde(default = "default_start"))]
    pub start_phi: f64,
    /// Last phi angle.
    #[cfg_attr(feature = "serde", serde(default = "default_end_phi"))]
    pub end_phi: f64,
    /// Angular size of each phi segment.
    #[cfg_attr(feature = "serde", serde(default = "default_end_phi"))]
    pub phi_step: f64,

    /// First theta angle.
    #[cfg_attr(feature = "serde", serde(default = "default_start"))]
    pub start_theta: f64,
    /// Last theta angle.
    #[cfg_attr(feature = "serde", serde(default = "default_end_theta"))]
    pub end_theta: f64,
    /// Angular size of each theta segment.
    #[cfg_attr(feature = "serde", serde(default = "default_end_theta"))]
    pub theta_step: f64,

    /// Gaps between adjacent voxels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub safety: SafetyMargins,
    /// Largest accepted divisibility remainder.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: f64,
    /// Theta start-angle formula.
    #[cfg_attr(feature = "serde", serde(default))]
    pub theta_binning: ThetaBinning,
}

impl SphereGridConfig {
    /// Radial-only subdivision of a full sphere.
    ///
    /// # Example
    ///
    /// ```
    /// use sphere_param::SphereGridConfig;
    /// use sphere_param::units::cm;
    ///
    /// let param = SphereGridConfig::radial(0.0, 10.0 * cm, 2.0 * cm).build().unwrap();
    /// assert_eq!(param.grid().radial_count(), 5);
    /// assert_eq!(param.grid().phi_count(), 1);
    /// assert_eq!(param.grid().theta_count(), 1);
    /// ```
    #[must_use]
    pub const fn radial(inner_radius: f64, outer_radius: f64, radial_step: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
            radial_step,
            start_phi: default_start(),
            end_phi: default_end_phi(),
            phi_step: default_end_phi(),
            start_theta: default_start(),
            end_theta: default_end_theta(),
            theta_step: default_end_theta(),
            safety: SafetyMargins {
                radius: DEFAULT_RADIUS_SAFETY,
                phi: DEFAULT_ANGLE_SAFETY,
                theta: DEFAULT_ANGLE_SAFETY,
            },
            tolerance: default_tolerance(),
            theta_binning: ThetaBinning::Legacy,
        }
    }

    /// Set the phi range and segment size.
    #[must_use]
    pub const fn with_phi(mut self, start: f64, end: f64, step: f64) -> Self {
        self.start_phi = start;
        self.end_phi = end;
        self.phi_step = step;
        self
    }

    /// Set the theta range and segment size.
    #[must_use]
    pub const fn with_theta(mut self, start: f64, end: f64, step: f64) -> Self {
        self.start_theta = start;
        self.end_theta = end;
        self.theta_step = step;
        self
    }

    /// Set the voxel safety margins.
    #[must_use]
    pub const fn with_safety(mut self, safety: SafetyMargins) -> Self {
        self.safety = safety;
        self
    }

    /// Set the divisibility tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Choose the theta start-angle formula.
    #[must_use]
    pub const fn with_theta_binning(mut self, theta_binning: ThetaBinning) -> Self {
        self.theta_binning = theta_binning;
        self
    }

    /// Validate the configuration and build the indexer.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ParamError`] when any axis has a non-finite
    /// parameter, an empty range, a non-positive step, or a range that is not
    /// divisible by its step within [`tolerance`](Self::tolerance).
    pub fn build(&self) -> Result<SphericalParameterisation, ParamError> {
        SphericalParameterisation::new(self)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::units::{cm, deg};

    #[test]
    fn test_radial_defaults_to_full_sphere() {
        let config = SphereGridConfig::radial(0.0, 5.0 * cm, 1.0 * cm);
        assert_eq!(config.start_phi, 0.0);
        assert_eq!(config.end_phi, TWO_PI);
        assert_eq!(config.phi_step, TWO_PI);
        assert_eq!(config.start_theta, 0.0);
        assert_eq!(config.end_theta, PI);
        assert_eq!(config.theta_step, PI);
        assert_eq!(config.tolerance, DIVISIBILITY_TOLERANCE);
        assert_eq!(config.theta_binning, ThetaBinning::Legacy);
        assert_eq!(config.safety, SafetyMargins::default());
    }

    #[test]
    fn test_builders() {
        let config = SphereGridConfig::radial(0.0, 5.0 * cm, 1.0 * cm)
            .with_phi(10.0 * deg, 100.0 * deg, 30.0 * deg)
            .with_theta(20.0 * deg, 80.0 * deg, 20.0 * deg)
            .with_safety(SafetyMargins::none().with_radius(0.5))
            .with_tolerance(0.01)
            .with_theta_binning(ThetaBinning::Corrected);

        assert_eq!(config.start_phi, 10.0 * deg);
        assert_eq!(config.phi_step, 30.0 * deg);
        assert_eq!(config.end_theta, 80.0 * deg);
        assert_eq!(config.safety.radius, 0.5);
        assert_eq!(config.safety.phi, 0.0);
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.theta_binning, ThetaBinning::Corrected);
    }

    #[test]
    fn test_default_safety_is_tiny_and_positive() {
        let safety = SafetyMargins::default();
        assert!(safety.radius > 0.0 && safety.radius < 1e-6);
        assert!(safety.phi > 0.0 && safety.phi < 1e-6);
        assert!(safety.theta > 0.0 && safety.theta < 1e-6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_fills_angle_defaults() {
        let config: SphereGridConfig = serde_json::from_str(
            r#"{ "inner_radius": 0.0, "outer_radius": 50.0, "radial_step": 10.0 }"#,
        )
        .unwrap();
        assert_eq!(config, SphereGridConfig::radial(0.0, 50.0, 10.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_theta_binning_snake_case() {
        let binning: ThetaBinning = serde_json::from_str(r#""corrected""#).unwrap();
        assert_eq!(binning, ThetaBinning::Corrected);
    }
}

//! Validated grid geometry.

// Segment counts are small positive integers derived from finite ranges.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use tracing::warn;

use crate::config::SphereGridConfig;
use crate::error::{Axis, ParamError};

/// One validated axis of the grid: `[start, end)` cut into `count` segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    start: f64,
    end: f64,
    step: f64,
    count: usize,
}

impl AxisSpec {
    /// Validate one axis and derive its segment count.
    ///
    /// A range whose quotient by `step` lies within float noise of a whole
    /// number gets exactly that many segments. Otherwise the count is
    /// `trunc(range / step)`, and a `range % step` remainder up to `tolerance`
    /// is dropped from the end of the axis.
    fn new(axis: Axis, start: f64, end: f64, step: f64, tolerance: f64) -> Result<Self, ParamError> {
        for (field, value) in [("start", start), ("end", end), ("step", step)] {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { axis, field, value });
            }
        }
        if step <= 0.0 {
            return Err(ParamError::InvalidStep { axis, step });
        }
        if start >= end {
            return Err(ParamError::InvalidRange { axis, start, end });
        }

        let range = end - start;
        if let Some(count) = whole_segments(range, step) {
            return Ok(Self {
                start,
                end,
                step,
                count,
            });
        }

        let remainder = range % step;
        if remainder > tolerance {
            return Err(ParamError::NotDivisible {
                axis,
                range,
                step,
                remainder,
                tolerance,
            });
        }

        let count = (range / step).trunc();
        if count < 1.0 {
            return Err(ParamError::EmptyAxis { axis, range, step });
        }
        let count = count as usize;

        warn!(
            %axis,
            range,
            step,
            count,
            dropped = remainder,
            "range is not an exact multiple of the segment size; excess truncated"
        );

        Ok(Self {
            start,
            end,
            step,
            count,
        })
    }

    /// First value on the axis.
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Requested end of the axis.
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Segment size.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of whole segments.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// `end - start`.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.end - self.start
    }

    /// Lower edge of segment `index`, with no safety margin applied.
    #[must_use]
    pub fn segment_start(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.step, self.start)
    }
}

/// Relative distance from a whole number below which `range / step` counts as
/// exact.
const WHOLE_QUOTIENT_EPSILON: f64 = 1e-9;

/// Segment count of a range that `step` divides up to rounding error.
fn whole_segments(range: f64, step: f64) -> Option<usize> {
    let quotient = range / step;
    let nearest = quotient.round();
    (nearest >= 1.0 && (quotient - nearest).abs() <= WHOLE_QUOTIENT_EPSILON * nearest)
        .then_some(nearest as usize)
}

/// Validated spherical grid: three axes and the derived copy count.
///
/// Immutable once built. The only way to obtain one is through
/// [`SphereGridConfig::build`], so every `GridSpec` tiles its ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    radius: AxisSpec,
    phi: AxisSpec,
    theta: AxisSpec,
    total: usize,
    tolerance: f64,
}

impl GridSpec {
    /// Validate all three axes, radius first.
    pub(crate) fn new(config: &SphereGridConfig) -> Result<Self, ParamError> {
        let tolerance = config.tolerance;
        let radius = AxisSpec::new(
            Axis::Radius,
            config.inner_radius,
            config.outer_radius,
            config.radial_step,
            tolerance,
        )?;
        let phi = AxisSpec::new(
            Axis::Phi,
            config.start_phi,
            config.end_phi,
            config.phi_step,
            tolerance,
        )?;
        let theta = AxisSpec::new(
            Axis::Theta,
            config.start_theta,
            config.end_theta,
            config.theta_step,
            tolerance,
        )?;

        let total = radius
            .count
            .checked_mul(phi.count)
            .and_then(|n| n.checked_mul(theta.count))
            .ok_or(ParamError::CountOverflow {
                radial: radius.count,
                phi: phi.count,
                theta: theta.count,
            })?;

        Ok(Self {
            radius,
            phi,
            theta,
            total,
            tolerance,
        })
    }

    /// Validated parameters of one axis.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::Radius => &self.radius,
            Axis::Phi => &self.phi,
            Axis::Theta => &self.theta,
        }
    }

    /// Inner radius of the whole grid.
    #[must_use]
    pub const fn inner_radius(&self) -> f64 {
        self.radius.start
    }

    /// Outer radius of the whole grid.
    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.radius.end
    }

    /// Shell thickness.
    #[must_use]
    pub const fn radial_step(&self) -> f64 {
        self.radius.step
    }

    /// First phi angle.
    #[must_use]
    pub const fn start_phi(&self) -> f64 {
        self.phi.start
    }

    /// Requested end phi angle.
    #[must_use]
    pub const fn end_phi(&self) -> f64 {
        self.phi.end
    }

    /// Phi segment size.
    #[must_use]
    pub const fn phi_step(&self) -> f64 {
        self.phi.step
    }

    /// First theta angle.
    #[must_use]
    pub const fn start_theta(&self) -> f64 {
        self.theta.start
    }

    /// Requested end theta angle.
    #[must_use]
    pub const fn end_theta(&self) -> f64 {
        self.theta.end
    }

    /// Theta segment size.
    #[must_use]
    pub const fn theta_step(&self) -> f64 {
        self.theta.step
    }

    /// Number of radial shells.
    #[must_use]
    pub const fn radial_count(&self) -> usize {
        self.radius.count
    }

    /// Number of phi segments.
    #[must_use]
    pub const fn phi_count(&self) -> usize {
        self.phi.count
    }

    /// Number of theta segments.
    #[must_use]
    pub const fn theta_count(&self) -> usize {
        self.theta.count
    }

    /// Voxels in one shell (`phi_count * theta_count`).
    #[must_use]
    pub const fn shell_size(&self) -> usize {
        self.phi.count * self.theta.count
    }

    /// Total number of voxels.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total
    }

    /// Divisibility tolerance the grid was validated with.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

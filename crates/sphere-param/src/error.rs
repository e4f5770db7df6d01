//! Error types for spherical parameterisation.

use std::fmt;

/// One of the three axes the sphere is subdivided along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Radial axis (length units).
    Radius,
    /// Azimuthal axis (angle units).
    Phi,
    /// Polar axis (angle units).
    Theta,
}

impl Axis {
    /// All axes in validation order.
    pub const ALL: [Self; 3] = [Self::Radius, Self::Phi, Self::Theta];

    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Radius => "radial",
            Self::Phi => "phi",
            Self::Theta => "theta",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while configuring or querying a parameterisation.
///
/// Configuration errors are raised by [`SphereGridConfig::build`](crate::SphereGridConfig::build)
/// and mean no indexer was produced. [`ParamError::CopyOutOfRange`] is raised
/// by per-copy queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ParamError {
    /// The range of an axis is not evenly divisible by its step.
    #[error(
        "{axis} range {range} is not divisible by requested {axis} segment size {step} \
         (remainder {remainder} exceeds tolerance {tolerance})"
    )]
    NotDivisible {
        /// Axis that failed the check.
        axis: Axis,
        /// `end - start` for the axis.
        range: f64,
        /// Requested segment size.
        step: f64,
        /// `range % step`.
        remainder: f64,
        /// Accepted remainder.
        tolerance: f64,
    },

    /// The start of an axis is not below its end.
    #[error("{axis} range is empty: start {start} must be less than end {end}")]
    InvalidRange {
        /// Axis with the bad range.
        axis: Axis,
        /// Requested start.
        start: f64,
        /// Requested end.
        end: f64,
    },

    /// The step of an axis is not positive.
    #[error("{axis} segment size must be positive, got {step}")]
    InvalidStep {
        /// Axis with the bad step.
        axis: Axis,
        /// Requested step.
        step: f64,
    },

    /// The range passed the tolerance check but holds no whole segment.
    #[error("{axis} range {range} is smaller than its segment size {step}")]
    EmptyAxis {
        /// Axis with no segments.
        axis: Axis,
        /// `end - start` for the axis.
        range: f64,
        /// Requested step.
        step: f64,
    },

    /// A parameter is NaN or infinite.
    #[error("{axis} parameter `{field}` is not finite: {value}")]
    NonFinite {
        /// Axis the parameter belongs to.
        axis: Axis,
        /// Parameter name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The product of the three segment counts does not fit in `usize`.
    #[error("copy count overflows: {radial} x {phi} x {theta} voxels")]
    CountOverflow {
        /// Radial segment count.
        radial: usize,
        /// Phi segment count.
        phi: usize,
        /// Theta segment count.
        theta: usize,
    },

    /// A copy number at or beyond the total copy count was requested.
    #[error("too many copies: copy number {copy} requested but only {total} copies exist")]
    CopyOutOfRange {
        /// Requested copy number.
        copy: usize,
        /// Total number of copies.
        total: usize,
    },
}

impl ParamError {
    /// Returns `true` for errors raised while validating a configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !self.is_index()
    }

    /// Returns `true` for out-of-range copy queries.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::CopyOutOfRange { .. })
    }

    /// The axis this error refers to, if any.
    #[must_use]
    pub const fn axis(&self) -> Option<Axis> {
        match self {
            Self::NotDivisible { axis, .. }
            | Self::InvalidRange { axis, .. }
            | Self::InvalidStep { axis, .. }
            | Self::EmptyAxis { axis, .. }
            | Self::NonFinite { axis, .. } => Some(*axis),
            Self::CountOverflow { .. } | Self::CopyOutOfRange { .. } => None,
        }
    }
}

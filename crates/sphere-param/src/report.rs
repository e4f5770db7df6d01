//! Human-readable voxel diagnostics.

use std::fmt;

use crate::bounds::VoxelBounds;
use crate::units::{deg, mm};

/// Resolved bounds of one voxel, ready to print.
///
/// Lengths are shown in millimetres and angles in degrees.
///
/// ```
/// use sphere_param::{VoxelBounds, VoxelReport};
/// use sphere_param::units::{cm, deg};
///
/// let report = VoxelReport::new(3, VoxelBounds {
///     inner_radius: 1.0 * cm,
///     outer_radius: 2.0 * cm,
///     start_phi: 0.0,
///     delta_phi: 90.0 * deg,
///     start_theta: 0.0,
///     delta_theta: 45.0 * deg,
/// });
/// let text = report.to_string();
/// assert!(text.starts_with("Dimensions for sphere copy number: 3"));
/// assert!(text.contains("Outer radius: 20 mm"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelReport {
    /// Copy number the bounds belong to.
    pub copy: usize,
    /// Resolved bounds.
    pub bounds: VoxelBounds,
}

impl VoxelReport {
    /// Pair a copy number with its bounds.
    #[must_use]
    pub const fn new(copy: usize, bounds: VoxelBounds) -> Self {
        Self { copy, bounds }
    }
}

impl fmt::Display for VoxelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bounds;
        writeln!(f, "Dimensions for sphere copy number: {}", self.copy)?;
        writeln!(f, "Inner radius: {} mm", b.inner_radius / mm)?;
        writeln!(f, "Outer radius: {} mm", b.outer_radius / mm)?;
        writeln!(f, "Start phi angle: {} degrees", b.start_phi / deg)?;
        writeln!(f, "Delta phi angle: {} degrees", b.delta_phi / deg)?;
        writeln!(f, "Start theta angle:  {} degrees", b.start_theta / deg)?;
        write!(f, "Delta theta angle: {} degrees", b.delta_theta / deg)
    }
}

//! Bounds of a single spherical voxel.

use nalgebra::Point3;

use crate::units::TWO_PI;

/// Shape parameters of one voxel, in the sphere's own radius/angle terms.
///
/// These are produced fresh for every query and never cached. The field
/// layout matches a spherical-sector solid (`rmin`, `rmax`, `sphi`, `dphi`,
/// `stheta`, `dtheta`), so a host can copy them straight onto its shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelBounds {
    /// Inner radius, including the radial safety margin.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start of the phi span.
    pub start_phi: f64,
    /// Width of the phi span, less the phi safety margin.
    pub delta_phi: f64,
    /// Start of the theta span.
    pub start_theta: f64,
    /// Width of the theta span, less the theta safety margin.
    pub delta_theta: f64,
}

impl VoxelBounds {
    /// End of the phi span.
    #[must_use]
    pub fn end_phi(&self) -> f64 {
        self.start_phi + self.delta_phi
    }

    /// End of the theta span.
    #[must_use]
    pub fn end_theta(&self) -> f64 {
        self.start_theta + self.delta_theta
    }

    /// Radial thickness.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Tests whether a point, given in the sphere's frame, lies in this voxel.
    ///
    /// Faces are inclusive. Phi wraps, so a span starting at 350 degrees
    /// contains a point at 5 degrees if the span is wide enough.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use sphere_param::VoxelBounds;
    /// use sphere_param::units::deg;
    ///
    /// let bounds = VoxelBounds {
    ///     inner_radius: 1.0,
    ///     outer_radius: 2.0,
    ///     start_phi: 0.0,
    ///     delta_phi: 90.0 * deg,
    ///     start_theta: 0.0,
    ///     delta_theta: 90.0 * deg,
    /// };
    ///
    /// assert!(bounds.contains(&Point3::new(1.0, 0.5, 0.5)));
    /// assert!(!bounds.contains(&Point3::new(-1.0, 0.5, 0.5)));
    /// assert!(!bounds.contains(&Point3::new(3.0, 0.0, 0.0)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let r = point.coords.norm();
        if r < self.inner_radius || r > self.outer_radius {
            return false;
        }
        if r == 0.0 {
            // The origin has no direction; only a solid ball contains it.
            return self.start_theta <= 0.0 && self.delta_phi >= TWO_PI;
        }

        let theta = (point.z / r).clamp(-1.0, 1.0).acos();
        if theta < self.start_theta || theta > self.end_theta() {
            return false;
        }

        let phi = point.y.atan2(point.x);
        (phi - self.start_phi).rem_euclid(TWO_PI) <= self.delta_phi
    }
}

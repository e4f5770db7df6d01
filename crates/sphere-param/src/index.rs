//! Decomposition of linear copy numbers into (radius, phi, theta) bins.

use crate::error::ParamError;
use crate::grid::GridSpec;

/// The bin triple addressed by one copy number.
///
/// Copies are ordered with theta varying fastest, then phi, with radius
/// outermost: consecutive copy numbers sweep theta, wrap into the next phi
/// ring, and only step outward once a whole shell is exhausted. Consumers rely
/// on this nesting to know which physical voxel a copy number names.
///
/// # Example
///
/// ```
/// use sphere_param::{SphereGridConfig, VoxelIndex};
/// use sphere_param::units::{cm, deg};
///
/// let param = SphereGridConfig::radial(0.0, 5.0 * cm, 1.0 * cm)
///     .with_phi(0.0, 180.0 * deg, 45.0 * deg)
///     .with_theta(0.0, 180.0 * deg, 45.0 * deg)
///     .build()
///     .unwrap();
///
/// let index = VoxelIndex::from_copy(21, param.grid()).unwrap();
/// assert_eq!(index, VoxelIndex::new(1, 1, 1));
/// assert_eq!(index.to_copy(param.grid()), Some(21));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelIndex {
    /// Radial shell, `0` is innermost.
    pub radius: usize,
    /// Phi segment within the shell.
    pub phi: usize,
    /// Theta segment within the phi ring.
    pub theta: usize,
}

impl VoxelIndex {
    /// Creates an index from its three components.
    #[must_use]
    pub const fn new(radius: usize, phi: usize, theta: usize) -> Self {
        Self { radius, phi, theta }
    }

    /// Decompose a copy number.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CopyOutOfRange`] if `copy >= grid.total_count()`.
    pub const fn from_copy(copy: usize, grid: &GridSpec) -> Result<Self, ParamError> {
        let total = grid.total_count();
        if copy >= total {
            return Err(ParamError::CopyOutOfRange { copy, total });
        }

        let theta_count = grid.theta_count();
        let phi_count = grid.phi_count();

        Ok(Self {
            radius: copy / (theta_count * phi_count),
            phi: (copy / theta_count) % phi_count,
            theta: copy % theta_count,
        })
    }

    /// Recombine into the copy number this index was decomposed from.
    ///
    /// Returns `None` if any component is outside its axis count, since such an
    /// index would alias a different voxel.
    #[must_use]
    pub const fn to_copy(self, grid: &GridSpec) -> Option<usize> {
        if self.radius >= grid.radial_count()
            || self.phi >= grid.phi_count()
            || self.theta >= grid.theta_count()
        {
            return None;
        }
        // In range, so bounded by `total_count`, which did not overflow.
        Some((self.radius * grid.phi_count() + self.phi) * grid.theta_count() + self.theta)
    }
}

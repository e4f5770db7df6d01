//! The spherical voxel parameterisation.

// Bin indices are far below 2^52.
#![allow(clippy::cast_precision_loss)]

use nalgebra::Isometry3;
use tracing::{debug, warn};

use crate::bounds::VoxelBounds;
use crate::config::{SafetyMargins, SphereGridConfig, ThetaBinning};
use crate::error::ParamError;
use crate::grid::GridSpec;
use crate::host::{Parameterisation, VolumeHost};
use crate::index::VoxelIndex;
use crate::report::VoxelReport;

/// Subdivides a sphere into radius × phi × theta voxels and resolves the
/// bounds of each voxel from its copy number.
///
/// The grid is fixed at construction. Only the safety margins can change
/// afterwards, and the setters take `&mut self`, so they cannot race with
/// queries made through shared references.
///
/// # Example
///
/// ```
/// use sphere_param::SphereGridConfig;
/// use sphere_param::units::{cm, deg, mm};
///
/// let param = SphereGridConfig::radial(0.0, 5.0 * cm, 1.0 * cm)
///     .with_phi(0.0, 180.0 * deg, 45.0 * deg)
///     .with_theta(0.0, 180.0 * deg, 45.0 * deg)
///     .build()
///     .unwrap();
///
/// let last = param.compute_bounds(79).unwrap();
/// assert!((last.outer_radius - 50.0 * mm).abs() < 1e-9);
/// assert!((last.start_phi / deg - 135.0).abs() < 1e-9);
/// assert!(param.compute_bounds(80).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalParameterisation {
    grid: GridSpec,
    safety: SafetyMargins,
    theta_binning: ThetaBinning,
}

impl SphericalParameterisation {
    /// Validate `config` and build the indexer.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ParamError`] if any axis fails validation.
    pub fn new(config: &SphereGridConfig) -> Result<Self, ParamError> {
        let grid = GridSpec::new(config)?;

        debug!(
            radial = grid.radial_count(),
            phi = grid.phi_count(),
            theta = grid.theta_count(),
            copies = grid.total_count(),
            "Spherical parameterisation built"
        );

        if config.theta_binning == ThetaBinning::Legacy && !angular_axes_agree(&grid) {
            warn!(
                phi_step = grid.phi_step(),
                theta_step = grid.theta_step(),
                start_phi = grid.start_phi(),
                start_theta = grid.start_theta(),
                "legacy theta binning offsets theta bins by the phi step and start; \
                 theta bins will not follow the theta range"
            );
        }

        Ok(Self {
            grid,
            safety: config.safety,
            theta_binning: config.theta_binning,
        })
    }

    /// The validated grid.
    #[must_use]
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Total number of voxels.
    #[must_use]
    pub const fn copy_count(&self) -> usize {
        self.grid.total_count()
    }

    /// Theta start-angle formula in use.
    #[must_use]
    pub const fn theta_binning(&self) -> ThetaBinning {
        self.theta_binning
    }

    /// Current safety margins.
    #[must_use]
    pub const fn safety(&self) -> SafetyMargins {
        self.safety
    }

    /// Gap added to each voxel's inner radius.
    #[must_use]
    pub const fn radius_safety(&self) -> f64 {
        self.safety.radius
    }

    /// Gap trimmed from each voxel's phi span.
    #[must_use]
    pub const fn phi_safety(&self) -> f64 {
        self.safety.phi
    }

    /// Gap trimmed from each voxel's theta span.
    #[must_use]
    pub const fn theta_safety(&self) -> f64 {
        self.safety.theta
    }

    /// Set the radial safety margin.
    pub fn set_radius_safety(&mut self, value: f64) {
        self.safety.radius = value;
    }

    /// Set the phi safety margin.
    pub fn set_phi_safety(&mut self, value: f64) {
        self.safety.phi = value;
    }

    /// Set the theta safety margin.
    pub fn set_theta_safety(&mut self, value: f64) {
        self.safety.theta = value;
    }

    /// Replace all three safety margins.
    pub fn set_safety(&mut self, safety: SafetyMargins) {
        self.safety = safety;
    }

    /// Bin triple of a copy number.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CopyOutOfRange`] if `copy >= self.copy_count()`.
    pub const fn index_of(&self, copy: usize) -> Result<VoxelIndex, ParamError> {
        VoxelIndex::from_copy(copy, &self.grid)
    }

    /// Resolve the bounds of voxel `copy`.
    ///
    /// Only the inner radial face carries the radial margin. The angular
    /// margins shorten each span from its nominal end.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CopyOutOfRange`] if `copy >= self.copy_count()`.
    pub fn compute_bounds(&self, copy: usize) -> Result<VoxelBounds, ParamError> {
        let index = self.index_of(copy)?;
        Ok(self.bounds_of(index))
    }

    /// Bounds of an already-decomposed index.
    fn bounds_of(&self, index: VoxelIndex) -> VoxelBounds {
        let grid = &self.grid;
        let radial_step = grid.radial_step();

        let start_theta = match self.theta_binning {
            ThetaBinning::Legacy => (index.theta as f64).mul_add(grid.phi_step(), grid.start_phi()),
            ThetaBinning::Corrected => {
                (index.theta as f64).mul_add(grid.theta_step(), grid.start_theta())
            }
        };

        VoxelBounds {
            inner_radius: (index.radius as f64).mul_add(radial_step, grid.inner_radius())
                + self.safety.radius,
            outer_radius: ((index.radius + 1) as f64).mul_add(radial_step, grid.inner_radius()),
            start_phi: (index.phi as f64).mul_add(grid.phi_step(), grid.start_phi()),
            delta_phi: grid.phi_step() - self.safety.phi,
            start_theta,
            delta_theta: grid.theta_step() - self.safety.theta,
        }
    }

    /// Iterate over `(copy, bounds)` for every voxel in copy order.
    pub fn iter_bounds(&self) -> impl Iterator<Item = (usize, VoxelBounds)> + '_ {
        let phi = self.grid.phi_count();
        let theta = self.grid.theta_count();
        (0..self.grid.radial_count())
            .flat_map(move |r| {
                (0..phi).flat_map(move |p| (0..theta).map(move |t| VoxelIndex::new(r, p, t)))
            })
            .enumerate()
            .map(move |(copy, index)| (copy, self.bounds_of(index)))
    }

    /// Diagnostic report for one voxel, or for all voxels when `copy` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CopyOutOfRange`] if an explicit `copy` is out of range.
    pub fn describe(&self, copy: Option<usize>) -> Result<Vec<VoxelReport>, ParamError> {
        match copy {
            Some(copy) => Ok(vec![VoxelReport::new(copy, self.compute_bounds(copy)?)]),
            None => Ok(self.describe_all().collect()),
        }
    }

    /// Diagnostic reports for every voxel, ascending by copy number.
    pub fn describe_all(&self) -> impl Iterator<Item = VoxelReport> + '_ {
        self.iter_bounds()
            .map(|(copy, bounds)| VoxelReport::new(copy, bounds))
    }

    /// Register every voxel with `host` as copies of `target` inside `container`.
    ///
    /// Every copy gets the identity transform. Only the shape varies.
    ///
    /// # Errors
    ///
    /// Propagates any error the host reports while resolving copies.
    pub fn place<H: VolumeHost + ?Sized>(
        &self,
        name: &str,
        target: &H::Volume,
        container: &H::Volume,
        host: &mut H,
    ) -> Result<(), ParamError> {
        debug!(placement = name, copies = self.copy_count(), "Placing spherical parameterisation");
        host.place_parameterised(name, target, container, self.copy_count(), self)
    }
}

/// Whether legacy theta binning lands on the theta range.
///
/// Compared exactly: any difference in start or step shifts the theta bins.
#[allow(clippy::float_cmp)]
fn angular_axes_agree(grid: &GridSpec) -> bool {
    grid.phi_step() == grid.theta_step() && grid.start_phi() == grid.start_theta()
}

impl Parameterisation for SphericalParameterisation {
    fn copy_count(&self) -> usize {
        self.grid.total_count()
    }

    fn compute_dimensions(&self, copy: usize) -> Result<VoxelBounds, ParamError> {
        self.compute_bounds(copy)
    }

    fn compute_transformation(&self, _copy: usize) -> Isometry3<f64> {
        Isometry3::identity()
    }
}

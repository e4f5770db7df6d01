//! Builds the reference detector geometry.

use nalgebra::Isometry3;
use sphere_param::units::cm;
use sphere_param::{ParamError, SphericalParameterisation};
use tracing::info;

use crate::config::DetectorConfig;
use crate::geometry::{GeometryTree, LogicalVolume, SphereSolid, VolumeId};

/// A constructed detector: the geometry tree plus the indexer that filled it.
#[derive(Debug, Clone)]
pub struct Detector {
    /// Every logical and physical volume.
    pub tree: GeometryTree,
    /// The world logical volume.
    pub world: VolumeId,
    /// The parameterised logical volume.
    pub voxels: VolumeId,
    /// The indexer that resolved each voxel.
    pub param: SphericalParameterisation,
}

impl Detector {
    /// Number of placed voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.tree.daughters(self.world).count()
    }
}

/// Assembles the world sphere and the parameterised sphere inside it.
#[derive(Debug, Clone, Default)]
pub struct DetectorConstruction {
    config: DetectorConfig,
}

impl DetectorConstruction {
    /// Construction driven by `config`.
    #[must_use]
    pub const fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Build the detector.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ParamError`] if the voxel grid does not tile
    /// its ranges, or an index error if placement overruns the grid.
    pub fn construct(&self) -> Result<Detector, ParamError> {
        let world_cfg = &self.config.world;
        let voxel_cfg = &self.config.voxels;
        let mut tree = GeometryTree::new();

        let world = tree.add_logical(LogicalVolume {
            name: "World_log".to_owned(),
            solid: SphereSolid::full("World", 0.0, world_cfg.radius_cm * cm),
            material: world_cfg.material.clone(),
        });
        tree.place("World_phys", world, None, Isometry3::identity());

        // The nominal size is a placeholder; each copy gets its own bounds.
        let voxels = tree.add_logical(LogicalVolume {
            name: "ParameterisedSphere_log".to_owned(),
            solid: SphereSolid::full(
                "ParameterisedSphere",
                voxel_cfg.inner_radius_cm * cm,
                voxel_cfg.outer_radius_cm * cm,
            ),
            material: voxel_cfg.material.clone(),
        });

        let param = self.config.grid_config().build()?;
        param.place(&voxel_cfg.name, &voxels, &world, &mut tree)?;

        info!(
            world_radius_cm = world_cfg.radius_cm,
            placement = %voxel_cfg.name,
            radial = param.grid().radial_count(),
            phi = param.grid().phi_count(),
            theta = param.grid().theta_count(),
            copies = param.copy_count(),
            "Detector constructed"
        );

        Ok(Detector {
            tree,
            world,
            voxels,
            param,
        })
    }
}

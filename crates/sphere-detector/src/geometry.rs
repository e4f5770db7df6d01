//! In-process geometry tree: logical volumes, physical placements, and the
//! [`VolumeHost`] implementation that realises parameterised copies.

use nalgebra::Isometry3;
use sphere_param::{ParamError, Parameterisation, VolumeHost, VoxelBounds};
use tracing::debug;

/// Spherical-sector solid.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereSolid {
    /// Solid name.
    pub name: String,
    /// Radii and angular spans.
    pub bounds: VoxelBounds,
}

impl SphereSolid {
    /// A solid (or hollow) sphere covering every direction.
    #[must_use]
    pub fn full(name: impl Into<String>, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            name: name.into(),
            bounds: VoxelBounds {
                inner_radius,
                outer_radius,
                start_phi: 0.0,
                delta_phi: sphere_param::units::TWO_PI,
                start_theta: 0.0,
                delta_theta: sphere_param::units::PI,
            },
        }
    }
}

/// Handle of a logical volume inside a [`GeometryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId(usize);

/// Shape plus material, not yet placed anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVolume {
    /// Volume name.
    pub name: String,
    /// Nominal shape. Parameterised copies override its bounds.
    pub solid: SphereSolid,
    /// Material label.
    pub material: String,
}

/// One placed copy of a logical volume.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalVolume {
    /// Placement name.
    pub name: String,
    /// Placed logical volume.
    pub logical: VolumeId,
    /// Containing logical volume, `None` for the world.
    pub mother: Option<VolumeId>,
    /// Copy number within the placement.
    pub copy: usize,
    /// Realised shape of this copy.
    pub bounds: VoxelBounds,
    /// Transform relative to the mother volume.
    pub transform: Isometry3<f64>,
}

/// Flat store of logical and physical volumes.
#[derive(Debug, Clone, Default)]
pub struct GeometryTree {
    logicals: Vec<LogicalVolume>,
    physicals: Vec<PhysicalVolume>,
}

impl GeometryTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a logical volume.
    pub fn add_logical(&mut self, volume: LogicalVolume) -> VolumeId {
        self.logicals.push(volume);
        VolumeId(self.logicals.len() - 1)
    }

    /// Look up a logical volume.
    #[must_use]
    pub fn logical(&self, id: VolumeId) -> Option<&LogicalVolume> {
        self.logicals.get(id.0)
    }

    /// Place a single copy of `logical` with its nominal shape.
    pub fn place(
        &mut self,
        name: impl Into<String>,
        logical: VolumeId,
        mother: Option<VolumeId>,
        transform: Isometry3<f64>,
    ) -> Option<&PhysicalVolume> {
        let bounds = self.logical(logical)?.solid.bounds;
        self.physicals.push(PhysicalVolume {
            name: name.into(),
            logical,
            mother,
            copy: 0,
            bounds,
            transform,
        });
        self.physicals.last()
    }

    /// All placed copies.
    #[must_use]
    pub fn physicals(&self) -> &[PhysicalVolume] {
        &self.physicals
    }

    /// Placed copies with the given placement name, in copy order.
    pub fn physicals_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PhysicalVolume> {
        self.physicals.iter().filter(move |p| p.name == name)
    }

    /// Placed copies whose mother is `mother`.
    pub fn daughters(&self, mother: VolumeId) -> impl Iterator<Item = &PhysicalVolume> {
        self.physicals
            .iter()
            .filter(move |p| p.mother == Some(mother))
    }
}

impl VolumeHost for GeometryTree {
    type Volume = VolumeId;

    fn place_parameterised(
        &mut self,
        name: &str,
        target: &VolumeId,
        container: &VolumeId,
        copies: usize,
        source: &dyn Parameterisation,
    ) -> Result<(), ParamError> {
        // Resolve everything first so a failing copy leaves the tree untouched.
        let realised = (0..copies)
            .map(|copy| -> Result<PhysicalVolume, ParamError> {
                Ok(PhysicalVolume {
                    name: name.to_owned(),
                    logical: *target,
                    mother: Some(*container),
                    copy,
                    bounds: source.compute_dimensions(copy)?,
                    transform: source.compute_transformation(copy),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(placement = name, copies, "Realised parameterised placement");
        self.physicals.extend(realised);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use sphere_param::SphereGridConfig;

    fn tree_with_world() -> (GeometryTree, VolumeId, VolumeId) {
        let mut tree = GeometryTree::new();
        let world = tree.add_logical(LogicalVolume {
            name: "World_log".to_owned(),
            solid: SphereSolid::full("World", 0.0, 1000.0),
            material: "G4_WATER".to_owned(),
        });
        let voxel = tree.add_logical(LogicalVolume {
            name: "Voxel_log".to_owned(),
            solid: SphereSolid::full("Voxel", 0.0, 50.0),
            material: "G4_WATER".to_owned(),
        });
        (tree, world, voxel)
    }

    #[test]
    fn test_single_placement() {
        let (mut tree, world, _) = tree_with_world();
        let placed = tree.place("World_phys", world, None, Isometry3::identity()).unwrap();
        assert_eq!(placed.copy, 0);
        assert_eq!(placed.bounds.outer_radius, 1000.0);
        assert_eq!(tree.physicals().len(), 1);
    }

    #[test]
    fn test_place_unknown_logical() {
        let mut tree = GeometryTree::new();
        assert!(tree.place("x", VolumeId(3), None, Isometry3::identity()).is_none());
    }

    #[test]
    fn test_parameterised_placement() {
        let (mut tree, world, voxel) = tree_with_world();
        let param = SphereGridConfig::radial(0.0, 50.0, 10.0).build().unwrap();
        param.place("Shells", &voxel, &world, &mut tree).unwrap();

        let shells: Vec<_> = tree.physicals_named("Shells").collect();
        assert_eq!(shells.len(), 5);
        assert!(shells.iter().enumerate().all(|(i, p)| p.copy == i));
        assert_eq!(tree.daughters(world).count(), 5);
        assert!(shells.iter().all(|p| p.transform == Isometry3::identity()));
    }

    struct Broken;

    impl Parameterisation for Broken {
        fn copy_count(&self) -> usize {
            3
        }

        fn compute_dimensions(&self, copy: usize) -> Result<VoxelBounds, ParamError> {
            if copy == 2 {
                return Err(ParamError::CopyOutOfRange { copy, total: 2 });
            }
            Ok(VoxelBounds::default())
        }
    }

    #[test]
    fn test_failed_placement_leaves_tree_untouched() {
        let (mut tree, world, voxel) = tree_with_world();
        let err = tree
            .place_parameterised("Broken", &voxel, &world, 3, &Broken)
            .unwrap_err();
        assert!(err.is_index());
        assert!(tree.physicals().is_empty());
    }
}

//! Seam between a parameterisation and the geometry host that places it.
//!
//! The host owns volumes, materials and placement bookkeeping. A
//! parameterisation only answers per-copy questions: how big is copy `n`, and
//! where does it sit relative to its container.

use nalgebra::Isometry3;

use crate::bounds::VoxelBounds;
use crate::error::ParamError;

/// Per-copy callbacks a host invokes while realising a parameterised volume.
pub trait Parameterisation {
    /// Number of copies this source describes.
    fn copy_count(&self) -> usize;

    /// Shape parameters of copy `copy`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CopyOutOfRange`] if `copy >= self.copy_count()`.
    fn compute_dimensions(&self, copy: usize) -> Result<VoxelBounds, ParamError>;

    /// Transform of copy `copy` relative to its container.
    fn compute_transformation(&self, copy: usize) -> Isometry3<f64> {
        let _ = copy;
        Isometry3::identity()
    }
}

/// A geometry host that can register parameterised placements.
pub trait VolumeHost {
    /// The host's handle for a logical volume.
    type Volume;

    /// Register `copies` copies of `target` inside `container`, resolving each
    /// copy through `source`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `source` while resolving a copy.
    fn place_parameterised(
        &mut self,
        name: &str,
        target: &Self::Volume,
        container: &Self::Volume,
        copies: usize,
        source: &dyn Parameterisation,
    ) -> Result<(), ParamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Parameterisation for Fixed {
        fn copy_count(&self) -> usize {
            2
        }

        fn compute_dimensions(&self, copy: usize) -> Result<VoxelBounds, ParamError> {
            if copy >= 2 {
                return Err(ParamError::CopyOutOfRange { copy, total: 2 });
            }
            Ok(VoxelBounds::default())
        }
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(Fixed.compute_transformation(1), Isometry3::identity());
    }

    #[test]
    fn test_trait_object() {
        let source: &dyn Parameterisation = &Fixed;
        assert_eq!(source.copy_count(), 2);
        assert!(source.compute_dimensions(2).is_err());
    }
}

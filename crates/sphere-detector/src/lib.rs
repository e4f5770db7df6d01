//! Reference detector host for [`sphere_param`].
//!
//! Builds a water world holding a spherical volume parameterised into
//! radius × phi × theta voxels, and keeps the result in an in-process
//! [`GeometryTree`]. The tree plays the part of the simulation toolkit: it
//! owns volumes and asks the parameterisation for each copy's shape and
//! transform.
//!
//! # Example
//!
//! ```
//! use sphere_detector::{DetectorConfig, DetectorConstruction};
//!
//! let detector = DetectorConstruction::new(DetectorConfig::default())
//!     .construct()
//!     .unwrap();
//! assert_eq!(detector.voxel_count(), 80);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod construction;
mod geometry;

pub use config::{AngleRange, DetectorConfig, SafetyConfig, VoxelConfig, WorldConfig};
pub use construction::{Detector, DetectorConstruction};
pub use geometry::{GeometryTree, LogicalVolume, PhysicalVolume, SphereSolid, VolumeId};

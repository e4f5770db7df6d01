//! Spherical voxel parameterisation.
//!
//! This crate subdivides a spherical volume into a grid of voxels over radius,
//! azimuthal angle (phi) and polar angle (theta), and answers the one question
//! a geometry host asks while placing them: *what are the bounds of copy `n`?*
//!
//! - [`SphereGridConfig`] - User-facing ranges and segment sizes
//! - [`SphericalParameterisation`] - Validated indexer: copy number to bounds
//! - [`GridSpec`] - Immutable grid geometry and derived segment counts
//! - [`VoxelIndex`] - Decomposed (radius, phi, theta) bin triple
//! - [`VoxelBounds`] - Shape parameters of one voxel
//! - [`VoxelReport`] - Printable diagnostic for one voxel
//! - [`Parameterisation`] and [`VolumeHost`] - Seam to the geometry host
//!
//! # Layer 0 Crate
//!
//! No host toolkit is linked. Material lookup, visualisation and run control
//! are the host's concern; the host drives this crate through [`VolumeHost`].
//!
//! # Copy Ordering
//!
//! Theta varies fastest, then phi, then radius:
//!
//! ```text
//! theta  = copy % theta_count
//! phi    = (copy / theta_count) % phi_count
//! radius = copy / (theta_count * phi_count)
//! ```
//!
//! # Units
//!
//! Lengths are millimetres and angles are radians internally. See [`units`].
//!
//! # Example
//!
//! ```
//! use sphere_param::{SafetyMargins, SphereGridConfig};
//! use sphere_param::units::{cm, deg};
//!
//! let param = SphereGridConfig::radial(0.0 * cm, 5.0 * cm, 1.0 * cm)
//!     .with_phi(0.0 * deg, 180.0 * deg, 45.0 * deg)
//!     .with_theta(0.0 * deg, 180.0 * deg, 45.0 * deg)
//!     .with_safety(SafetyMargins::none())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(param.copy_count(), 80);
//!
//! let first = param.compute_bounds(0).unwrap();
//! assert_eq!(first.inner_radius, 0.0);
//! assert_eq!(first.outer_radius, 1.0 * cm);
//!
//! // Copy numbers past the end are rejected.
//! assert!(param.compute_bounds(80).is_err());
//! ```
//!
//! # Validation
//!
//! Every axis range must be divisible by its step to within
//! [`DIVISIBILITY_TOLERANCE`]. A failing configuration never yields an indexer:
//!
//! ```
//! use sphere_param::{Axis, ParamError, SphereGridConfig};
//!
//! let err = SphereGridConfig::radial(0.0, 50.0, 15.0).build().unwrap_err();
//! assert!(matches!(err, ParamError::NotDivisible { axis: Axis::Radius, .. }));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod config;
mod error;
mod grid;
mod host;
mod index;
mod param;
mod report;
pub mod units;

pub use bounds::VoxelBounds;
pub use config::{
    DEFAULT_ANGLE_SAFETY, DEFAULT_RADIUS_SAFETY, DIVISIBILITY_TOLERANCE, SafetyMargins,
    SphereGridConfig, ThetaBinning,
};
pub use error::{Axis, ParamError};
pub use grid::{AxisSpec, GridSpec};
pub use host::{Parameterisation, VolumeHost};
pub use index::VoxelIndex;
pub use param::SphericalParameterisation;
pub use report::VoxelReport;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3};

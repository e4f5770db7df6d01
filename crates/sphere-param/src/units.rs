//! Unit constants for lengths and angles.
//!
//! Internal units match the host geometry toolkit: lengths are stored in
//! millimetres and angles in radians. Multiply a literal by a unit to bring it
//! into internal units, divide to get it back out.
//!
//! ```
//! use sphere_param::units::{cm, deg, mm};
//!
//! let r = 5.0 * cm;
//! assert!((r - 50.0 * mm).abs() < 1e-12);
//! assert!(((90.0 * deg) / deg - 90.0).abs() < 1e-12);
//! ```

#![allow(non_upper_case_globals)]

/// Millimetre (internal length unit).
pub const mm: f64 = 1.0;
/// Centimetre.
pub const cm: f64 = 10.0 * mm;
/// Metre.
pub const m: f64 = 1000.0 * mm;
/// Micrometre.
pub const um: f64 = 1e-3 * mm;
/// Nanometre.
pub const nm: f64 = 1e-6 * mm;

/// Radian (internal angle unit).
pub const rad: f64 = 1.0;
/// Degree.
pub const deg: f64 = std::f64::consts::PI / 180.0 * rad;

/// Half turn.
pub const PI: f64 = std::f64::consts::PI;
/// Full turn.
pub const TWO_PI: f64 = std::f64::consts::TAU;

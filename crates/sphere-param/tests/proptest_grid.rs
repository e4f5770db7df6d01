//! Property-based tests for grid validation and copy decomposition.
//!
//! Grids are generated from dyadic steps and offsets so every range is exactly
//! divisible in floating point.
//!
//! Run with: cargo test -p sphere-param -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use proptest::prelude::*;
use sphere_param::units::{deg, mm};
use sphere_param::{
    Axis, ParamError, SafetyMargins, SphereGridConfig, ThetaBinning, VoxelIndex,
};

// =============================================================================
// Strategies
// =============================================================================

/// `(start, step, count)` for one axis, all exactly representable.
fn arb_axis(max_count: usize) -> impl Strategy<Value = (f64, f64, usize)> {
    (0u32..16, 1u32..32, 1..=max_count)
        .prop_map(|(start, step, count)| (f64::from(start) / 4.0, f64::from(step) / 8.0, count))
}

fn arb_config() -> impl Strategy<Value = (SphereGridConfig, [usize; 3])> {
    (arb_axis(6), arb_axis(6), arb_axis(6)).prop_map(|(r, p, t)| {
        let end = |(start, step, count): (f64, f64, usize)| start + step * count as f64;
        let config = SphereGridConfig::radial(r.0, end(r), r.1)
            .with_phi(p.0, end(p), p.1)
            .with_theta(t.0, end(t), t.1)
            .with_safety(SafetyMargins::none())
            .with_theta_binning(ThetaBinning::Corrected);
        (config, [r.2, p.2, t.2])
    })
}

// =============================================================================
// Counts and decomposition
// =============================================================================

proptest! {
    /// Every valid grid has positive counts whose product is the copy count.
    #[test]
    fn proptest_count_product((config, counts) in arb_config()) {
        let param = config.build().unwrap();
        let grid = param.grid();

        prop_assert_eq!(grid.radial_count(), counts[0]);
        prop_assert_eq!(grid.phi_count(), counts[1]);
        prop_assert_eq!(grid.theta_count(), counts[2]);
        prop_assert_eq!(
            grid.radial_count() * grid.phi_count() * grid.theta_count(),
            param.copy_count()
        );
    }

    /// Decomposition is a bijection from copy numbers onto the bin cross product.
    #[test]
    fn proptest_decomposition_is_bijective((config, _) in arb_config()) {
        let param = config.build().unwrap();
        let grid = param.grid();

        let mut seen = HashSet::new();
        for copy in 0..param.copy_count() {
            let index = param.index_of(copy).unwrap();
            prop_assert!(index.radius < grid.radial_count());
            prop_assert!(index.phi < grid.phi_count());
            prop_assert!(index.theta < grid.theta_count());
            prop_assert_eq!(index.to_copy(grid), Some(copy));
            prop_assert!(seen.insert(index));
        }
        prop_assert_eq!(seen.len(), param.copy_count());
    }

    /// Any copy at or past the end is rejected.
    #[test]
    fn proptest_out_of_range((config, _) in arb_config(), extra in 0usize..100) {
        let param = config.build().unwrap();
        let copy = param.copy_count() + extra;
        prop_assert_eq!(
            param.compute_bounds(copy).unwrap_err(),
            ParamError::CopyOutOfRange { copy, total: param.copy_count() }
        );
    }
}

// =============================================================================
// Tiling
// =============================================================================

proptest! {
    /// Radially adjacent voxels share a face once the safety margin is removed.
    #[test]
    fn proptest_radial_adjacency((config, _) in arb_config(), safety in 0.0f64..1e-3) {
        let mut param = config.build().unwrap();
        param.set_radius_safety(safety);
        let shell = param.grid().shell_size();

        for copy in 0..param.copy_count().saturating_sub(shell) {
            let inner = param.compute_bounds(copy).unwrap();
            let outer = param.compute_bounds(copy + shell).unwrap();
            let face = outer.inner_radius - param.radius_safety();
            prop_assert!((inner.outer_radius - face).abs() <= 1e-12 * inner.outer_radius.max(1.0));
        }
    }

    /// Without margins, radial adjacency is exact.
    #[test]
    fn proptest_radial_adjacency_exact((config, _) in arb_config()) {
        let param = config.build().unwrap();
        let shell = param.grid().shell_size();

        for copy in 0..param.copy_count().saturating_sub(shell) {
            let inner = param.compute_bounds(copy).unwrap();
            let outer = param.compute_bounds(copy + shell).unwrap();
            prop_assert_eq!(inner.outer_radius, outer.inner_radius);
        }
    }

    /// The voxel spans along each axis reconstruct the requested range.
    #[test]
    fn proptest_coverage((config, _) in arb_config()) {
        let param = config.build().unwrap();
        let grid = *param.grid();

        let mut radial = Vec::new();
        let mut phi = Vec::new();
        let mut theta = Vec::new();
        for i in 0..grid.radial_count() {
            let b = param.compute_bounds(VoxelIndex::new(i, 0, 0).to_copy(&grid).unwrap()).unwrap();
            radial.push((b.inner_radius, b.outer_radius));
        }
        for i in 0..grid.phi_count() {
            let b = param.compute_bounds(VoxelIndex::new(0, i, 0).to_copy(&grid).unwrap()).unwrap();
            phi.push((b.start_phi, b.end_phi()));
        }
        for i in 0..grid.theta_count() {
            let b = param.compute_bounds(VoxelIndex::new(0, 0, i).to_copy(&grid).unwrap()).unwrap();
            theta.push((b.start_theta, b.end_theta()));
        }

        for (spans, start, end) in [
            (&radial, grid.inner_radius(), grid.outer_radius()),
            (&phi, grid.start_phi(), grid.end_phi()),
            (&theta, grid.start_theta(), grid.end_theta()),
        ] {
            prop_assert_eq!(spans[0].0, start);
            prop_assert_eq!(spans[spans.len() - 1].1, end);
            for pair in spans.windows(2) {
                prop_assert_eq!(pair[0].1, pair[1].0);
            }
        }
    }

    /// First copy is the first bin on every axis; last copy is the last.
    #[test]
    fn proptest_boundary_copies((config, _) in arb_config()) {
        let param = config.build().unwrap();
        let grid = param.grid();

        let first = param.compute_bounds(0).unwrap();
        prop_assert_eq!(first.inner_radius, grid.inner_radius());
        prop_assert_eq!(first.start_phi, grid.start_phi());
        prop_assert_eq!(first.start_theta, grid.start_theta());

        let last = param.compute_bounds(param.copy_count() - 1).unwrap();
        prop_assert_eq!(last.outer_radius, grid.outer_radius());
        prop_assert_eq!(last.end_phi(), grid.end_phi());
        prop_assert_eq!(last.end_theta(), grid.end_theta());
    }

    /// Legacy theta binning agrees with the corrected formula when the phi
    /// and theta axes share a start and step.
    #[test]
    fn proptest_legacy_matches_when_axes_agree(
        (start, step, count) in arb_axis(5),
        radial in 1usize..4,
    ) {
        let end = start + step * count as f64;
        let base = SphereGridConfig::radial(0.0, radial as f64, 1.0)
            .with_phi(start, end, step)
            .with_theta(start, end, step);
        let legacy = base.clone().build().unwrap();
        let corrected = base.with_theta_binning(ThetaBinning::Corrected).build().unwrap();

        for copy in 0..legacy.copy_count() {
            prop_assert_eq!(
                legacy.compute_bounds(copy).unwrap(),
                corrected.compute_bounds(copy).unwrap()
            );
        }
    }
}

// =============================================================================
// Decimal inputs
// =============================================================================

proptest! {
    /// Hand-written decimal steps keep every segment, even when the quotient
    /// rounds just below the whole number.
    #[test]
    fn proptest_decimal_steps_cover_range(
        start_tenths in 0u32..100,
        step_tenths in 1u32..300,
        count in 1usize..40,
    ) {
        let start = f64::from(start_tenths) / 10.0 * deg;
        let step = f64::from(step_tenths) / 10.0 * deg;
        let end = start + step * count as f64;

        let param = SphereGridConfig::radial(0.0, 3.0 * mm, 0.1 * mm)
            .with_phi(start, end, step)
            .build()
            .unwrap();
        let phi = param.grid().axis(Axis::Phi);

        prop_assert_eq!(param.grid().radial_count(), 30);
        prop_assert_eq!(phi.count(), count);
        prop_assert!((phi.segment_start(count) - end).abs() <= 1e-9 * end.max(1.0));
    }
}

// =============================================================================
// Rejection
// =============================================================================

proptest! {
    /// A radial step leaving more than the tolerance over is rejected.
    #[test]
    fn proptest_rejects_indivisible_radius(
        step in 1.0f64..10.0,
        count in 1usize..10,
        frac in 0.3f64..0.9,
    ) {
        let outer = step * count as f64 + frac * step;
        let err = SphereGridConfig::radial(0.0, outer, step).build().unwrap_err();
        prop_assert!(err.is_configuration());
        prop_assert_eq!(err.axis(), Some(Axis::Radius));
        let is_not_divisible = matches!(err, ParamError::NotDivisible { .. });
        prop_assert!(is_not_divisible);
    }
}

//! Integration tests for fields, operators, and dynamic rules.
//!
//! These run multi-step simulations through the public API and compare
//! sequential and parallel dispatch on the same inputs.

use glam::DVec2;
use strata_core::{Dispatcher, ParallelConfig};
use strata_field::{ops2, BoundaryPolicy, DynamicField2, DynamicField3, Field2};
use strata_test_utils::{
    assert_all_close, assert_close, ramp_x_2d, random_2d, random_3d, spike_2d, uniform_2d,
    with_policy_2d,
};

fn parallel() -> Dispatcher {
    Dispatcher::new(&ParallelConfig {
        enabled: true,
        min_chunk_len: 16,
        worker_count: Some(4),
    })
    .unwrap()
}

// ── Concrete scenarios ──────────────────────────────────────────

#[test]
fn five_by_five_spike_single_step() {
    let mut sim = DynamicField2::new(spike_2d(5, 5, 100.0));
    sim.diffuse(0.25);
    sim.update(1.0);
    let f = sim.field();
    let g = *f.grid();
    for (i, j) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
        assert_eq!(f.values()[g.flatten(i, j)], 0.0);
    }
    assert_eq!(f.values().iter().sum::<f64>(), 100.0);
}

#[test]
fn ramp_erosion_is_uniform_inside_and_asymmetric_at_edges() {
    let mut sim = DynamicField2::new(ramp_x_2d(6, 4));
    sim.erode(0.0, 1.0);
    let g = *sim.field().grid();
    for j in 0..4 {
        let row: Vec<f64> = (0..6).map(|i| sim.deltas()[g.flatten(i, j)]).collect();
        assert_eq!(row, vec![1.0, 0.0, 0.0, 0.0, 0.0, -1.0]);
    }
}

// ── Conservation ────────────────────────────────────────────────

#[test]
fn long_diffusion_conserves_and_flattens() {
    for policy in [BoundaryPolicy::Equal, BoundaryPolicy::Periodic] {
        let field = with_policy_2d(random_2d(24, 16, 0.0, 10.0, 7), policy);
        let before = field.sum();
        let mut sim = DynamicField2::new(field);
        for _ in 0..1000 {
            sim.diffuse(0.2);
            sim.update(1.0);
        }
        assert_close(sim.field().sum(), before, 1e-7);
        let (lo, hi) = sim.field().min_max();
        assert!(hi - lo < 1.0, "{policy:?} did not flatten: {lo}..{hi}");
    }
}

#[test]
fn constant_boundary_drains_toward_boundary_value() {
    let field = uniform_2d(8, 8, 1.0).with_boundary(BoundaryPolicy::Constant, 0.0);
    let mut sim = DynamicField2::new(field);
    for _ in 0..50 {
        sim.diffuse(0.2);
        sim.update(1.0);
    }
    assert!(sim.field().sum() < 64.0 * 0.5);
}

#[test]
fn erosion_conserves_material_under_equal() {
    let mut sim = DynamicField2::new(random_2d(12, 12, 0.0, 5.0, 3));
    let before = sim.field().sum();
    for _ in 0..20 {
        sim.erode(0.5, 0.1);
        sim.update(1.0);
    }
    assert_close(sim.field().sum(), before, 1e-9);
}

// ── Dispatch equivalence ────────────────────────────────────────

#[test]
fn parallel_rules_match_sequential() {
    let base = random_2d(64, 48, -1.0, 1.0, 11);
    let mut seq = DynamicField2::new(base.clone().with_dispatcher(Dispatcher::sequential()));
    let mut par = DynamicField2::new(base.with_dispatcher(parallel()));
    for sim in [&mut seq, &mut par] {
        for _ in 0..5 {
            sim.diffuse(0.1);
            sim.erode(0.2, 0.05);
            sim.bifurcate_toward(0.0, -1.0, 1.0, 0.01);
            sim.decay(0.01);
            sim.update(0.5);
        }
    }
    assert_eq!(seq.field().values(), par.field().values());
}

#[test]
fn parallel_operators_match_sequential_3d() {
    let base = random_3d(20, 18, 16, 0.0, 1.0, 5);
    let seq = base.clone().with_dispatcher(Dispatcher::sequential());
    let par = base.with_dispatcher(parallel());
    assert_eq!(seq.laplacian().values(), par.laplacian().values());
    assert_eq!(seq.gradient().values(), par.gradient().values());

    let mut a = DynamicField3::new(seq);
    let mut b = DynamicField3::new(par);
    a.erode(0.1, 0.5);
    b.erode(0.1, 0.5);
    assert_eq!(a.deltas(), b.deltas());
}

// ── Operators ───────────────────────────────────────────────────

#[test]
fn gradient_divergence_is_laplacian_inside() {
    // Both stencils are exact on a quadratic away from the edges.
    let mut f = Field2::<f64>::with_shape(9, 9, DVec2::ZERO, DVec2::splat(8.0)).unwrap();
    f.set_from_fn(|p| p.x * p.x + 0.5 * p.y * p.y);
    let div_grad = f.gradient().divergence();
    let lap = f.laplacian();
    for j in 2..7 {
        for i in 2..7 {
            let idx = f.grid().flatten(i, j);
            assert_close(div_grad.values()[idx], 3.0, 1e-12);
            assert_close(lap.values()[idx], 3.0, 1e-12);
        }
    }
}

#[test]
fn operators_reject_mismatched_output() {
    let f = uniform_2d(4, 4, 1.0);
    let mut out = vec![0.0; 15];
    let err = ops2::laplacian_into(&f, &mut out).unwrap_err();
    assert!(!err.is_construction());
    let mut out = vec![0.0; 16];
    ops2::laplacian_into(&f, &mut out).unwrap();
    assert_all_close(&out, &[0.0; 16], 0.0);
}

#[test]
fn point_deposits_land_on_interpolated_value() {
    let mut sim = DynamicField2::new(uniform_2d(6, 6, 0.0));
    let p = DVec2::new(2.3, 3.6);
    let fp = sim.field().grid_point_at(p);
    sim.deposit_at_point(&fp, 1.0);
    sim.update(1.0);
    assert_close(sim.field().sum(), 1.0, 1e-12);
    let sampled = sim.field().value_at(p);
    let expected: f64 = fp.weights.iter().map(|w| w * w).sum();
    assert_close(sampled, expected, 1e-12);
}

#[test]
fn vector_field_curl_free_gradient() {
    let mut f = Field2::<f64>::with_shape(7, 7, DVec2::splat(-1.0), DVec2::splat(1.0)).unwrap();
    f.set_from_fn(|p| p.x * p.y);
    let curl = f.gradient().curl();
    for j in 1..6 {
        for i in 1..6 {
            assert_close(curl.values()[f.grid().flatten(i, j)], 0.0, 1e-12);
        }
    }
}

#[test]
fn three_d_vector_helpers() {
    let base = random_3d(4, 4, 4, -1.0, 1.0, 9);
    let grad = base.gradient();
    let mags = grad.magnitudes();
    for (m, g) in mags.values().iter().zip(grad.values()) {
        assert_close(*m, g.length(), 0.0);
    }
}

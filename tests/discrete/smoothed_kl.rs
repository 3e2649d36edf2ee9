// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;

use empirical::estimators::approaches::discrete::DiscreteEmpirical;
use empirical::{Empirical, EstimatorKind, Lattice, Sample};

use crate::test_helpers::integer_samples;

fn model(values: &[f64]) -> DiscreteEmpirical {
    let sample = Sample::from_vec(values.to_vec()).unwrap();
    DiscreteEmpirical::new(
        sample,
        Lattice {
            step: 1.0,
            origin: 0.0,
        },
        1e-9,
    )
}

#[test]
fn self_divergence_is_zero() {
    let data = integer_samples(100, 8, 5);
    let dist = Empirical::new(&data).unwrap();
    let kl = dist.kl_divergence(&dist, EstimatorKind::Kde).unwrap();
    assert_abs_diff_eq!(kl, 0.0, epsilon = 1e-12);

    let copy = Empirical::new(&data).unwrap();
    let kl = dist.kl_divergence(&copy, EstimatorKind::Knn(3)).unwrap();
    assert_abs_diff_eq!(kl, 0.0, epsilon = 1e-12);
}

#[test]
fn divergence_over_union_support_uses_pseudo_counts() {
    let p = model(&[1.0, 1.0, 2.0]);
    let q = model(&[1.0, 2.0, 2.0, 3.0]);

    // P: n=3, k=2 -> denominator 4; Q: n=4, k=3 -> denominator 5.5.
    // x = 3 is unobserved in P and keeps its pseudo-count 0.5 / 4.
    let term = |p: f64, q: f64| p * (p / q).ln();
    let expected = term(2.5 / 4.0, 1.5 / 5.5)
        + term(1.5 / 4.0, 2.5 / 5.5)
        + term(0.5 / 4.0, 1.5 / 5.5);
    assert_abs_diff_eq!(p.kl_divergence(&q), expected, epsilon = 1e-12);
    assert!(p.kl_divergence(&q).is_finite());
}

#[test]
fn divergence_is_finite_for_disjoint_supports() {
    let p = model(&[0.0, 1.0, 1.0]);
    let q = model(&[5.0, 6.0, 6.0]);
    let kl = p.kl_divergence(&q);
    assert!(kl.is_finite());
    assert!(p.smoothed_probability(6.0) > 0.0);
}

#[test]
fn divergence_respects_log_base() {
    let a = Empirical::with_config(
        &[1.0, 1.0, 2.0, 3.0],
        empirical::EmpiricalConfig::default().with_base(2.0),
    )
    .unwrap();
    let b = Empirical::with_config(
        &[1.0, 2.0, 2.0, 2.0],
        empirical::EmpiricalConfig::default().with_base(2.0),
    )
    .unwrap();
    let bits = a.kl_divergence(&b, EstimatorKind::Kde).unwrap();
    let nats = Empirical::new(&[1.0, 1.0, 2.0, 3.0])
        .unwrap()
        .kl_divergence(&Empirical::new(&[1.0, 2.0, 2.0, 2.0]).unwrap(), EstimatorKind::Kde)
        .unwrap();
    assert_abs_diff_eq!(bits, nats / std::f64::consts::LN_2, epsilon = 1e-12);
}

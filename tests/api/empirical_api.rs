// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;

use empirical::{Empirical, EmpiricalConfig, EmpiricalError, EstimatorKind};

use crate::test_helpers::{gaussian_samples, integer_samples};

#[test]
fn known_example_through_facade() {
    let dist = Empirical::new(&[1.0, 2.0, 2.0, 4.0]).unwrap();
    assert!(dist.is_discrete());
    assert_eq!(dist.lattice_step(), Some(1.0));
    assert_eq!(dist.lattice_origin(), Some(1.0));
    assert_abs_diff_eq!(dist.pdf(2.0), 2.5 / 5.5, epsilon = 1e-12);
    assert_eq!(dist.quantile(0.0).unwrap(), 1.0);
    assert_eq!(dist.quantile(0.5).unwrap(), 2.0);
    assert_eq!(dist.quantile(0.75).unwrap(), 4.0);
    assert_eq!(dist.len(), 4);
    assert!(dist.classification().is_discrete());
}

#[test]
fn empty_sample_is_rejected() {
    let empty: [f64; 0] = [];
    assert_eq!(Empirical::new(&empty).err(), Some(EmpiricalError::EmptySample));
    assert_eq!(
        Empirical::continuous(&empty, EmpiricalConfig::default()).err(),
        Some(EmpiricalError::EmptySample)
    );
}

#[test]
fn non_finite_observations_are_rejected() {
    assert!(matches!(
        Empirical::new(&[1.0, f64::INFINITY]),
        Err(EmpiricalError::InvalidParameter { .. })
    ));
}

#[test]
fn invalid_probability_is_reported() {
    let dist = Empirical::new(&gaussian_samples(50, 0.0, 1.0, 91)).unwrap();
    assert_eq!(dist.quantile(-0.5), Err(EmpiricalError::InvalidProbability(-0.5)));
    assert_eq!(
        dist.quantile_complement(1.5),
        Err(EmpiricalError::InvalidProbability(1.5))
    );
}

#[test]
fn higher_moments_are_not_estimated() {
    let dist = Empirical::new(&[1.0, 2.0, 3.0, 3.0]).unwrap();
    assert_eq!(dist.variance(), None);
    assert_eq!(dist.skewness(), None);
    assert_eq!(dist.kurtosis(), None);
}

#[test]
fn mixed_kinds_degrade_or_fail_explicitly() {
    let discrete = Empirical::new(&integer_samples(50, 4, 92)).unwrap();
    let continuous = Empirical::new(&gaussian_samples(50, 0.0, 1.0, 93)).unwrap();
    assert!(discrete.is_discrete());
    assert!(!continuous.is_discrete());

    assert_eq!(discrete.kl_divergence(&continuous, EstimatorKind::Kde), None);
    assert_eq!(continuous.kl_divergence(&discrete, EstimatorKind::Knn(3)), None);

    let err = discrete
        .kl_divergence_estimate(&continuous, EstimatorKind::Kde, 0, 0.95)
        .unwrap_err();
    assert_eq!(
        err,
        EmpiricalError::MismatchedSupport {
            left: "discrete",
            right: "continuous"
        }
    );
    assert!(matches!(
        continuous.kl_divergence_estimate(&discrete, EstimatorKind::Kde, 5, 0.9),
        Err(EmpiricalError::MismatchedSupport { .. })
    ));
}

#[test]
fn estimate_variants_report_why_a_value_is_missing() {
    let config = EmpiricalConfig::default().with_default_estimator(EstimatorKind::Knn(4));
    let small = Empirical::with_config(&[0.1, 0.35, 0.9], config).unwrap();
    assert!(!small.is_discrete());
    assert_eq!(small.entropy(), None);
    assert_eq!(
        small.entropy_estimate(EstimatorKind::Knn(4), 0, 0.95).unwrap_err(),
        EmpiricalError::InsufficientSamples {
            required: 5,
            actual: 3
        }
    );

    let other = Empirical::new(&gaussian_samples(40, 0.0, 1.0, 94)).unwrap();
    assert_eq!(small.kl_divergence(&other, EstimatorKind::Knn(4)), None);
    assert!(matches!(
        small.kl_divergence_estimate(&other, EstimatorKind::Knn(4), 0, 0.95),
        Err(EmpiricalError::InsufficientSamples { .. })
    ));
}

#[test]
fn explicit_constructors_bypass_classification() {
    let config = EmpiricalConfig::default();
    let forced = Empirical::discrete(&[0.5, 1.5, 2.5], config).unwrap();
    assert!(forced.is_discrete());
    assert_eq!(forced.lattice_step(), Some(1.0));
    assert_eq!(forced.lattice_origin(), Some(0.5));

    // No common lattice fits these values
    assert!(matches!(
        Empirical::discrete(&[0.0, 2.0, 5.0], config),
        Err(EmpiricalError::InvalidParameter { name: "samples", .. })
    ));

    let smooth = Empirical::continuous(&[1.0, 2.0, 2.0, 4.0], config).unwrap();
    let lattice = Empirical::new(&[1.0, 2.0, 2.0, 4.0]).unwrap();
    assert!(smooth.kl_divergence(&lattice, EstimatorKind::Kde).is_none());
}

#[test]
fn support_and_hazard_sentinel() {
    let dist = Empirical::new(&gaussian_samples(100, 0.0, 1.0, 94)).unwrap();
    let (lo, hi) = dist.support();
    assert!(lo < dist.quantile(0.001).unwrap());
    assert!(hi > dist.quantile(0.999).unwrap());
    assert_eq!(dist.hazard(hi + 50.0), f64::INFINITY);

    let counts = Empirical::new(&[0.0, 1.0, 1.0, 3.0]).unwrap();
    assert_eq!(counts.support(), (0.0, 3.0));
    assert_eq!(counts.chf(3.0), f64::INFINITY);
}

#[test]
fn local_entropy_values_cover_every_observation() {
    let data = gaussian_samples(64, 0.0, 1.0, 95);
    let dist = Empirical::new(&data).unwrap();
    let locals = dist.local_entropy_values();
    assert_eq!(locals.len(), 64);
    assert!(locals.iter().all(|v| v.is_finite()));
}

#[test]
fn invalid_configuration_is_rejected() {
    let bad_base = EmpiricalConfig::default().with_base(1.0);
    assert!(matches!(
        Empirical::with_config(&[1.0, 2.0], bad_base),
        Err(EmpiricalError::InvalidParameter { name: "base", .. })
    ));
}

#[test]
fn single_precision_facade_matches_double() {
    let wide = Empirical::<f64>::new(&[1.0, 2.0, 2.0, 4.0]).unwrap();
    let narrow = Empirical::<f32>::new(&[1.0f32, 2.0, 2.0, 4.0]).unwrap();
    assert!(narrow.is_discrete());
    assert_eq!(narrow.lattice_step(), Some(1.0f32));
    assert_abs_diff_eq!(narrow.pdf(2.0) as f64, wide.pdf(2.0), epsilon = 1e-6);
    assert_abs_diff_eq!(narrow.cdf(3.0) as f64, wide.cdf(3.0), epsilon = 1e-6);
    assert_eq!(narrow.median(), 2.0f32);
}

#[test]
fn special_functions_on_real() {
    use empirical::Real;
    let euler_gamma = 0.577_215_664_901_532_9;
    assert_abs_diff_eq!(Real::digamma(1.0f64), -euler_gamma, epsilon = 1e-12);
    assert_abs_diff_eq!(Real::ln_gamma(5.0f64), 24f64.ln(), epsilon = 1e-12);
    assert_abs_diff_eq!(Real::digamma(1.0f32), -euler_gamma as f32, epsilon = 1e-6);
}

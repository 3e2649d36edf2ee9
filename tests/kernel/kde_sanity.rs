// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use rstest::rstest;

use empirical::estimators::approaches::kernel::ContinuousEmpirical;
use empirical::estimators::traits::{LocalValues, ProbabilityModel};
use empirical::estimators::utils::integrate::{IntegrationRule, integrate};
use empirical::{Bandwidth, Empirical, EmpiricalConfig, EmpiricalError, Sample};

use crate::test_helpers::{gaussian_samples, integer_samples, uniform_samples};

fn normal_model(n: usize, seed: u64) -> ContinuousEmpirical {
    let sample = Sample::from_vec(gaussian_samples(n, 0.0, 1.0, seed)).unwrap();
    ContinuousEmpirical::new(sample, Bandwidth::NormalReference).unwrap()
}

#[rstest]
#[case(50, 1)]
#[case(500, 2)]
fn cdf_is_monotone_and_bounded(#[case] n: usize, #[case] seed: u64) {
    let model = normal_model(n, seed);
    let (lo, hi) = model.support();
    assert!(model.cdf(lo) < 1e-12);
    assert!(model.cdf(hi) > 1.0 - 1e-12);

    let mut prev = 0.0;
    for i in 0..=400 {
        let x = lo + (hi - lo) * i as f64 / 400.0;
        let c = model.cdf(x);
        assert!((0.0..=1.0).contains(&c));
        assert!(c >= prev, "cdf decreased at {x}");
        assert_abs_diff_eq!(c + model.sf(x), 1.0, epsilon = 1e-12);
        prev = c;
    }
}

#[test]
fn density_integrates_to_one() {
    let model = normal_model(300, 3);
    let mass = integrate(|x| model.pdf(x), model.support(), &IntegrationRule::default())
        .into_result()
        .unwrap();
    assert_abs_diff_eq!(mass, 1.0, epsilon = 1e-8);
}

#[rstest]
#[case(0.01)]
#[case(0.25)]
#[case(0.5)]
#[case(0.9)]
#[case(0.999)]
fn quantile_inverts_cdf(#[case] p: f64) {
    let model = normal_model(400, 4);
    let x = model.quantile(p).unwrap();
    assert!(model.cdf(x) >= p - 1e-9);
    assert_abs_diff_eq!(model.cdf(x), p, epsilon = 1e-9);
    assert!(model.quantile(model.cdf(x)).unwrap() >= x - 1e-6);

    let y = model.quantile_complement(1.0 - p).unwrap();
    assert_abs_diff_eq!(y, x, epsilon = 1e-6);
}

#[test]
fn quantile_endpoints_and_errors() {
    let model = normal_model(100, 5);
    let (lo, hi) = model.support();
    assert_eq!(model.quantile(0.0).unwrap(), lo);
    assert_eq!(model.quantile(1.0).unwrap(), hi);
    assert_eq!(model.quantile_complement(0.0).unwrap(), hi);
    assert_eq!(model.quantile_complement(1.0).unwrap(), lo);
    assert_eq!(model.quantile(1.01), Err(EmpiricalError::InvalidProbability(1.01)));
    assert_eq!(
        model.quantile_complement(-0.2),
        Err(EmpiricalError::InvalidProbability(-0.2))
    );
}

#[test]
fn hazard_and_chf_identities() {
    let model = normal_model(200, 6);
    for x in [-2.0, -0.5, 0.0, 0.7, 1.5, 2.5] {
        let sf = model.sf(x);
        assert!(sf > 0.0);
        assert_abs_diff_eq!(model.hazard(x), model.pdf(x) / sf, epsilon = 1e-12);
        assert_abs_diff_eq!(model.chf(x), -sf.ln(), epsilon = 1e-12);
    }
    let (_, hi) = model.support();
    assert_eq!(model.hazard(hi + 100.0), f64::INFINITY);
    assert_eq!(model.chf(hi + 100.0), f64::INFINITY);
}

#[test]
fn location_summaries() {
    let data = gaussian_samples(2000, 5.0, 1.0, 7);
    let sample_mean = data.iter().sum::<f64>() / data.len() as f64;
    let dist = Empirical::new(&data).unwrap();
    assert!(!dist.is_discrete());
    assert_abs_diff_eq!(dist.mean(), sample_mean, epsilon = 1e-12);
    assert_abs_diff_eq!(dist.median(), 5.0, epsilon = 0.15);
    assert_abs_diff_eq!(dist.mode(), 5.0, epsilon = 0.5);
    assert!(dist.pdf(dist.mode()) >= dist.pdf(dist.median()) - 1e-3);
}

#[test]
fn mode_finds_the_taller_cluster() {
    let mut data = gaussian_samples(300, -4.0, 0.5, 8);
    data.extend(gaussian_samples(100, 4.0, 0.5, 9));
    let dist = Empirical::new(&data).unwrap();
    assert_abs_diff_eq!(dist.mode(), -4.0, epsilon = 0.5);
}

#[test]
fn continuous_constructor_overrides_classification() {
    let data = integer_samples(100, 5, 10);
    let forced = Empirical::continuous(&data, EmpiricalConfig::default()).unwrap();
    assert!(!forced.is_discrete());
    assert_eq!(forced.lattice_step(), None);
    // A density model spreads mass between lattice points
    assert!(forced.pdf(2.5) > 0.0);
}

#[test]
fn resubstitution_local_values() {
    let model = normal_model(300, 11);
    let locals = model.local_values();
    assert_eq!(locals.len(), 300);
    let expected = -model.pdf(model.sample().values()[0]).ln();
    assert_abs_diff_eq!(locals[0], expected, epsilon = 1e-12);
    assert!(locals.iter().all(|v| v.is_finite()));
}

#[test]
fn resampled_model_keeps_bandwidth() {
    use rand::SeedableRng;
    let data = uniform_samples(150, 0.0, 3.0, 12);
    let model = ContinuousEmpirical::new(Sample::from_vec(data).unwrap(), Bandwidth::Silverman).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let redrawn = model.resampled(&mut rng);
    assert_eq!(redrawn.bandwidth(), model.bandwidth());
    assert_eq!(redrawn.sample().len(), 150);
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;

use empirical::estimators::approaches::expfam::kl_divergence::KnnKlDivergence;
use empirical::estimators::traits::GlobalValue;
use empirical::{Empirical, EmpiricalError, EstimatorKind, Sample};

use crate::test_helpers::gaussian_samples;

fn sample(values: &[f64]) -> Sample {
    Sample::from_vec(values.to_vec()).unwrap()
}

#[test]
fn interleaved_grids_closed_form() {
    // rho = 1 everywhere, nu = 0.5 everywhere: ln(0.5) + ln(4 / 2) = 0
    let p = sample(&[0.0, 1.0, 2.0]);
    let q = sample(&[0.5, 1.5, 2.5, 3.5]);
    let kl = KnnKlDivergence::from_samples(&p, &q, 1).unwrap();
    assert_abs_diff_eq!(kl.global_value().unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn shifted_normals() {
    let p = gaussian_samples(2000, 0.0, 1.0, 51);
    let q = gaussian_samples(2000, 1.0, 1.0, 52);
    let kl = KnnKlDivergence::from_samples(&sample(&p), &sample(&q), 4)
        .unwrap()
        .global_value()
        .unwrap();
    // KL(N(0,1) || N(1,1)) = 0.5
    assert_abs_diff_eq!(kl, 0.5, epsilon = 0.15);

    let via_facade = Empirical::new(&p)
        .unwrap()
        .kl_divergence(&Empirical::new(&q).unwrap(), EstimatorKind::Knn(4))
        .unwrap();
    assert_abs_diff_eq!(via_facade, kl, epsilon = 1e-12);
}

#[test]
fn too_few_points() {
    let small = sample(&[0.0, 1.0]);
    let large = sample(&[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(
        KnnKlDivergence::from_samples(&small, &large, 2).err(),
        Some(EmpiricalError::InsufficientSamples {
            required: 3,
            actual: 2
        })
    );
    assert_eq!(
        KnnKlDivergence::from_samples(&large, &small, 3).err(),
        Some(EmpiricalError::InsufficientSamples {
            required: 3,
            actual: 2
        })
    );
    assert!(KnnKlDivergence::from_samples(&large, &large, 0).is_err());
}

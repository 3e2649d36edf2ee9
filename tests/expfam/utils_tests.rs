// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;

use empirical::estimators::approaches::expfam::utils::{mean_log_positive, unit_ball_volume};

#[test]
fn unit_ball_volume_known_values() {
    // m = 1 -> volume = 2 (length of [-1, 1])
    assert_abs_diff_eq!(unit_ball_volume(1), 2.0, epsilon = 1e-12);
    // m = 2 -> area = pi
    assert_abs_diff_eq!(unit_ball_volume(2), std::f64::consts::PI, epsilon = 1e-12);
    // m = 3 -> volume = 4/3 * pi
    assert_abs_diff_eq!(
        unit_ball_volume(3),
        4.0 * std::f64::consts::PI / 3.0,
        epsilon = 1e-6
    );
}

#[test]
fn mean_log_skips_zero_radii() {
    let (mean, used) = mean_log_positive(&[0.0, std::f64::consts::E, 1.0]).unwrap();
    assert_eq!(used, 2);
    assert_abs_diff_eq!(mean, 0.5, epsilon = 1e-12);

    assert_eq!(mean_log_positive(&[0.0, 0.0]), None);
    assert_eq!(mean_log_positive(&[]), None);
}

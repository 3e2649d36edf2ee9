// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Compute the volume of the unit m-ball in R^m.
/// c_m = pi^{m/2} / Gamma(m/2 + 1)
pub fn unit_ball_volume(m: usize) -> f64 {
    use statrs::function::gamma::gamma;
    let m_f = m as f64;
    let numerator = std::f64::consts::PI.powf(m_f / 2.0);
    let denom = gamma(m_f / 2.0 + 1.0);
    numerator / denom
}

/// Mean of `ln(r)` over strictly positive radii, with the number of radii used.
///
/// Zero radii come from duplicated observations and are dropped.
pub fn mean_log_positive(radii: &[f64]) -> Option<(f64, usize)> {
    let (sum, cnt) = radii
        .iter()
        .filter(|&&r| r > 0.0)
        .fold((0.0f64, 0usize), |(s, c), &r| (s + r.ln(), c + 1));
    (cnt > 0).then(|| (sum / cnt as f64, cnt))
}

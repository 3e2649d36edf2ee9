// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-dimensional numerical integration with convergence diagnostics.
//!
//! Used by the KDE plug-in entropy and divergence estimators. Non-convergence is reported
//! in [`IntegrationResult`] and turned into [`EmpiricalError::NumericDivergence`] by
//! [`IntegrationResult::into_result`].

use log::warn;

use crate::error::{EmpiricalError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrationRule {
    /// Adaptive Simpson quadrature started on `panels` equal sub-intervals.
    AdaptiveSimpson {
        tolerance: f64,
        max_depth: usize,
        panels: usize,
    },
    /// Fixed composite Simpson rule; `intervals` is rounded up to an even count.
    CompositeSimpson { intervals: usize },
}

impl Default for IntegrationRule {
    fn default() -> Self {
        Self::AdaptiveSimpson {
            tolerance: 1e-9,
            max_depth: 40,
            panels: 64,
        }
    }
}

impl IntegrationRule {
    /// Same rule with at least `panels` starting sub-intervals (adaptive rules only).
    pub fn with_min_panels(self, min_panels: usize) -> Self {
        match self {
            Self::AdaptiveSimpson {
                tolerance,
                max_depth,
                panels,
            } => Self::AdaptiveSimpson {
                tolerance,
                max_depth,
                panels: panels.max(min_panels),
            },
            fixed => fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationResult {
    pub value: f64,
    pub converged: bool,
    pub error_estimate: f64,
    pub evaluations: usize,
}

impl IntegrationResult {
    pub fn into_result(self) -> Result<f64> {
        if self.converged && self.value.is_finite() {
            Ok(self.value)
        } else {
            warn!(
                "integration failed: value={}, error={}, evaluations={}",
                self.value, self.error_estimate, self.evaluations
            );
            Err(EmpiricalError::NumericDivergence {
                estimate: self.value,
                error: self.error_estimate,
                evaluations: self.evaluations,
            })
        }
    }
}

/// Integrate `f` over `[a, b]` with the given rule.
pub fn integrate<F>(f: F, interval: (f64, f64), rule: &IntegrationRule) -> IntegrationResult
where
    F: Fn(f64) -> f64,
{
    let (a, b) = interval;
    if a == b {
        return IntegrationResult {
            value: 0.0,
            converged: true,
            error_estimate: 0.0,
            evaluations: 0,
        };
    }
    match *rule {
        IntegrationRule::AdaptiveSimpson {
            tolerance,
            max_depth,
            panels,
        } => adaptive_simpson(&f, a, b, tolerance, max_depth, panels.max(1)),
        IntegrationRule::CompositeSimpson { intervals } => composite_simpson(&f, a, b, intervals),
    }
}

struct Tally {
    evaluations: usize,
    error: f64,
    converged: bool,
}

fn adaptive_simpson<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_depth: usize,
    panels: usize,
) -> IntegrationResult {
    let width = (b - a) / panels as f64;
    let panel_tol = tolerance / panels as f64;
    let mut tally = Tally {
        evaluations: 0,
        error: 0.0,
        converged: true,
    };

    let mut total = 0.0;
    let mut fa = f(a);
    tally.evaluations += 1;
    for i in 0..panels {
        let lo = a + i as f64 * width;
        let hi = if i + 1 == panels { b } else { lo + width };
        let mid = 0.5 * (lo + hi);
        let fm = f(mid);
        let fb = f(hi);
        tally.evaluations += 2;
        let whole = (hi - lo) / 6.0 * (fa + 4.0 * fm + fb);
        total += refine(f, lo, hi, fa, fm, fb, whole, panel_tol, max_depth, &mut tally);
        fa = fb;
    }

    IntegrationResult {
        value: total,
        converged: tally.converged,
        error_estimate: tally.error,
        evaluations: tally.evaluations,
    }
}

#[allow(clippy::too_many_arguments)]
fn refine<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: usize,
    tally: &mut Tally,
) -> f64 {
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);
    tally.evaluations += 2;

    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * tolerance || depth == 0 {
        if depth == 0 && delta.abs() > 15.0 * tolerance {
            tally.converged = false;
        }
        tally.error += delta.abs() / 15.0;
        return left + right + delta / 15.0;
    }

    refine(f, a, m, fa, flm, fm, left, 0.5 * tolerance, depth - 1, tally)
        + refine(f, m, b, fm, frm, fb, right, 0.5 * tolerance, depth - 1, tally)
}

/// Converged when the Richardson error against the half-resolution rule is below √ε·max(1, |I|).
fn composite_simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, intervals: usize) -> IntegrationResult {
    // Multiple of four so the half-resolution rule is also an even Simpson rule.
    let n = intervals.max(4).div_ceil(4) * 4;
    let h = (b - a) / n as f64;
    let values: Vec<f64> = (0..=n).map(|i| f(a + i as f64 * h)).collect();

    let simpson = |stride: usize| -> f64 {
        let step = h * stride as f64;
        let points = n / stride;
        let mut acc = values[0] + values[n];
        for j in 1..points {
            let w = if j % 2 == 1 { 4.0 } else { 2.0 };
            acc += w * values[j * stride];
        }
        acc * step / 3.0
    };

    let fine = simpson(1);
    let coarse = simpson(2);
    let error_estimate = (fine - coarse).abs() / 15.0;
    IntegrationResult {
        value: fine,
        converged: error_estimate <= f64::EPSILON.sqrt() * fine.abs().max(1.0),
        error_estimate,
        evaluations: values.len(),
    }
}

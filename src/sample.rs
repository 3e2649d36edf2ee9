// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::error::{EmpiricalError, Result};

/// Immutable, non-empty collection of scalar observations.
///
/// The original order is kept in `values`; a sorted copy is cached at construction because
/// every model needs order statistics (lattice detection, quantile brackets, ECDF).
#[derive(Debug, Clone)]
pub struct Sample {
    values: Array1<f64>,
    sorted: Vec<f64>,
}

impl Sample {
    pub fn new(values: Array1<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(EmpiricalError::EmptySample);
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(EmpiricalError::invalid(
                "sample",
                bad,
                "observations must be finite",
            ));
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(Self { values, sorted })
    }

    pub fn from_vec(values: Vec<f64>) -> Result<Self> {
        Self::new(Array1::from(values))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Observations in ascending order.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    pub fn mean(&self) -> f64 {
        self.values.sum() / self.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator); zero for a single observation.
    pub fn std_dev(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let ss = self.values.mapv(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    }

    /// Linear-interpolation order statistic at probability `p` (clamped to [0, 1]).
    pub fn order_statistic(&self, p: f64) -> f64 {
        percentile_sorted(&self.sorted, p)
    }

    pub fn interquartile_range(&self) -> f64 {
        self.order_statistic(0.75) - self.order_statistic(0.25)
    }

    /// Distinct values in ascending order.
    pub fn unique_values(&self) -> Vec<f64> {
        let mut unique = self.sorted.clone();
        unique.dedup();
        unique
    }

    /// Draw `n` observations with replacement.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        let n = self.len();
        let drawn: Vec<f64> = (0..n).map(|_| self.values[rng.gen_range(0..n)]).collect();
        let mut sorted = drawn.clone();
        sorted.sort_by(f64::total_cmp);
        Sample {
            values: Array1::from(drawn),
            sorted,
        }
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = EmpiricalError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_vec(values)
    }
}

impl TryFrom<Array1<f64>> for Sample {
    type Error = EmpiricalError;

    fn try_from(values: Array1<f64>) -> Result<Self> {
        Self::new(values)
    }
}

/// Linear-interpolation percentile of an ascending slice.
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let p = p.clamp(0.0, 1.0);
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Regular lattice `origin + i * step` detected on a discrete sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    pub step: f64,
    pub origin: f64,
}

impl Lattice {
    /// Nearest lattice point to `x`.
    pub fn snap(&self, x: f64) -> f64 {
        ((x - self.origin) / self.step).round() * self.step + self.origin
    }

    pub fn contains(&self, x: f64, tolerance: f64) -> bool {
        (self.snap(x) - x).abs() < tolerance
    }
}

/// Outcome of classifying a sample as discrete or continuous.
///
/// The lattice is present exactly when the sample is discrete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    lattice: Option<Lattice>,
}

impl Classification {
    pub fn discrete(lattice: Lattice) -> Self {
        Self {
            lattice: Some(lattice),
        }
    }

    pub fn continuous() -> Self {
        Self { lattice: None }
    }

    pub fn is_discrete(&self) -> bool {
        self.lattice.is_some()
    }

    pub fn lattice(&self) -> Option<Lattice> {
        self.lattice
    }

    pub fn lattice_step(&self) -> Option<f64> {
        self.lattice.map(|l| l.step)
    }

    pub fn lattice_origin(&self) -> Option<f64> {
        self.lattice.map(|l| l.origin)
    }
}

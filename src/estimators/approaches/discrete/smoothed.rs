// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::discrete::discrete_utils::FrequencyTable;
use crate::estimators::traits::{CrossEntropy, GlobalValue, LocalValues, ProbabilityModel};
use crate::sample::{Lattice, Sample};

/// Slack used when comparing accumulated probabilities against a target level.
const PROBABILITY_SLACK: f64 = 1e-12;

/// Laplace-smoothed empirical model for lattice-valued samples (natural log base).
///
/// Every observed lattice point carries probability `(count + 0.5) / (n + 0.5 k)`; points off
/// the observed support have zero pdf. Entropy adds the Miller–Madow correction `(k - 1)/(2n)`
/// to the plug-in value of the smoothed distribution.
///
/// Cross-entropy and KL divergence use [`DiscreteEmpirical::smoothed_probability`], which keeps
/// unobserved points at the pseudo-count mass so neither can diverge.
#[derive(Debug, Clone)]
pub struct DiscreteEmpirical {
    sample: Sample,
    table: FrequencyTable,
    tolerance: f64,
    probabilities: Vec<f64>,
    /// cumulative[i] = P(X <= values[i])
    cumulative: Vec<f64>,
    /// tail[i] = P(X > values[i]), summed from the top for accuracy near 1
    tail: Vec<f64>,
}

impl DiscreteEmpirical {
    pub fn new(sample: Sample, lattice: Lattice, tolerance: f64) -> Self {
        let table = FrequencyTable::from_sample(&sample, lattice);
        let probabilities: Vec<f64> = table.counts().iter().map(|&c| table.smoothed(c)).collect();

        let cumulative = probabilities
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p;
                Some(*acc)
            })
            .collect();

        let mut tail = vec![0.0; probabilities.len()];
        let mut acc = 0.0;
        for i in (0..probabilities.len()).rev() {
            tail[i] = acc;
            acc += probabilities[i];
        }

        Self {
            sample,
            table,
            tolerance,
            probabilities,
            cumulative,
            tail,
        }
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn lattice(&self) -> Lattice {
        self.table.lattice()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Observed lattice points in ascending order.
    pub fn values(&self) -> &[f64] {
        self.table.values()
    }

    /// Smoothed probabilities aligned with [`values`](Self::values).
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Pseudo-count probability of any point, non-zero even off the observed support.
    pub fn smoothed_probability(&self, x: f64) -> f64 {
        self.table.smoothed(self.table.count(x, self.tolerance))
    }

    /// Rebuild the model on a resampled copy of the data, keeping the lattice.
    pub fn resampled<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self::new(self.sample.resample(rng), self.lattice(), self.tolerance)
    }

    #[inline]
    fn correction(&self) -> f64 {
        // (K - 1) / (2N)
        (self.table.unique_count().saturating_sub(1) as f64) / (2.0 * self.table.n() as f64)
    }

    /// Shannon entropy of the smoothed distribution plus the (K-1)/(2N) correction.
    pub fn entropy(&self) -> f64 {
        let h: f64 = self
            .probabilities
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| -p * p.ln())
            .sum();
        h + self.correction()
    }

    /// KL(P || Q) over the union of both supports with each side's smoothed probabilities.
    pub fn kl_divergence(&self, other: &DiscreteEmpirical) -> f64 {
        let tolerance = self.tolerance.max(other.tolerance);
        union_support(self.values(), other.values(), tolerance)
            .into_iter()
            .map(|x| {
                let p = self.smoothed_probability(x);
                let q = other.smoothed_probability(x);
                p * (p / q).ln()
            })
            .sum()
    }

    /// Number of observed support points `<= x`.
    #[inline]
    fn rank(&self, x: f64) -> usize {
        self.values().partition_point(|&v| v <= x + self.tolerance)
    }
}

/// Ascending union of two ascending slices, merging values closer than `tolerance`.
fn union_support(a: &[f64], b: &[f64], tolerance: f64) -> Vec<f64> {
    let mut merged: Vec<f64> = a.iter().chain(b).copied().collect();
    merged.sort_by(f64::total_cmp);
    merged.dedup_by(|next, prev| (*next - *prev).abs() < tolerance);
    merged
}

impl ProbabilityModel for DiscreteEmpirical {
    fn pdf(&self, x: f64) -> f64 {
        self.table
            .position(x, self.tolerance)
            .map_or(0.0, |i| self.probabilities[i])
    }

    fn cdf(&self, x: f64) -> f64 {
        match self.rank(x) {
            0 => 0.0,
            r => self.cumulative[r - 1],
        }
    }

    fn sf(&self, x: f64) -> f64 {
        match self.rank(x) {
            0 => 1.0,
            r => self.tail[r - 1],
        }
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(EmpiricalError::InvalidProbability(p));
        }
        let idx = self
            .cumulative
            .partition_point(|&c| c < p - PROBABILITY_SLACK)
            .min(self.values().len() - 1);
        Ok(self.values()[idx])
    }

    /// Falls back to the smallest support point when no point has `sf >= q`.
    fn quantile_complement(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(EmpiricalError::InvalidProbability(q));
        }
        let count = self.tail.partition_point(|&t| t >= q - PROBABILITY_SLACK);
        Ok(self.values()[count.saturating_sub(1)])
    }

    fn mean(&self) -> f64 {
        self.values()
            .iter()
            .zip(&self.probabilities)
            .map(|(v, p)| v * p)
            .sum()
    }

    /// Ties resolve to the smallest value.
    fn mode(&self) -> f64 {
        let mut best = 0;
        for (i, &p) in self.probabilities.iter().enumerate() {
            if p > self.probabilities[best] {
                best = i;
            }
        }
        self.values()[best]
    }

    fn support(&self) -> (f64, f64) {
        let values = self.values();
        (values[0], values[values.len() - 1])
    }
}

impl GlobalValue for DiscreteEmpirical {
    fn global_value(&self) -> Result<f64> {
        Ok(self.entropy())
    }
}

impl LocalValues for DiscreteEmpirical {
    /// `-ln p(x_i)` per observation, offset by the global correction.
    fn local_values(&self) -> Array1<f64> {
        let corr = self.correction();
        self.sample.values().mapv(|x| -self.pdf(x).ln() + corr)
    }
}

impl CrossEntropy for DiscreteEmpirical {
    /// H(P, Q) = -Σ_x p(x) ln q(x) over the support of P, with Q smoothed everywhere.
    fn cross_entropy(&self, other: &DiscreteEmpirical) -> f64 {
        self.values()
            .iter()
            .zip(&self.probabilities)
            .map(|(&x, &p)| -p * other.smoothed_probability(x).ln())
            .sum()
    }
}

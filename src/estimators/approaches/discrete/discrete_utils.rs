// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use crate::sample::{Lattice, Sample};

/// Additive pseudo-count applied to every observed lattice point.
pub const SMOOTHING_ALPHA: f64 = 0.5;

/// Observed counts per lattice point, sorted ascending by value.
///
/// Probabilities are Laplace-smoothed: `(count + alpha) / (n + alpha * k)` where `k` is the
/// number of distinct lattice points.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    /// Lattice indices `i` such that value = origin + i * step
    indices: Vec<i64>,
    /// Lattice values, same order as `indices`
    values: Vec<f64>,
    /// Counts per unique lattice value
    counts: Vec<usize>,
    /// Total number of observations
    n: usize,
    alpha: f64,
    lattice: Lattice,
}

impl FrequencyTable {
    pub fn from_sample(sample: &Sample, lattice: Lattice) -> Self {
        Self::with_alpha(sample, lattice, SMOOTHING_ALPHA)
    }

    pub fn with_alpha(sample: &Sample, lattice: Lattice, alpha: f64) -> Self {
        let codes: Vec<i64> = sample
            .sorted()
            .iter()
            .map(|&x| lattice_index(lattice, x))
            .collect();
        let counts_map = count_frequencies_slice(&codes);

        let mut indices: Vec<i64> = counts_map.keys().copied().collect();
        indices.sort_unstable();
        let counts: Vec<usize> = indices.iter().map(|i| counts_map[i]).collect();
        let values = indices
            .iter()
            .map(|&i| lattice.origin + i as f64 * lattice.step)
            .collect();

        Self {
            indices,
            values,
            counts,
            n: sample.len(),
            alpha,
            lattice,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of distinct lattice points observed.
    #[inline]
    pub fn unique_count(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// `n + alpha * k`
    pub fn denominator(&self) -> f64 {
        self.n as f64 + self.alpha * self.unique_count() as f64
    }

    /// Smoothed probability for a count, including unobserved points (count 0).
    #[inline]
    pub fn smoothed(&self, count: usize) -> f64 {
        (count as f64 + self.alpha) / self.denominator()
    }

    /// Position of `x` in the table if it is an observed lattice point.
    pub fn position(&self, x: f64, tolerance: f64) -> Option<usize> {
        if !self.lattice.contains(x, tolerance) {
            return None;
        }
        self.indices
            .binary_search(&lattice_index(self.lattice, x))
            .ok()
    }

    /// Observed count at `x` (zero off the support).
    pub fn count(&self, x: f64, tolerance: f64) -> usize {
        self.position(x, tolerance).map_or(0, |i| self.counts[i])
    }
}

#[inline]
fn lattice_index(lattice: Lattice, x: f64) -> i64 {
    ((x - lattice.origin) / lattice.step).round() as i64
}

/// Count occurrences of each lattice index.
/// Uses a dense vector for small ranges, otherwise falls back to HashMap.
pub fn count_frequencies_slice(data: &[i64]) -> HashMap<i64, usize> {
    if data.is_empty() {
        return HashMap::new();
    }

    let min_v = data.iter().copied().min().unwrap_or(0);
    let max_v = data.iter().copied().max().unwrap_or(0);

    // Range limit chosen to balance memory and speed; can be tuned.
    const MAX_DENSE_RANGE: i64 = 4096;
    let range = max_v.saturating_sub(min_v);
    if (0..=MAX_DENSE_RANGE).contains(&range) {
        let mut dense = vec![0usize; range as usize + 1];
        for &v in data {
            dense[(v - min_v) as usize] += 1;
        }
        return dense
            .iter()
            .enumerate()
            .filter(|&(_, &cnt)| cnt != 0)
            .map(|(i, &cnt)| (min_v + i as i64, cnt))
            .collect();
    }

    let mut frequency_map = HashMap::new();
    for &value in data {
        *frequency_map.entry(value).or_insert(0) += 1;
    }
    frequency_map
}

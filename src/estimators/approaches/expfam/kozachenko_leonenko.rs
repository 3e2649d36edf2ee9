// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;
use statrs::function::gamma::digamma;

use super::utils::{mean_log_positive, unit_ball_volume};
use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::common_nd::dataset::NdDataset;
use crate::estimators::traits::{GlobalValue, LocalValues};
use crate::sample::Sample;

/// Kozachenko–Leonenko differential entropy estimator (kNN-based, Euclidean metric)
///
/// H_hat = ln(N - 1) - psi(k) + ln(c_m) + (m/N) * sum_i ln(eps_i)
/// where c_m is the m-dimensional unit-ball volume (2 for scalar data) and eps_i is the
/// distance from point i to its k-th nearest neighbor (self excluded).
///
/// Zero distances caused by duplicated observations are skipped and the average is taken
/// over the remaining points.
pub struct KozachenkoLeonenkoEntropy<const K: usize> {
    pub nd: NdDataset<K>,
    pub k: usize,
    pub base: f64,
}

impl KozachenkoLeonenkoEntropy<1> {
    /// Construct from a scalar sample.
    pub fn from_sample(sample: &Sample, k: usize) -> Result<Self> {
        Self::from_points(sample.values().iter().map(|&x| [x]).collect(), k)
    }
}

impl<const K: usize> KozachenkoLeonenkoEntropy<K> {
    pub fn from_points(points: Vec<[f64; K]>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(EmpiricalError::invalid("k", k, "must be at least 1"));
        }
        if points.len() <= k {
            return Err(EmpiricalError::InsufficientSamples {
                required: k + 1,
                actual: points.len(),
            });
        }
        let nd = NdDataset::<K>::from_points(points);
        Ok(Self {
            nd,
            k,
            base: std::f64::consts::E,
        })
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// ln(N-1) - psi(k) + ln(c_m), in the configured base.
    fn offset(&self) -> f64 {
        let n_f = self.nd.n as f64;
        ((n_f - 1.0).ln() - digamma(self.k as f64) + unit_ball_volume(K).ln()) / self.base.ln()
    }
}

impl<const K: usize> GlobalValue for KozachenkoLeonenkoEntropy<K> {
    fn global_value(&self) -> Result<f64> {
        let radii = self.nd.kth_neighbor_radii(self.k)?;
        let Some((mean_ln_r, _)) = mean_log_positive(&radii) else {
            return Ok(0.0);
        };
        Ok(self.offset() + (K as f64) * mean_ln_r / self.base.ln())
    }
}

impl<const K: usize> LocalValues for KozachenkoLeonenkoEntropy<K> {
    /// Per-sample contributions h_i = offset + m * ln(eps_i); zero radii contribute the
    /// offset alone.
    fn local_values(&self) -> Array1<f64> {
        let offset = self.offset();
        let ln_base = self.base.ln();
        match self.nd.kth_neighbor_radii(self.k) {
            Ok(radii) => radii
                .into_iter()
                .map(|r| {
                    if r > 0.0 {
                        offset + (K as f64) * r.ln() / ln_base
                    } else {
                        offset
                    }
                })
                .collect(),
            Err(_) => Array1::zeros(0),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::common_nd::dataset::NdDataset;
use crate::estimators::traits::GlobalValue;
use crate::sample::Sample;

/// kNN estimator of KL(P || Q) from samples of P (n points) and Q (m points).
///
/// KL_hat = (d/n) * sum_i ln(nu_k(x_i) / rho_k(x_i)) + ln(m / (n - 1))
///
/// rho_k is the within-P k-th neighbor distance (self excluded) and nu_k the distance from
/// x_i to its k-th neighbor in Q. Points where either distance is zero are skipped.
pub struct KnnKlDivergence<const K: usize> {
    p: NdDataset<K>,
    q: NdDataset<K>,
    k: usize,
}

impl KnnKlDivergence<1> {
    pub fn from_samples(p: &Sample, q: &Sample, k: usize) -> Result<Self> {
        Self::new(NdDataset::from_sample(p), NdDataset::from_sample(q), k)
    }
}

impl<const K: usize> KnnKlDivergence<K> {
    pub fn new(p: NdDataset<K>, q: NdDataset<K>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(EmpiricalError::invalid("k", k, "must be at least 1"));
        }
        if p.n <= k {
            return Err(EmpiricalError::InsufficientSamples {
                required: k + 1,
                actual: p.n,
            });
        }
        if q.n < k {
            return Err(EmpiricalError::InsufficientSamples {
                required: k,
                actual: q.n,
            });
        }
        Ok(Self { p, q, k })
    }
}

impl<const K: usize> GlobalValue for KnnKlDivergence<K> {
    fn global_value(&self) -> Result<f64> {
        let rho = self.p.kth_neighbor_radii(self.k)?;
        let nu = self.q.kth_neighbor_distances_from(&self.p.points, self.k)?;

        let (sum, cnt) = rho
            .iter()
            .zip(&nu)
            .filter(|&(&r, &v)| r > 0.0 && v > 0.0)
            .fold((0.0f64, 0usize), |(s, c), (&r, &v)| (s + (v / r).ln(), c + 1));

        let n_f = self.p.n as f64;
        let m_f = self.q.n as f64;
        let mean_term = if cnt > 0 { (K as f64) * sum / cnt as f64 } else { 0.0 };
        Ok(mean_term + (m_f / (n_f - 1.0)).ln())
    }
}

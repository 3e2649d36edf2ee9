// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Percentile bootstrap for any estimator over resamplable data.
//!
//! Replicate `i` draws from its own `StdRng` seeded with `base_seed + i`, so a fixed seed
//! gives the same interval whether replicates run serially or on the rayon pool.
//! The point estimate is always computed once on the original data.
//!
//! `resamples` has no enforced minimum: a handful of replicates still yields an interval,
//! just a wide and unstable one.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{EmpiricalError, Result};
use crate::float::Real;
use crate::sample::{Sample, percentile_sorted};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    pub resamples: usize,
    pub confidence_level: f64,
    /// Base seed for the per-replicate streams; drawn at random per run when unset.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            resamples: 200,
            confidence_level: 0.95,
            seed: None,
            parallel: true,
        }
    }
}

impl BootstrapConfig {
    pub fn with_resamples(mut self, resamples: usize) -> Self {
        self.resamples = resamples;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(EmpiricalError::invalid(
                "confidence_level",
                self.confidence_level,
                "must lie strictly between 0 and 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapResult<T> {
    pub point_estimate: T,
    /// Percentile interval, widened if needed so it contains the point estimate.
    pub confidence_interval: Option<(T, T)>,
    pub resamples: usize,
}

/// Data that can be redrawn with replacement.
pub trait Resample: Sync {
    /// Number of observations a resample draws.
    fn sample_size(&self) -> usize;

    fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;
}

impl Resample for Sample {
    fn sample_size(&self) -> usize {
        self.len()
    }

    fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Sample::resample(self, rng)
    }
}

/// Two-sample statistics resample each side independently.
impl<A: Resample, B: Resample> Resample for (A, B) {
    fn sample_size(&self) -> usize {
        self.0.sample_size().min(self.1.sample_size())
    }

    fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        (self.0.resample(rng), self.1.resample(rng))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BootstrapEngine {
    config: BootstrapConfig,
}

impl BootstrapEngine {
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Point estimate on `data` plus a percentile interval over `resamples` replicates.
    pub fn run<D, T, E>(&self, data: &D, estimate: E) -> Result<BootstrapResult<T>>
    where
        D: Resample,
        T: Real,
        E: Fn(&D) -> Result<T> + Sync,
    {
        let n = data.sample_size();
        if n < 2 {
            return Err(EmpiricalError::InsufficientSamples {
                required: 2,
                actual: n,
            });
        }

        let point_estimate = estimate(data)?;
        let resamples = self.config.resamples;
        if resamples == 0 {
            return Ok(BootstrapResult {
                point_estimate,
                confidence_interval: None,
                resamples,
            });
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(
            "bootstrap: {resamples} replicates of size {n}, level {}, seed {base_seed}",
            self.config.confidence_level
        );
        let replicate = |i: usize| -> Result<f64> {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let redrawn = data.resample(&mut rng);
            estimate(&redrawn).map(Real::to_canonical)
        };
        let values: Vec<f64> = if self.config.parallel {
            (0..resamples)
                .into_par_iter()
                .map(replicate)
                .collect::<Result<_>>()?
        } else {
            (0..resamples).map(replicate).collect::<Result<_>>()?
        };

        let confidence_interval = self
            .percentile_interval(values, point_estimate.to_canonical())
            .map(|(lo, hi)| (T::from_canonical(lo), T::from_canonical(hi)));
        Ok(BootstrapResult {
            point_estimate,
            confidence_interval,
            resamples,
        })
    }

    fn percentile_interval(&self, mut values: Vec<f64>, point: f64) -> Option<(f64, f64)> {
        let total = values.len();
        values.retain(|v| v.is_finite());
        if values.len() < total {
            warn!(
                "bootstrap: dropped {} non-finite replicate values",
                total - values.len()
            );
        }
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let alpha = (1.0 - self.config.confidence_level) / 2.0;
        let lower = percentile_sorted(&values, alpha);
        let upper = percentile_sorted(&values, 1.0 - alpha);
        debug!("bootstrap interval [{lower}, {upper}] around {point}");
        Some((lower.min(point), upper.max(point)))
    }
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use super::kernel::{Bandwidth, GaussianKde};
use crate::error::{EmpiricalError, Result};
use crate::estimators::traits::{LocalValues, ProbabilityModel};
use crate::sample::Sample;

/// Maximum bisection steps when inverting the cdf.
const MAX_BISECTION_STEPS: usize = 200;
/// Grid resolution of the coarse mode search.
const MODE_GRID: usize = 512;
/// Golden-section iterations refining the mode.
const MODE_REFINE_STEPS: usize = 80;

/// Empirical model for continuous samples backed by a Gaussian KDE.
///
/// cdf, sf and the quantile functions use the closed-form kernel CDF; quantiles are found by
/// bisection over [`support`](ProbabilityModel::support), which extends the observed range by
/// eight bandwidths on each side.
#[derive(Debug, Clone)]
pub struct ContinuousEmpirical {
    sample: Sample,
    kde: GaussianKde,
}

impl ContinuousEmpirical {
    pub fn new(sample: Sample, bandwidth: Bandwidth) -> Result<Self> {
        let h = bandwidth.select(&sample)?;
        let kde = GaussianKde::new(&sample, h);
        Ok(Self { sample, kde })
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn kde(&self) -> &GaussianKde {
        &self.kde
    }

    pub fn bandwidth(&self) -> f64 {
        self.kde.bandwidth()
    }

    /// Rebuild on a resampled copy of the data, keeping the fitted bandwidth.
    pub fn resampled<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let sample = self.sample.resample(rng);
        let kde = GaussianKde::new(&sample, self.bandwidth());
        Self { sample, kde }
    }

    /// Bisection on a monotone predicate; returns the end where `keep_hi` holds.
    fn bisect(&self, mut lo: f64, mut hi: f64, keep_hi: impl Fn(f64) -> bool) -> (f64, f64) {
        for _ in 0..MAX_BISECTION_STEPS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            if keep_hi(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        (lo, hi)
    }
}

impl ProbabilityModel for ContinuousEmpirical {
    fn pdf(&self, x: f64) -> f64 {
        self.kde.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.kde.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.kde.sf(x)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(EmpiricalError::InvalidProbability(p));
        }
        let (lo, hi) = self.support();
        if p == 0.0 {
            return Ok(lo);
        }
        if p == 1.0 {
            return Ok(hi);
        }
        // Smallest x with cdf(x) >= p: keep the upper end on the satisfied side.
        let (_, x) = self.bisect(lo, hi, |mid| self.cdf(mid) >= p);
        Ok(x)
    }

    fn quantile_complement(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(EmpiricalError::InvalidProbability(q));
        }
        let (lo, hi) = self.support();
        if q == 0.0 {
            return Ok(hi);
        }
        if q == 1.0 {
            return Ok(lo);
        }
        // Largest x with sf(x) >= q: the lower end stays on the satisfied side.
        let (x, _) = self.bisect(lo, hi, |mid| self.sf(mid) < q);
        Ok(x)
    }

    /// The KDE mean equals the sample mean for a symmetric kernel.
    fn mean(&self) -> f64 {
        self.sample.mean()
    }

    /// Grid search over the observed range padded by three bandwidths, refined by
    /// golden-section search between the neighbours of the best grid point.
    fn mode(&self) -> f64 {
        let h = self.bandwidth();
        let lo = self.sample.min() - 3.0 * h;
        let hi = self.sample.max() + 3.0 * h;
        let step = (hi - lo) / MODE_GRID as f64;

        let mut best = 0;
        let mut best_density = f64::NEG_INFINITY;
        for i in 0..=MODE_GRID {
            let density = self.pdf(lo + i as f64 * step);
            if density > best_density {
                best = i;
                best_density = density;
            }
        }

        let center = lo + best as f64 * step;
        let (mut a, mut b) = (center - step, center + step);
        let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
        let mut c = b - inv_phi * (b - a);
        let mut d = a + inv_phi * (b - a);
        for _ in 0..MODE_REFINE_STEPS {
            if self.pdf(c) >= self.pdf(d) {
                b = d;
            } else {
                a = c;
            }
            c = b - inv_phi * (b - a);
            d = a + inv_phi * (b - a);
        }
        let refined = 0.5 * (a + b);
        if self.pdf(refined) >= best_density {
            refined
        } else {
            center
        }
    }

    fn support(&self) -> (f64, f64) {
        self.kde.support()
    }
}

/// Resubstitution terms `-ln f̂(x_i)`. Their mean is not the plug-in entropy `-∫ f̂ ln f̂`
/// returned by [`KernelPluginEntropy`](super::KernelPluginEntropy).
impl LocalValues for ContinuousEmpirical {
    fn local_values(&self) -> Array1<f64> {
        self.sample.values().mapv(|x| -self.kde.pdf(x).ln())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use rand::Rng;

use crate::error::Result;
use crate::estimators::approaches::discrete::DiscreteEmpirical;
use crate::estimators::approaches::kernel::ContinuousEmpirical;
use crate::estimators::traits::ProbabilityModel;
use crate::estimators::utils::bootstrap::Resample;
use crate::sample::Sample;

/// A built empirical model of either kind.
#[derive(Debug, Clone)]
pub enum EmpiricalModel {
    Discrete(DiscreteEmpirical),
    Continuous(ContinuousEmpirical),
}

impl EmpiricalModel {
    pub fn sample(&self) -> &Sample {
        match self {
            Self::Discrete(m) => m.sample(),
            Self::Continuous(m) => m.sample(),
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete(_))
    }

    /// Short name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Discrete(_) => "discrete",
            Self::Continuous(_) => "continuous",
        }
    }

    fn as_model(&self) -> &dyn ProbabilityModel {
        match self {
            Self::Discrete(m) => m,
            Self::Continuous(m) => m,
        }
    }
}

impl ProbabilityModel for EmpiricalModel {
    fn pdf(&self, x: f64) -> f64 {
        self.as_model().pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.as_model().cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.as_model().sf(x)
    }

    fn hazard(&self, x: f64) -> f64 {
        self.as_model().hazard(x)
    }

    fn chf(&self, x: f64) -> f64 {
        self.as_model().chf(x)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        self.as_model().quantile(p)
    }

    fn quantile_complement(&self, q: f64) -> Result<f64> {
        self.as_model().quantile_complement(q)
    }

    fn mean(&self) -> f64 {
        self.as_model().mean()
    }

    fn mode(&self) -> f64 {
        self.as_model().mode()
    }

    fn median(&self) -> f64 {
        self.as_model().median()
    }

    fn support(&self) -> (f64, f64) {
        self.as_model().support()
    }
}

/// Resampling keeps the model kind, the lattice and the fitted bandwidth.
impl Resample for EmpiricalModel {
    fn sample_size(&self) -> usize {
        self.sample().len()
    }

    fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        match self {
            Self::Discrete(m) => Self::Discrete(m.resampled(rng)),
            Self::Continuous(m) => Self::Continuous(m.resampled(rng)),
        }
    }
}

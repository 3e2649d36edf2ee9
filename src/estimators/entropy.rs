// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::expfam::kozachenko_leonenko::KozachenkoLeonenkoEntropy;
use crate::estimators::approaches::kernel::KernelPluginEntropy;
use crate::estimators::model::EmpiricalModel;
use crate::estimators::traits::GlobalValue;
use crate::estimators::utils::bootstrap::{BootstrapConfig, BootstrapEngine};
use crate::estimators::utils::integrate::IntegrationRule;
use crate::float::Real;

/// Neighbour count used when an estimator name does not specify one.
pub const DEFAULT_K: usize = 4;

/// Continuous-data estimation strategy.
///
/// Discrete models ignore the choice and always use the smoothed Shannon entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimatorKind {
    /// Plug-in `-∫ f̂ ln f̂` on the Gaussian KDE
    #[default]
    Kde,
    /// Kozachenko–Leonenko with the given neighbour count
    Knn(usize),
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kde => write!(f, "kde"),
            Self::Knn(k) => write!(f, "knn({k})"),
        }
    }
}

/// Accepted spellings, resolved once at parse time.
const KDE_ALIASES: &[&str] = &["kde", "kernel", "plugin", "plug-in"];
const KNN_ALIASES: &[&str] = &["knn", "kl", "kozachenko-leonenko", "kozachenko_leonenko"];

impl FromStr for EstimatorKind {
    type Err = EmpiricalError;

    /// Parses `kde`, `knn`, `knn(5)` or `knn:5` (and the aliases above), case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if KDE_ALIASES.contains(&name.as_str()) {
            return Ok(Self::Kde);
        }
        if KNN_ALIASES.contains(&name.as_str()) {
            return Ok(Self::Knn(DEFAULT_K));
        }

        let unknown = || EmpiricalError::invalid("estimator", s, "unknown estimator name");
        let (head, arg) = if let Some(rest) = name.strip_suffix(')') {
            rest.split_once('(').ok_or_else(unknown)?
        } else {
            name.split_once(':').ok_or_else(unknown)?
        };
        if !KNN_ALIASES.contains(&head.trim()) {
            return Err(unknown());
        }
        let k: usize = arg
            .trim()
            .parse()
            .map_err(|_| EmpiricalError::invalid("k", arg, "must be a positive integer"))?;
        if k == 0 {
            return Err(EmpiricalError::invalid("k", k, "must be at least 1"));
        }
        Ok(Self::Knn(k))
    }
}

/// Point estimate with an optional bootstrap interval.
///
/// Also used for KL divergence estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyEstimate<T> {
    pub value: T,
    pub confidence_interval: Option<(T, T)>,
}

/// Entropy of an empirical model under a selectable strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyEstimator {
    kind: EstimatorKind,
    base: f64,
    rule: IntegrationRule,
}

impl EntropyEstimator {
    pub fn new(kind: EstimatorKind) -> Self {
        Self {
            kind,
            base: std::f64::consts::E,
            rule: IntegrationRule::default(),
        }
    }

    pub fn kde() -> Self {
        Self::new(EstimatorKind::Kde)
    }

    pub fn knn(k: usize) -> Self {
        Self::new(EstimatorKind::Knn(k))
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn with_integration_rule(mut self, rule: IntegrationRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn kind(&self) -> EstimatorKind {
        self.kind
    }

    /// Entropy of `model` without resampling.
    pub fn point(&self, model: &EmpiricalModel) -> Result<f64> {
        validate_base(self.base)?;
        let nats = match (model, self.kind) {
            (EmpiricalModel::Discrete(m), _) => m.entropy(),
            (EmpiricalModel::Continuous(m), EstimatorKind::Kde) => {
                KernelPluginEntropy::new(m).with_rule(self.rule).global_value()?
            }
            (EmpiricalModel::Continuous(m), EstimatorKind::Knn(k)) => {
                KozachenkoLeonenkoEntropy::from_sample(m.sample(), k)?.global_value()?
            }
        };
        Ok(nats / self.base.ln())
    }

    /// Entropy with a bootstrap interval when `bootstrap.resamples > 0`.
    pub fn estimate<T: Real>(
        &self,
        model: &EmpiricalModel,
        bootstrap: &BootstrapConfig,
    ) -> Result<EntropyEstimate<T>> {
        if bootstrap.resamples == 0 {
            let value = T::from_canonical(self.point(model)?);
            return Ok(EntropyEstimate {
                value,
                confidence_interval: None,
            });
        }
        let result = BootstrapEngine::new(*bootstrap)?
            .run(model, |m: &EmpiricalModel| self.point(m).map(T::from_canonical))?;
        Ok(EntropyEstimate {
            value: result.point_estimate,
            confidence_interval: result.confidence_interval,
        })
    }
}

pub(crate) fn validate_base(base: f64) -> Result<()> {
    if base.is_finite() && base > 0.0 && base != 1.0 {
        Ok(())
    } else {
        Err(EmpiricalError::invalid(
            "base",
            base,
            "logarithm base must be positive, finite and not 1",
        ))
    }
}

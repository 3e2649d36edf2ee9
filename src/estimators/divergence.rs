// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use log::debug;

use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::expfam::kl_divergence::KnnKlDivergence;
use crate::estimators::approaches::kernel::KernelPluginDivergence;
use crate::estimators::entropy::{EntropyEstimate, EstimatorKind, validate_base};
use crate::estimators::model::EmpiricalModel;
use crate::estimators::traits::GlobalValue;
use crate::estimators::utils::bootstrap::{BootstrapConfig, BootstrapEngine};
use crate::estimators::utils::integrate::IntegrationRule;
use crate::float::Real;

/// KL divergence KL(P || Q) between two empirical models of the same kind.
///
/// - discrete/discrete: smoothed-count sum over the union of supports
/// - continuous/continuous, `Knn(k)`: nearest-neighbour distance ratios
/// - continuous/continuous, `Kde`: numerical integral of `p ln(p/q)` on the KDEs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceEstimator {
    kind: EstimatorKind,
    base: f64,
    rule: IntegrationRule,
}

impl DivergenceEstimator {
    pub fn new(kind: EstimatorKind) -> Self {
        Self {
            kind,
            base: std::f64::consts::E,
            rule: IntegrationRule::default(),
        }
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

    /// Divergence, failing with `MismatchedSupport` for mixed model kinds.
    pub fn try_kl_divergence(&self, p: &EmpiricalModel, q: &EmpiricalModel) -> Result<f64> {
        validate_base(self.base)?;
        let nats = match (p, q, self.kind) {
            (EmpiricalModel::Discrete(p), EmpiricalModel::Discrete(q), _) => p.kl_divergence(q),
            (EmpiricalModel::Continuous(p), EmpiricalModel::Continuous(q), EstimatorKind::Knn(k)) => {
                KnnKlDivergence::from_samples(p.sample(), q.sample(), k)?.global_value()?
            }
            (EmpiricalModel::Continuous(p), EmpiricalModel::Continuous(q), EstimatorKind::Kde) => {
                KernelPluginDivergence::new(p, q)
                    .with_rule(self.rule)
                    .global_value()?
            }
            _ => {
                return Err(EmpiricalError::MismatchedSupport {
                    left: p.kind_name(),
                    right: q.kind_name(),
                });
            }
        };
        Ok(nats / self.base.ln())
    }

    /// Divergence, or `None` when it cannot be computed (mixed kinds included).
    pub fn kl_divergence(&self, p: &EmpiricalModel, q: &EmpiricalModel) -> Option<f64> {
        self.try_kl_divergence(p, q)
            .inspect_err(|err| debug!("kl divergence unavailable: {err}"))
            .ok()
    }

    /// Divergence with a bootstrap interval; only P is resampled, Q stays fixed.
    pub fn estimate<T: Real>(
        &self,
        p: &EmpiricalModel,
        q: &EmpiricalModel,
        bootstrap: &BootstrapConfig,
    ) -> Result<EntropyEstimate<T>> {
        if bootstrap.resamples == 0 {
            let value = T::from_canonical(self.try_kl_divergence(p, q)?);
            return Ok(EntropyEstimate {
                value,
                confidence_interval: None,
            });
        }
        let result = BootstrapEngine::new(*bootstrap)?.run(p, |p: &EmpiricalModel| {
            self.try_kl_divergence(p, q).map(T::from_canonical)
        })?;
        Ok(EntropyEstimate {
            value: result.point_estimate,
            confidence_interval: result.confidence_interval,
        })
    }
}

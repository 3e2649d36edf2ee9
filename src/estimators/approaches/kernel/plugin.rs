// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plug-in information measures on top of the Gaussian KDE.
//!
//! Both measures integrate over the KDE support numerically. The adaptive rule is started on
//! panels no wider than one bandwidth so narrow modes are never stepped over.

use super::continuous::ContinuousEmpirical;
use crate::error::Result;
use crate::estimators::traits::{GlobalValue, ProbabilityModel};
use crate::estimators::utils::integrate::{IntegrationRule, integrate};

const MAX_PANELS: usize = 100_000;

fn panels_for(interval: (f64, f64), bandwidth: f64) -> usize {
    let panels = ((interval.1 - interval.0) / bandwidth).ceil();
    if panels.is_finite() {
        (panels as usize).clamp(1, MAX_PANELS)
    } else {
        MAX_PANELS
    }
}

/// Differential entropy `-∫ f̂ ln f̂` of a KDE (natural log base).
pub struct KernelPluginEntropy<'a> {
    model: &'a ContinuousEmpirical,
    rule: IntegrationRule,
}

impl<'a> KernelPluginEntropy<'a> {
    pub fn new(model: &'a ContinuousEmpirical) -> Self {
        Self {
            model,
            rule: IntegrationRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: IntegrationRule) -> Self {
        self.rule = rule;
        self
    }
}

impl GlobalValue for KernelPluginEntropy<'_> {
    fn global_value(&self) -> Result<f64> {
        let interval = self.model.support();
        let rule = self
            .rule
            .with_min_panels(panels_for(interval, self.model.bandwidth()));
        integrate(
            |x| {
                let f = self.model.pdf(x);
                if f > 0.0 { -f * f.ln() } else { 0.0 }
            },
            interval,
            &rule,
        )
        .into_result()
    }
}

/// KL divergence `∫ p̂ ln(p̂/q̂)` between two KDEs (natural log base).
///
/// The integral runs over the union of both supports; q̂ is floored at the smallest positive
/// double so regions where only P has mass stay finite.
pub struct KernelPluginDivergence<'a> {
    p: &'a ContinuousEmpirical,
    q: &'a ContinuousEmpirical,
    rule: IntegrationRule,
}

impl<'a> KernelPluginDivergence<'a> {
    pub fn new(p: &'a ContinuousEmpirical, q: &'a ContinuousEmpirical) -> Self {
        Self {
            p,
            q,
            rule: IntegrationRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: IntegrationRule) -> Self {
        self.rule = rule;
        self
    }
}

impl GlobalValue for KernelPluginDivergence<'_> {
    fn global_value(&self) -> Result<f64> {
        let (p_lo, p_hi) = self.p.support();
        let (q_lo, q_hi) = self.q.support();
        let interval = (p_lo.min(q_lo), p_hi.max(q_hi));
        let h = self.p.bandwidth().min(self.q.bandwidth());
        let rule = self.rule.with_min_panels(panels_for(interval, h));
        integrate(
            |x| {
                let p = self.p.pdf(x);
                if p <= 0.0 {
                    return 0.0;
                }
                let q = self.q.pdf(x).max(f64::MIN_POSITIVE);
                p * (p / q).ln()
            },
            interval,
            &rule,
        )
        .into_result()
    }
}

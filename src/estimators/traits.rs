// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::Result;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> Result<f64>;
}

pub trait LocalValues {
    /// Compute and return the per-observation values of the measure.
    fn local_values(&self) -> Array1<f64>;
}

/// Interface for estimators that support cross-entropy $H(P||Q)$.
pub trait CrossEntropy<Rhs = Self> {
    /// Compute the cross-entropy between this distribution (P) and another (Q).
    fn cross_entropy(&self, other: &Rhs) -> f64;
}

/// Query surface shared by the discrete and continuous empirical models.
///
/// `hazard` and `chf` return [`f64::INFINITY`] where the survival function is zero.
pub trait ProbabilityModel {
    fn pdf(&self, x: f64) -> f64;

    fn cdf(&self, x: f64) -> f64;

    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    fn hazard(&self, x: f64) -> f64 {
        let sf = self.sf(x);
        if sf <= 0.0 {
            return f64::INFINITY;
        }
        self.pdf(x) / sf
    }

    fn chf(&self, x: f64) -> f64 {
        let sf = self.sf(x);
        if sf <= 0.0 {
            return f64::INFINITY;
        }
        -sf.ln()
    }

    /// Smallest point whose cdf reaches `p`.
    fn quantile(&self, p: f64) -> Result<f64>;

    /// Largest point whose survival function still reaches `q`.
    fn quantile_complement(&self, q: f64) -> Result<f64>;

    fn mean(&self) -> f64;

    fn mode(&self) -> f64;

    fn median(&self) -> f64 {
        // 0.5 is always a valid probability
        self.quantile(0.5).unwrap_or(f64::NAN)
    }

    /// Interval outside of which the model carries no (or negligible) mass.
    fn support(&self) -> (f64, f64);
}

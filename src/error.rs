// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by every model and estimator in the crate.

use thiserror::Error;

/// Failures raised while building empirical models or running estimators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmpiricalError {
    /// A sample must contain at least one observation.
    #[error("sample is empty; at least one observation is required")]
    EmptySample,

    /// Probability arguments of quantile functions must lie in [0, 1].
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// The estimator needs more observations than were supplied.
    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    /// The two models cannot be compared (e.g. discrete against continuous).
    #[error("mismatched support: cannot compare a {left} model with a {right} model")]
    MismatchedSupport {
        left: &'static str,
        right: &'static str,
    },

    /// Numerical integration did not reach the requested tolerance.
    #[error(
        "numerical integration did not converge (estimate {estimate}, error {error}, {evaluations} evaluations)"
    )]
    NumericDivergence {
        estimate: f64,
        error: f64,
        evaluations: usize,
    },

    /// A configuration value is out of its valid range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl EmpiricalError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, EmpiricalError>;

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Floating-point abstraction used by the public API.
//!
//! Models compute in `f64` internally; [`Real`] converts at the boundary so `f32` and `f64`
//! callers share a single code path.

use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

pub trait Real: Float + FromPrimitive + Debug + Send + Sync + 'static {
    /// Widen to the canonical computation type.
    fn to_canonical(self) -> f64;

    /// Narrow from the canonical computation type.
    fn from_canonical(value: f64) -> Self;

    /// Digamma function ψ(x).
    fn digamma(self) -> Self {
        Self::from_canonical(statrs::function::gamma::digamma(self.to_canonical()))
    }

    /// Natural logarithm of the gamma function.
    fn ln_gamma(self) -> Self {
        Self::from_canonical(statrs::function::gamma::ln_gamma(self.to_canonical()))
    }
}

impl Real for f64 {
    #[inline]
    fn to_canonical(self) -> f64 {
        self
    }

    #[inline]
    fn from_canonical(value: f64) -> Self {
        value
    }
}

impl Real for f32 {
    #[inline]
    fn to_canonical(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_canonical(value: f64) -> Self {
        value as f32
    }
}

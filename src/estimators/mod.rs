// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod approaches;
pub mod divergence;
pub mod entropy;
pub mod model;
pub mod traits;
pub mod utils;

pub use divergence::DivergenceEstimator;
pub use entropy::{EntropyEstimate, EntropyEstimator, EstimatorKind};
pub use model::EmpiricalModel;
pub use traits::{CrossEntropy, GlobalValue, LocalValues, ProbabilityModel};

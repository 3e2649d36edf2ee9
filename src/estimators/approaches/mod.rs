// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod common_nd;
pub mod discrete;
pub mod expfam;
pub mod kernel;

// Re-exports so callers can reach the models and estimators from
// empirical::estimators::approaches::* directly.
pub use discrete::{ClassifierConfig, DiscreteEmpirical, SampleClassifier};
pub use expfam::kl_divergence::KnnKlDivergence;
pub use expfam::kozachenko_leonenko::KozachenkoLeonenkoEntropy;
pub use kernel::{
    Bandwidth, ContinuousEmpirical, GaussianKde, KernelPluginDivergence, KernelPluginEntropy,
};

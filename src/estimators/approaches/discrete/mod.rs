// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Lattice-valued samples: classification, frequency tables and the smoothed model.

pub mod discrete_utils;
pub mod lattice;
pub mod smoothed;

pub use discrete_utils::{FrequencyTable, SMOOTHING_ALPHA};
pub use lattice::{ClassifierConfig, SampleClassifier, classify, detect_lattice};
pub use smoothed::DiscreteEmpirical;

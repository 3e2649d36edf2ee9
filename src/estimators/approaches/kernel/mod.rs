// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

mod kernel; // Gaussian KDE core
pub use kernel::*; // re-export GaussianKde, Bandwidth, etc.

pub mod continuous;
pub mod plugin;

pub use continuous::ContinuousEmpirical;
pub use plugin::{KernelPluginDivergence, KernelPluginEntropy};

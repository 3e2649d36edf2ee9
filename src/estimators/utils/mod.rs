// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod bootstrap;
pub mod integrate;
pub mod multimodality;

pub use bootstrap::{BootstrapConfig, BootstrapEngine, BootstrapResult, Resample};
pub use integrate::{IntegrationResult, IntegrationRule, integrate};
pub use multimodality::{MultimodalityDetector, dip_statistic};

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// kNN-based (Kozachenko–Leonenko family) estimators and shared utilities.

pub mod kl_divergence;
pub mod kozachenko_leonenko;
pub mod utils;

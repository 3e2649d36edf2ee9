// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module containing tests for the k-NN (Kozachenko–Leonenko) estimators.
mod knn_kl_sanity;
mod utils_tests;

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # empirical
//!
//! Nonparametric distributions estimated directly from a sample of real-valued observations.
//!
//! ## Quick Start
//!
//! ```rust
//! use empirical::{Empirical, EstimatorKind};
//!
//! // Lattice-valued data gets a Laplace-smoothed frequency model
//! let counts = Empirical::new(&[1.0, 2.0, 2.0, 4.0]).unwrap();
//! assert!(counts.is_discrete());
//! let h = counts.entropy().unwrap();
//! assert!(h > 0.0);
//!
//! // Everything else gets a Gaussian kernel density estimate
//! let readings = Empirical::new(&[0.31, -1.2, 0.77, 2.05, -0.4, 1.13, 0.02]).unwrap();
//! assert!(!readings.is_discrete());
//! let knn = readings.entropy_estimate(EstimatorKind::Knn(2), 0, 0.95).unwrap();
//! assert!(knn.confidence_interval.is_none());
//! ```
//!
//! ## Models
//!
//! | Sample | Model | Entropy | KL divergence |
//! |--------|-------|---------|---------------|
//! | Lattice-valued | Smoothed frequencies (alpha = 0.5) | Plug-in + (k-1)/(2n) | Smoothed sum over union support |
//! | Continuous | Gaussian KDE | KDE plug-in or Kozachenko–Leonenko | KDE integral or k-NN |
//!
//! ## Architecture
//!
//! 1. **Facade**: [`Empirical`] classifies, builds and queries a model
//! 2. **Estimation Approaches**: `discrete` (lattice detection, smoothing), `kernel` (KDE),
//!    `expfam` (k-NN entropy and divergence), `common_nd` (k-d tree datasets)
//! 3. **Engines**: percentile bootstrap on rayon, adaptive Simpson integration, dip-style
//!    multimodality check
//!
//! Models compute in `f64`; the facade is generic over [`Real`] so `f32` callers share the
//! same code path.
//!
//! ## Logging
//!
//! Classification decisions, bandwidths, bootstrap runs and integration failures are reported
//! through the `log` facade. Install any logger to see them.

pub mod empirical;
pub mod error;
pub mod estimators;
pub mod float;
pub mod sample;

pub use empirical::{Empirical, EmpiricalConfig};
pub use error::{EmpiricalError, Result};
pub use estimators::approaches::discrete::{ClassifierConfig, SampleClassifier, classify};
pub use estimators::approaches::kernel::Bandwidth;
pub use estimators::entropy::{EntropyEstimate, EntropyEstimator, EstimatorKind};
pub use estimators::divergence::DivergenceEstimator;
pub use estimators::utils::bootstrap::{BootstrapConfig, BootstrapEngine, BootstrapResult};
pub use estimators::utils::multimodality::MultimodalityDetector;
pub use float::Real;
pub use sample::{Classification, Lattice, Sample};

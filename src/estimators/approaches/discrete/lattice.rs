// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discrete-versus-continuous classification by lattice detection.
//!
//! A sample is treated as discrete when every distinct value sits on a common arithmetic
//! lattice `origin + i * step` (within `tolerance`) and the sample repeats values often
//! enough (`unique / n <= max_unique_ratio`). Integer data without repeats stays continuous.
//! The origin is the minimum observation and the step is the smallest gap between
//! consecutive distinct values, re-fitted over the full span to limit rounding drift.

use log::{debug, trace};

use crate::error::{EmpiricalError, Result};
use crate::sample::{Classification, Lattice, Sample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Absolute distance under which a value counts as lying on the lattice.
    pub tolerance: f64,
    /// Largest `unique / n` ratio still accepted as discrete.
    pub max_unique_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_unique_ratio: 0.8,
        }
    }
}

impl ClassifierConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_unique_ratio(mut self, ratio: f64) -> Self {
        self.max_unique_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EmpiricalError::invalid(
                "tolerance",
                self.tolerance,
                "must be positive and finite",
            ));
        }
        if !(self.max_unique_ratio > 0.0 && self.max_unique_ratio <= 1.0) {
            return Err(EmpiricalError::invalid(
                "max_unique_ratio",
                self.max_unique_ratio,
                "must lie in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Decides which empirical model a sample gets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleClassifier {
    config: ClassifierConfig,
}

impl SampleClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, sample: &Sample) -> Classification {
        let tolerance = self.config.tolerance;
        let unique = sample.unique_values();
        let n = sample.len();

        let Some(lattice) = detect_lattice(&unique, tolerance) else {
            debug!("classified continuous: no lattice fits {} unique values", unique.len());
            return Classification::continuous();
        };

        let k = unique.len();
        let ratio = k as f64 / n as f64;
        if k == 1 || ratio <= self.config.max_unique_ratio {
            debug!(
                "classified discrete: step={}, origin={}, unique={}, n={}",
                lattice.step, lattice.origin, k, n
            );
            Classification::discrete(lattice)
        } else {
            debug!(
                "classified continuous: lattice step={} fits but unique ratio {:.3} exceeds {}",
                lattice.step, ratio, self.config.max_unique_ratio
            );
            Classification::continuous()
        }
    }
}

/// Classify raw observations with the default unique-ratio cutoff.
pub fn classify(samples: &[f64], tolerance: f64) -> Result<Classification> {
    let sample = Sample::from_vec(samples.to_vec())?;
    let classifier = SampleClassifier::new(ClassifierConfig::default().with_tolerance(tolerance))?;
    Ok(classifier.classify(&sample))
}

/// Fit a lattice to ascending distinct values, if one exists.
///
/// A single value yields a unit-step lattice anchored at that value.
pub fn detect_lattice(unique: &[f64], tolerance: f64) -> Option<Lattice> {
    let (&origin, rest) = unique.split_first()?;
    if rest.is_empty() {
        return Some(Lattice { step: 1.0, origin });
    }

    let step = unique
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&gap| gap > tolerance)
        .fold(f64::INFINITY, f64::min);
    if !step.is_finite() || step <= 2.0 * tolerance {
        trace!("lattice rejected: smallest gap {step} too small for tolerance {tolerance}");
        return None;
    }

    // Re-fit the step over the whole span so accumulated rounding stays below tolerance.
    let span = unique[unique.len() - 1] - origin;
    let cells = (span / step).round();
    let step = if cells >= 1.0 { span / cells } else { step };

    let lattice = Lattice { step, origin };
    if unique.iter().all(|&x| lattice.contains(x, tolerance)) {
        Some(lattice)
    } else {
        None
    }
}

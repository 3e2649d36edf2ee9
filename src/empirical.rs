// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Empirical Distribution Facade
//!
//! [`Empirical`] classifies a sample once at construction, builds the matching model
//! (lattice-smoothed or kernel density) and answers every distribution query on it.
//!
//! ```rust
//! use empirical::Empirical;
//!
//! let dist = Empirical::new(&[1.0, 2.0, 2.0, 4.0]).unwrap();
//! assert!(dist.is_discrete());
//! assert_eq!(dist.lattice_step(), Some(1.0));
//! assert_eq!(dist.quantile(0.5).unwrap(), 2.0);
//! ```
//!
//! All internal computation happens in `f64`; a generic `T` (e.g. `f32`) is converted on the
//! way in and out.

use std::marker::PhantomData;

use log::debug;
use ndarray::Array1;

use crate::error::{EmpiricalError, Result};
use crate::estimators::approaches::discrete::{
    ClassifierConfig, DiscreteEmpirical, SampleClassifier, detect_lattice,
};
use crate::estimators::approaches::kernel::{Bandwidth, ContinuousEmpirical};
use crate::estimators::divergence::DivergenceEstimator;
use crate::estimators::entropy::{EntropyEstimate, EntropyEstimator, EstimatorKind, validate_base};
use crate::estimators::model::EmpiricalModel;
use crate::estimators::traits::{LocalValues, ProbabilityModel};
use crate::estimators::utils::bootstrap::BootstrapConfig;
use crate::estimators::utils::integrate::IntegrationRule;
use crate::estimators::utils::multimodality::MultimodalityDetector;
use crate::float::Real;
use crate::sample::{Classification, Sample};

/// Options shared by every model an [`Empirical`] builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalConfig {
    pub classifier: ClassifierConfig,
    pub bandwidth: Bandwidth,
    /// Strategy used by [`Empirical::entropy`] on continuous models.
    pub default_estimator: EstimatorKind,
    /// Logarithm base of entropy and divergence outputs.
    pub base: f64,
    pub integration: IntegrationRule,
    pub multimodality: MultimodalityDetector,
}

impl Default for EmpiricalConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            bandwidth: Bandwidth::default(),
            default_estimator: EstimatorKind::default(),
            base: std::f64::consts::E,
            integration: IntegrationRule::default(),
            multimodality: MultimodalityDetector::default(),
        }
    }
}

impl EmpiricalConfig {
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_default_estimator(mut self, kind: EstimatorKind) -> Self {
        self.default_estimator = kind;
        self
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn with_integration_rule(mut self, rule: IntegrationRule) -> Self {
        self.integration = rule;
        self
    }

    pub fn with_multimodality(mut self, detector: MultimodalityDetector) -> Self {
        self.multimodality = detector;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        validate_base(self.base)
    }
}

/// Nonparametric distribution estimated from a fixed sample.
///
/// The sample and its classification never change after construction; entropy, divergence
/// and bootstrap results are recomputed on every call.
#[derive(Debug, Clone)]
pub struct Empirical<T: Real = f64> {
    model: EmpiricalModel,
    classification: Classification,
    config: EmpiricalConfig,
    _precision: PhantomData<T>,
}

fn to_sample<T: Real>(samples: &[T]) -> Result<Sample> {
    Sample::from_vec(samples.iter().map(|x| x.to_canonical()).collect())
}

impl<T: Real> Empirical<T> {
    /// Classify `samples` and build the matching model with default options.
    pub fn new(samples: &[T]) -> Result<Self> {
        Self::with_config(samples, EmpiricalConfig::default())
    }

    pub fn with_config(samples: &[T], config: EmpiricalConfig) -> Result<Self> {
        Self::from_sample(to_sample(samples)?, config)
    }

    pub fn from_sample(sample: Sample, config: EmpiricalConfig) -> Result<Self> {
        config.validate()?;
        let classification = SampleClassifier::new(config.classifier)?.classify(&sample);
        let model = match classification.lattice() {
            Some(lattice) => EmpiricalModel::Discrete(DiscreteEmpirical::new(
                sample,
                lattice,
                config.classifier.tolerance,
            )),
            None => EmpiricalModel::Continuous(ContinuousEmpirical::new(sample, config.bandwidth)?),
        };
        Ok(Self::assemble(model, classification, config))
    }

    /// Force a lattice model; fails when no lattice fits the observations.
    pub fn discrete(samples: &[T], config: EmpiricalConfig) -> Result<Self> {
        config.validate()?;
        let sample = to_sample(samples)?;
        let tolerance = config.classifier.tolerance;
        let lattice = detect_lattice(&sample.unique_values(), tolerance).ok_or_else(|| {
            EmpiricalError::invalid(
                "samples",
                format!("{} observations", sample.len()),
                "no lattice fits the observations",
            )
        })?;
        let model = EmpiricalModel::Discrete(DiscreteEmpirical::new(sample, lattice, tolerance));
        Ok(Self::assemble(model, Classification::discrete(lattice), config))
    }

    /// Force a kernel density model, even for lattice-valued data.
    pub fn continuous(samples: &[T], config: EmpiricalConfig) -> Result<Self> {
        config.validate()?;
        let model = EmpiricalModel::Continuous(ContinuousEmpirical::new(
            to_sample(samples)?,
            config.bandwidth,
        )?);
        Ok(Self::assemble(model, Classification::continuous(), config))
    }

    fn assemble(
        model: EmpiricalModel,
        classification: Classification,
        config: EmpiricalConfig,
    ) -> Self {
        debug!(
            "built {} empirical model from {} observations",
            model.kind_name(),
            model.sample().len()
        );
        Self {
            model,
            classification,
            config,
            _precision: PhantomData,
        }
    }

    pub fn model(&self) -> &EmpiricalModel {
        &self.model
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn config(&self) -> &EmpiricalConfig {
        &self.config
    }

    pub fn sample(&self) -> &Sample {
        self.model.sample()
    }

    pub fn len(&self) -> usize {
        self.sample().len()
    }

    /// Always false: construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_discrete(&self) -> bool {
        self.classification.is_discrete()
    }

    pub fn lattice_step(&self) -> Option<T> {
        self.classification.lattice_step().map(T::from_canonical)
    }

    pub fn lattice_origin(&self) -> Option<T> {
        self.classification.lattice_origin().map(T::from_canonical)
    }

    pub fn pdf(&self, x: T) -> T {
        T::from_canonical(self.model.pdf(x.to_canonical()))
    }

    pub fn cdf(&self, x: T) -> T {
        T::from_canonical(self.model.cdf(x.to_canonical()))
    }

    pub fn sf(&self, x: T) -> T {
        T::from_canonical(self.model.sf(x.to_canonical()))
    }

    /// `pdf / sf`; `+inf` where the survival function has reached zero.
    pub fn hazard(&self, x: T) -> T {
        T::from_canonical(self.model.hazard(x.to_canonical()))
    }

    /// `-ln sf`; `+inf` where the survival function has reached zero.
    pub fn chf(&self, x: T) -> T {
        T::from_canonical(self.model.chf(x.to_canonical()))
    }

    pub fn quantile(&self, p: T) -> Result<T> {
        self.model.quantile(p.to_canonical()).map(T::from_canonical)
    }

    pub fn quantile_complement(&self, q: T) -> Result<T> {
        self.model
            .quantile_complement(q.to_canonical())
            .map(T::from_canonical)
    }

    pub fn mean(&self) -> T {
        T::from_canonical(self.model.mean())
    }

    pub fn mode(&self) -> T {
        T::from_canonical(self.model.mode())
    }

    pub fn median(&self) -> T {
        T::from_canonical(self.model.median())
    }

    /// Higher moments are not estimated by the nonparametric models.
    pub fn variance(&self) -> Option<T> {
        None
    }

    pub fn skewness(&self) -> Option<T> {
        None
    }

    pub fn kurtosis(&self) -> Option<T> {
        None
    }

    /// Interval outside which the model carries no (or negligible) mass.
    pub fn support(&self) -> (T, T) {
        let (lo, hi) = self.model.support();
        (T::from_canonical(lo), T::from_canonical(hi))
    }

    fn entropy_estimator(&self, kind: EstimatorKind) -> EntropyEstimator {
        EntropyEstimator::new(kind)
            .with_base(self.config.base)
            .with_integration_rule(self.config.integration)
    }

    fn divergence_estimator(&self, kind: EstimatorKind) -> DivergenceEstimator {
        DivergenceEstimator::new(kind)
            .with_base(self.config.base)
            .with_integration_rule(self.config.integration)
    }

    /// Entropy under the configured default estimator, or `None` if it cannot be computed.
    ///
    /// Failures such as too few observations for `Knn(k)` or a non-converging integral also
    /// give `None`; [`entropy_estimate`](Self::entropy_estimate) returns the error instead.
    pub fn entropy(&self) -> Option<T> {
        self.entropy_estimator(self.config.default_estimator)
            .point(&self.model)
            .inspect_err(|err| debug!("entropy unavailable: {err}"))
            .ok()
            .map(T::from_canonical)
    }

    /// Entropy with a percentile bootstrap interval when `bootstrap_samples > 0`.
    pub fn entropy_estimate(
        &self,
        kind: EstimatorKind,
        bootstrap_samples: usize,
        confidence_level: f64,
    ) -> Result<EntropyEstimate<T>> {
        let bootstrap = BootstrapConfig::default()
            .with_resamples(bootstrap_samples)
            .with_confidence_level(confidence_level);
        self.entropy_estimate_with(kind, &bootstrap)
    }

    /// Like [`entropy_estimate`](Self::entropy_estimate) with full bootstrap control.
    pub fn entropy_estimate_with(
        &self,
        kind: EstimatorKind,
        bootstrap: &BootstrapConfig,
    ) -> Result<EntropyEstimate<T>> {
        self.entropy_estimator(kind).estimate(&self.model, bootstrap)
    }

    /// KL(self || relative_to), or `None` if it cannot be computed.
    ///
    /// `None` covers mixed model kinds as well as too few observations and non-converging
    /// integrals; [`kl_divergence_estimate`](Self::kl_divergence_estimate) tells them apart.
    pub fn kl_divergence(&self, relative_to: &Empirical<T>, kind: EstimatorKind) -> Option<T> {
        self.divergence_estimator(kind)
            .kl_divergence(&self.model, &relative_to.model)
            .map(T::from_canonical)
    }

    /// KL(self || relative_to) with a bootstrap interval over resamples of `self`.
    ///
    /// Unlike [`kl_divergence`](Self::kl_divergence) this reports why no value is available,
    /// including `MismatchedSupport` for a discrete model compared with a continuous one.
    pub fn kl_divergence_estimate(
        &self,
        relative_to: &Empirical<T>,
        kind: EstimatorKind,
        bootstrap_samples: usize,
        confidence_level: f64,
    ) -> Result<EntropyEstimate<T>> {
        let bootstrap = BootstrapConfig::default()
            .with_resamples(bootstrap_samples)
            .with_confidence_level(confidence_level);
        self.kl_divergence_estimate_with(relative_to, kind, &bootstrap)
    }

    pub fn kl_divergence_estimate_with(
        &self,
        relative_to: &Empirical<T>,
        kind: EstimatorKind,
        bootstrap: &BootstrapConfig,
    ) -> Result<EntropyEstimate<T>> {
        self.divergence_estimator(kind)
            .estimate(&self.model, &relative_to.model, bootstrap)
    }

    pub fn is_likely_multimodal(&self) -> bool {
        self.config.multimodality.is_likely_multimodal(self.sample())
    }

    /// Per-observation information content `-ln p(x_i)` under the fitted model, in nats.
    pub fn local_entropy_values(&self) -> Array1<f64> {
        match &self.model {
            EmpiricalModel::Discrete(m) => m.local_values(),
            EmpiricalModel::Continuous(m) => m.local_values(),
        }
    }
}

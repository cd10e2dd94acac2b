//! The session controller: an explicit context object owning the base
//! sample, the bootstrap accumulator and the RNG.
//!
//! Every operation runs to completion before returning. Operations that
//! fail leave the session exactly as it was.

use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::accumulator::BootstrapAccumulator;
use crate::config::SessionConfig;
use crate::distributions::{generate_sample, Distribution};
use crate::error::{BootstrapError, Result};
use crate::histogram::{histogram_with_decimals, Histogram};
use crate::random;
use crate::resample::{self, BootstrapStep, StatisticKind};
use crate::summary::{self, SampleSummary, SummaryRecord};

/// Resample count below which bootstrap output is still noisy.
pub const FEW_RESAMPLES: usize = 30;

/// Resample count from which bootstrap distributions are considered stable.
pub const MANY_RESAMPLES: usize = 200;

/// Where the user is in the demonstration, derived from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guidance {
    NoSample,
    NoResamples,
    FewResamples,
    Stabilizing,
    Converged,
}

impl Guidance {
    /// Classifies a session by sample presence and resample count.
    pub fn classify(has_sample: bool, resamples: usize) -> Self {
        match (has_sample, resamples) {
            (false, _) => Guidance::NoSample,
            (true, 0) => Guidance::NoResamples,
            (true, b) if b < FEW_RESAMPLES => Guidance::FewResamples,
            (true, b) if b < MANY_RESAMPLES => Guidance::Stabilizing,
            _ => Guidance::Converged,
        }
    }

    /// Explanation shown next to the results.
    pub fn message(&self) -> &'static str {
        match self {
            Guidance::NoSample => "Generate a sample to get started.",
            Guidance::NoResamples => {
                "Step or run resamples to build bootstrap distributions for the mean and variance."
            }
            Guidance::FewResamples => {
                "With few resamples, histograms are noisy and intervals can jump around."
            }
            Guidance::Stabilizing => {
                "As resamples increase, the bootstrap distributions stabilize and the percentile intervals become more consistent."
            }
            Guidance::Converged => {
                "With many resamples, compare percentile and normal-based intervals. Differences show more for skewed data (lognormal, gamma)."
            }
        }
    }
}

/// Everything a rendering layer needs, computed fresh from session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub distribution: Distribution,
    pub sample_size: usize,
    pub resamples: usize,
    pub sample_summary: Option<SampleSummary>,
    pub mean_summary: Option<SummaryRecord>,
    pub variance_summary: Option<SummaryRecord>,
    pub sample_histogram: Histogram,
    pub mean_histogram: Histogram,
    pub variance_histogram: Histogram,
    pub guidance: Guidance,
}

/// A bootstrap demonstration session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    rng: SmallRng,
    distribution: Distribution,
    sample: Vec<f64>,
    accumulator: BootstrapAccumulator,
    scratch: Vec<f64>,
}

impl Session {
    /// Creates an empty session (no sample, no resamples).
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] if `config` is invalid.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Default configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(SessionConfig::default().with_seed(seed))
    }

    /// Builds the session; `config` must already have passed validation.
    fn from_valid_config(config: SessionConfig) -> Self {
        let seed = config.seed.unwrap_or_else(random::entropy_seed);
        debug!(seed, distribution = %config.distribution, "session created");
        Self {
            distribution: config.distribution,
            config,
            rng: random::create_rng(seed),
            sample: Vec::new(),
            accumulator: BootstrapAccumulator::new(),
            scratch: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Distribution of the current sample.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// The current base sample.
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    pub fn accumulator(&self) -> &BootstrapAccumulator {
        &self.accumulator
    }

    /// Completed bootstrap steps since the last reset or regeneration.
    pub fn resample_count(&self) -> usize {
        self.accumulator.len()
    }

    /// Replaces the base sample with `n` fresh draws and clears the
    /// bootstrap sequences.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] if the distribution is
    /// invalid or `n` exceeds `max_sample_size`; the session is unchanged.
    pub fn generate_sample(&mut self, distribution: Distribution, n: usize) -> Result<&[f64]> {
        if n > self.config.max_sample_size {
            return Err(BootstrapError::InvalidParameter(format!(
                "sample size {n} exceeds maximum {}",
                self.config.max_sample_size
            )));
        }
        let sample = generate_sample(distribution, n, &mut self.rng)?;
        self.sample = sample;
        self.distribution = distribution;
        self.accumulator.reset();
        debug!(n, distribution = %distribution, "generated base sample");
        Ok(&self.sample)
    }

    /// Generates a sample with the configured distribution and size.
    pub fn generate_configured(&mut self) -> Result<&[f64]> {
        self.generate_sample(self.config.distribution, self.config.sample_size)
    }

    /// Clears both bootstrap sequences together.
    pub fn reset_bootstrap(&mut self) {
        self.accumulator.reset();
        debug!("bootstrap reset");
    }

    /// Draws one resample, appends its mean and variance, and returns them.
    ///
    /// # Errors
    /// Returns [`BootstrapError::EmptySample`] without touching the
    /// accumulator if there is no sample.
    pub fn bootstrap_step(&mut self) -> Result<BootstrapStep> {
        let step = resample::bootstrap_step_with(&self.sample, &mut self.scratch, &mut self.rng)?;
        self.accumulator.append(step);
        trace!(
            b = self.accumulator.len(),
            mean = step.mean,
            variance = step.variance,
            "bootstrap step"
        );
        Ok(step)
    }

    /// Performs `k` bootstrap steps and returns how many ran.
    ///
    /// # Errors
    /// Returns [`BootstrapError::EmptySample`] before any step if there is
    /// no sample (and `k > 0`).
    pub fn run_many(&mut self, k: usize) -> Result<usize> {
        if k == 0 {
            return Ok(0);
        }
        if self.sample.is_empty() {
            return Err(BootstrapError::EmptySample);
        }
        for _ in 0..k {
            self.bootstrap_step()?;
        }
        debug!(k, total = self.accumulator.len(), "ran bootstrap batch");
        Ok(k)
    }

    /// Runs the configured number of resamples.
    pub fn run_configured(&mut self) -> Result<usize> {
        self.run_many(self.config.resamples_per_run)
    }

    /// Analytic summary of the base sample.
    ///
    /// # Errors
    /// Returns [`BootstrapError::EmptySample`] if there is no sample.
    pub fn summarize_sample(&self) -> Result<SampleSummary> {
        summary::summarize_sample(&self.sample)
    }

    /// Summary of one bootstrap statistic sequence.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InsufficientData`] if no steps have run.
    pub fn summarize_bootstrap(&self, kind: StatisticKind) -> Result<SummaryRecord> {
        summary::summarize_replicates(
            self.accumulator.sequence(kind),
            self.config.percentile_low,
            self.config.percentile_high,
        )
    }

    /// Histogram of the base sample.
    pub fn sample_histogram(&self) -> Result<Histogram> {
        self.histogram_of(&self.sample)
    }

    /// Histogram of one bootstrap statistic sequence.
    pub fn bootstrap_histogram(&self, kind: StatisticKind) -> Result<Histogram> {
        self.histogram_of(self.accumulator.sequence(kind))
    }

    fn histogram_of(&self, values: &[f64]) -> Result<Histogram> {
        histogram_with_decimals(values, self.config.num_bins, self.config.label_decimals)
    }

    pub fn guidance(&self) -> Guidance {
        Guidance::classify(!self.sample.is_empty(), self.accumulator.len())
    }

    /// Snapshot of everything displayable.
    ///
    /// Summaries that cannot be computed yet are `None`.
    pub fn view(&self) -> Result<SessionView> {
        Ok(SessionView {
            distribution: self.distribution,
            sample_size: self.sample.len(),
            resamples: self.accumulator.len(),
            sample_summary: self.summarize_sample().ok(),
            mean_summary: self.summarize_bootstrap(StatisticKind::Mean).ok(),
            variance_summary: self.summarize_bootstrap(StatisticKind::Variance).ok(),
            sample_histogram: self.sample_histogram()?,
            mean_histogram: self.bootstrap_histogram(StatisticKind::Mean)?,
            variance_histogram: self.bootstrap_histogram(StatisticKind::Variance)?,
            guidance: self.guidance(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: usize) -> Session {
        let mut s = Session::with_seed(42);
        s.generate_sample(Distribution::Normal, n).unwrap();
        s
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = Session::with_seed(1);
        assert!(s.sample().is_empty());
        assert_eq!(s.resample_count(), 0);
        assert_eq!(s.guidance(), Guidance::NoSample);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Session::new(SessionConfig::default().with_bins(0)).is_err());
        assert!(Session::new(SessionConfig::default().with_label_decimals(70_000)).is_err());
    }

    #[test]
    fn test_generate_resets_bootstrap() {
        let mut s = seeded(20);
        s.run_many(15).unwrap();
        assert_eq!(s.resample_count(), 15);
        s.generate_sample(Distribution::Gamma, 10).unwrap();
        assert_eq!(s.sample().len(), 10);
        assert_eq!(s.resample_count(), 0);
        assert_eq!(s.distribution(), Distribution::Gamma);
    }

    #[test]
    fn test_failed_generate_keeps_state() {
        let mut s = seeded(20);
        s.run_many(5).unwrap();
        let before = s.sample().to_vec();
        let bad = Distribution::HeavyTailed { df: 0.0 };
        assert!(s.generate_sample(bad, 10).is_err());
        assert!(s.generate_sample(Distribution::Normal, 1_000_000).is_err());
        assert_eq!(s.sample(), before.as_slice());
        assert_eq!(s.resample_count(), 5);
        assert_eq!(s.distribution(), Distribution::Normal);
    }

    #[test]
    fn test_generate_zero_is_valid() {
        let mut s = Session::with_seed(3);
        assert!(s.generate_sample(Distribution::Normal, 0).unwrap().is_empty());
        assert_eq!(s.guidance(), Guidance::NoSample);
    }

    #[test]
    fn test_step_on_empty_sample() {
        let mut s = Session::with_seed(3);
        assert_eq!(s.bootstrap_step(), Err(BootstrapError::EmptySample));
        assert_eq!(s.resample_count(), 0);
        assert_eq!(s.run_many(10), Err(BootstrapError::EmptySample));
        assert_eq!(s.run_many(0), Ok(0));
    }

    #[test]
    fn test_step_appends_both_sequences() {
        let mut s = seeded(25);
        let step = s.bootstrap_step().unwrap();
        let acc = s.accumulator();
        assert_eq!(acc.sequence(StatisticKind::Mean), &[step.mean]);
        assert_eq!(acc.sequence(StatisticKind::Variance), &[step.variance]);
    }

    #[test]
    fn test_run_many_counts() {
        let mut s = seeded(25);
        assert_eq!(s.run_many(40).unwrap(), 40);
        assert_eq!(s.run_configured().unwrap(), 100);
        assert_eq!(s.resample_count(), 140);
        for kind in StatisticKind::ALL {
            assert_eq!(s.accumulator().sequence(kind).len(), 140);
        }
    }

    #[test]
    fn test_reset_then_summaries_unavailable() {
        let mut s = seeded(25);
        s.run_many(50).unwrap();
        s.reset_bootstrap();
        for kind in StatisticKind::ALL {
            assert!(s.accumulator().sequence(kind).is_empty());
            assert!(matches!(
                s.summarize_bootstrap(kind),
                Err(BootstrapError::InsufficientData { .. })
            ));
        }
        assert_eq!(s.guidance(), Guidance::NoResamples);
    }

    #[test]
    fn test_summaries_are_repeatable() {
        let mut s = seeded(30);
        s.run_many(60).unwrap();
        let a = s.summarize_bootstrap(StatisticKind::Mean).unwrap();
        let b = s.summarize_bootstrap(StatisticKind::Mean).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.count, 60);
    }

    #[test]
    fn test_summarize_sample_empty() {
        let s = Session::with_seed(3);
        assert_eq!(s.summarize_sample(), Err(BootstrapError::EmptySample));
    }

    #[test]
    fn test_guidance_stages() {
        assert_eq!(Guidance::classify(false, 500), Guidance::NoSample);
        assert_eq!(Guidance::classify(true, 0), Guidance::NoResamples);
        assert_eq!(Guidance::classify(true, 29), Guidance::FewResamples);
        assert_eq!(Guidance::classify(true, 30), Guidance::Stabilizing);
        assert_eq!(Guidance::classify(true, 199), Guidance::Stabilizing);
        assert_eq!(Guidance::classify(true, 200), Guidance::Converged);
        assert!(!Guidance::Converged.message().is_empty());
    }

    #[test]
    fn test_view_before_and_after() {
        let s = Session::with_seed(8);
        let v = s.view().unwrap();
        assert!(v.sample_summary.is_none());
        assert!(v.mean_summary.is_none());
        assert!(v.sample_histogram.is_empty());

        let mut s = seeded(40);
        s.run_many(30).unwrap();
        let v = s.view().unwrap();
        assert_eq!(v.sample_size, 40);
        assert_eq!(v.resamples, 30);
        assert!(v.sample_summary.is_some());
        assert!(v.variance_summary.is_some());
        assert_eq!(v.sample_histogram.total(), 40);
        assert_eq!(v.mean_histogram.total(), 30);
        assert_eq!(v.guidance, Guidance::Stabilizing);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut s = Session::with_seed(123);
            s.generate_sample(Distribution::LogNormal, 30).unwrap();
            s.run_many(20).unwrap();
            s.accumulator().clone()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_with_seed_matches_new() {
        let mut a = Session::with_seed(9);
        let mut b = Session::new(SessionConfig::default().with_seed(9)).unwrap();
        assert_eq!(a.config(), b.config());
        a.generate_sample(Distribution::Gamma, 25).unwrap();
        b.generate_sample(Distribution::Gamma, 25).unwrap();
        a.run_many(15).unwrap();
        b.run_many(15).unwrap();
        assert_eq!(a.sample(), b.sample());
        assert_eq!(a.accumulator(), b.accumulator());
    }
}

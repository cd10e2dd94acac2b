//! Session configuration.
//!
//! Mirrors the user-facing controls of the demonstrator: sample size,
//! distribution, how many resamples a "run" performs, and the auto-run
//! period, plus display settings for histograms and intervals.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distributions::Distribution;
use crate::error::{BootstrapError, Result};
use crate::histogram::{self, DEFAULT_BINS, DEFAULT_DECIMALS};
use crate::summary::{self, DEFAULT_HIGH, DEFAULT_LOW};

/// Configuration for a [`Session`](crate::session::Session).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use bootstrap_lab::config::SessionConfig;
/// let cfg = SessionConfig::from_json(r#"{"sample_size": 30, "distribution": "gamma"}"#).unwrap();
/// assert_eq!(cfg.sample_size, 30);
/// assert_eq!(cfg.num_bins, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // =========================================================================
    // Sample generation
    // =========================================================================
    /// Size of the generated base sample. Default: 50.
    pub sample_size: usize,

    /// Upper bound on `sample_size`, as enforced by the UI. Default: 1,000.
    pub max_sample_size: usize,

    /// Distribution of the base sample. Default: normal.
    pub distribution: Distribution,

    /// Fixed RNG seed; `None` seeds from entropy. Default: None.
    pub seed: Option<u64>,

    // =========================================================================
    // Bootstrap
    // =========================================================================
    /// Resamples performed by one "run" action. Default: 100.
    pub resamples_per_run: usize,

    /// Auto-run period in milliseconds. Default: 50.
    pub auto_interval_ms: u64,

    /// Lower percentile level for bootstrap intervals. Default: 0.025.
    pub percentile_low: f64,

    /// Upper percentile level for bootstrap intervals. Default: 0.975.
    pub percentile_high: f64,

    // =========================================================================
    // Display
    // =========================================================================
    /// Histogram bin count. Default: 20.
    pub num_bins: usize,

    /// Decimals in histogram labels, at most 17. Default: 3.
    pub label_decimals: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_size: 50,
            max_sample_size: 1_000,
            distribution: Distribution::Normal,
            seed: None,
            resamples_per_run: 100,
            auto_interval_ms: 50,
            percentile_low: DEFAULT_LOW,
            percentile_high: DEFAULT_HIGH,
            num_bins: DEFAULT_BINS,
            label_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl SessionConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] for malformed JSON or
    /// any value rejected by [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| BootstrapError::InvalidParameter(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks every field against its valid domain.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size > self.max_sample_size {
            return Err(BootstrapError::InvalidParameter(format!(
                "sample_size {} exceeds max_sample_size {}",
                self.sample_size, self.max_sample_size
            )));
        }
        if self.num_bins == 0 {
            return Err(BootstrapError::InvalidParameter(
                "num_bins must be at least 1".into(),
            ));
        }
        if self.auto_interval_ms == 0 {
            return Err(BootstrapError::InvalidParameter(
                "auto_interval_ms must be positive".into(),
            ));
        }
        histogram::check_decimals(self.label_decimals)?;
        summary::check_levels(self.percentile_low, self.percentile_high)?;
        self.distribution.validate()
    }

    /// Auto-run period as a [`Duration`].
    pub fn auto_interval(&self) -> Duration {
        Duration::from_millis(self.auto_interval_ms)
    }

    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_resamples_per_run(mut self, k: usize) -> Self {
        self.resamples_per_run = k;
        self
    }

    pub fn with_auto_interval(mut self, interval: Duration) -> Self {
        self.auto_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_percentiles(mut self, low: f64, high: f64) -> Self {
        self.percentile_low = low;
        self.percentile_high = high;
        self
    }

    pub fn with_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    pub fn with_label_decimals(mut self, decimals: usize) -> Self {
        self.label_decimals = decimals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_builder() {
        let cfg = SessionConfig::default()
            .with_sample_size(30)
            .with_distribution(Distribution::LogNormal)
            .with_seed(7)
            .with_auto_interval(Duration::from_millis(20));
        assert_eq!(cfg.sample_size, 30);
        assert_eq!(cfg.distribution, Distribution::LogNormal);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.auto_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_rejects_invalid() {
        let bad = [
            SessionConfig::default().with_sample_size(5_000),
            SessionConfig::default().with_bins(0),
            SessionConfig::default().with_label_decimals(18),
            SessionConfig::default().with_auto_interval(Duration::ZERO),
            SessionConfig::default().with_percentiles(0.9, 0.1),
            SessionConfig::default().with_percentiles(-0.1, 0.9),
            SessionConfig::default().with_distribution(Distribution::HeavyTailed { df: 1.0 }),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(BootstrapError::InvalidParameter(_))),
                "{cfg:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = SessionConfig::from_json(
            r#"{"distribution": {"heavy-tailed": {"df": 4.0}}, "seed": 99}"#,
        )
        .unwrap();
        assert_eq!(cfg.distribution, Distribution::HeavyTailed { df: 4.0 });
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.sample_size, 50);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(SessionConfig::from_json("{not json").is_err());
        assert!(SessionConfig::from_json(r#"{"distribution": "cauchy"}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"num_bins": 0}"#).is_err());
        assert!(matches!(
            SessionConfig::from_json(r#"{"label_decimals": 70000, "seed": 1}"#),
            Err(BootstrapError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_label_decimals_bound() {
        SessionConfig::default()
            .with_label_decimals(17)
            .validate()
            .unwrap();
        assert!(SessionConfig::default()
            .with_label_decimals(18)
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = SessionConfig::default().with_seed(1);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), cfg);
    }
}

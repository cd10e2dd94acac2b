//! Point and interval estimates for the base sample and bootstrap sequences.
//!
//! Two interval constructions are provided:
//!
//! - **Normal approximation**: a point estimate ± [`Z_95`] standard errors.
//!   Uses the fixed z-value 1.96, not a quantile computed from a
//!   significance level.
//! - **Percentile**: nearest-rank empirical quantiles of a sequence of
//!   replicate statistics. The rank is `floor(level · (n − 1))` on the
//!   ascending sort, with no interpolation.
//!
//! Base-sample summaries ([`SampleSummary`]) are analytic and never carry a
//! percentile interval. Sequence summaries ([`SummaryRecord`]) carry both.
//!
//! Every function here is pure: the same input always yields bit-identical
//! output.

use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};
use crate::stats;

/// z-value for a ~95% two-sided normal interval.
pub const Z_95: f64 = 1.96;

/// Default lower percentile level.
pub const DEFAULT_LOW: f64 = 0.025;

/// Default upper percentile level.
pub const DEFAULT_HIGH: f64 = 0.975;

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Interval from its bounds, taken as given.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Interval collapsed onto a single value.
    pub fn degenerate(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Symmetric interval `center ± z · se`.
    pub fn around(center: f64, se: f64) -> Self {
        Self::new(center - Z_95 * se, center + Z_95 * se)
    }

    /// Distance `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Centre of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Whether `x` lies in the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Summary of a sequence of values (typically bootstrap replicates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Length of the summarized sequence.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`0` when `count < 2`).
    pub std_dev: f64,
    pub normal_interval: Interval,
    pub percentile_interval: Interval,
}

/// Analytic summary of the base sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// Standard error of the mean, `sd / √n`.
    pub standard_error: f64,
    /// Wald interval for the mean.
    pub mean_interval: Interval,
    /// Wald interval for the variance; degenerate when `n < 2`.
    pub variance_interval: Interval,
}

fn require_data(data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(BootstrapError::InsufficientData {
            needed: 1,
            actual: 0,
        });
    }
    Ok(())
}

fn check_level(level: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&level) {
        return Err(BootstrapError::InvalidParameter(format!(
            "percentile level must be in [0, 1], got {level}"
        )));
    }
    Ok(())
}

/// Validates a `(low, high)` percentile level pair.
pub fn check_levels(low: f64, high: f64) -> Result<()> {
    check_level(low)?;
    check_level(high)?;
    if low > high {
        return Err(BootstrapError::InvalidParameter(format!(
            "percentile levels out of order: low={low} > high={high}"
        )));
    }
    Ok(())
}

/// Nearest-rank percentile interval of `sequence` at `(low, high)`.
///
/// Sorts ascending and returns the values at `floor(low · (n − 1))` and
/// `floor(high · (n − 1))`.
///
/// # Errors
/// - [`BootstrapError::InsufficientData`] if `sequence` is empty.
/// - [`BootstrapError::InvalidParameter`] if a level is outside `[0, 1]`
///   or `low > high`.
///
/// # Examples
/// ```
/// use bootstrap_lab::summary::percentile_interval;
/// let ci = percentile_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.025, 0.975).unwrap();
/// assert_eq!((ci.lower, ci.upper), (1.0, 4.0));
/// ```
pub fn percentile_interval(sequence: &[f64], low: f64, high: f64) -> Result<Interval> {
    check_levels(low, high)?;
    require_data(sequence)?;
    let sorted = stats::sorted(sequence);
    Ok(Interval::new(
        nearest_rank(&sorted, low),
        nearest_rank(&sorted, high),
    ))
}

fn nearest_rank(sorted: &[f64], level: f64) -> f64 {
    let last = sorted.len() - 1;
    let idx = (level * last as f64).floor() as usize;
    sorted[idx.min(last)]
}

/// Wald interval for the mean: `mean ± 1.96 · sd / √n`.
///
/// A single value yields the degenerate interval at that value.
///
/// # Errors
/// Returns [`BootstrapError::InsufficientData`] if `data` is empty.
pub fn mean_normal_interval(data: &[f64]) -> Result<Interval> {
    require_data(data)?;
    let n = data.len() as f64;
    let m = stats::kahan_sum(data) / n;
    Ok(Interval::around(m, stats::std_dev(data) / n.sqrt()))
}

/// Wald interval for the sample variance: `s² ± 1.96 · s² · √(2 / (n − 1))`.
///
/// With `n < 2` the variance is `0` and the interval is degenerate at `0`.
///
/// # Errors
/// Returns [`BootstrapError::InsufficientData`] if `data` is empty.
pub fn variance_normal_interval(data: &[f64]) -> Result<Interval> {
    require_data(data)?;
    let n = data.len();
    let variance = stats::sample_variance(data);
    if n < 2 {
        return Ok(Interval::degenerate(variance));
    }
    let se = variance * (2.0 / (n - 1) as f64).sqrt();
    Ok(Interval::around(variance, se))
}

/// Summarizes a sequence with the Wald interval for its mean and the
/// default percentile interval.
///
/// # Errors
/// Returns [`BootstrapError::InsufficientData`] if `sequence` is empty.
///
/// # Examples
/// ```
/// use bootstrap_lab::summary::summarize;
/// let s = summarize(&[2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(s.count, 3);
/// assert_eq!(s.mean, 4.0);
/// assert!(s.normal_interval.contains(4.0));
/// ```
pub fn summarize(sequence: &[f64]) -> Result<SummaryRecord> {
    let normal_interval = mean_normal_interval(sequence)?;
    build_record(sequence, normal_interval, DEFAULT_LOW, DEFAULT_HIGH)
}

/// Summarizes a sequence of bootstrap replicates.
///
/// The standard deviation of the replicates estimates the standard error
/// of the statistic, so the normal interval is `mean ± 1.96 · sd` (no
/// `√n` division). The percentile interval uses `(low, high)`.
///
/// # Errors
/// - [`BootstrapError::InsufficientData`] if `sequence` is empty.
/// - [`BootstrapError::InvalidParameter`] for invalid levels.
pub fn summarize_replicates(sequence: &[f64], low: f64, high: f64) -> Result<SummaryRecord> {
    require_data(sequence)?;
    let center = stats::kahan_sum(sequence) / sequence.len() as f64;
    let normal_interval = Interval::around(center, stats::std_dev(sequence));
    build_record(sequence, normal_interval, low, high)
}

fn build_record(
    sequence: &[f64],
    normal_interval: Interval,
    low: f64,
    high: f64,
) -> Result<SummaryRecord> {
    let percentile_interval = percentile_interval(sequence, low, high)?;
    let mean = stats::mean(sequence).ok_or(BootstrapError::InsufficientData {
        needed: 1,
        actual: 0,
    })?;
    Ok(SummaryRecord {
        count: sequence.len(),
        mean,
        std_dev: stats::std_dev(sequence),
        normal_interval,
        percentile_interval,
    })
}

/// Analytic summary of a base sample.
///
/// # Errors
/// Returns [`BootstrapError::EmptySample`] if `sample` is empty.
pub fn summarize_sample(sample: &[f64]) -> Result<SampleSummary> {
    if sample.is_empty() {
        return Err(BootstrapError::EmptySample);
    }
    let n = sample.len();
    let variance = stats::sample_variance(sample);
    let std_dev = variance.sqrt();
    Ok(SampleSummary {
        n,
        mean: stats::kahan_sum(sample) / n as f64,
        variance,
        std_dev,
        standard_error: std_dev / (n as f64).sqrt(),
        mean_interval: mean_normal_interval(sample)?,
        variance_interval: variance_normal_interval(sample)?,
    })
}

// ============================================================================
// Tests
// ============================================================================

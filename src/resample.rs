//! Bootstrap resampling and the statistic engine.
//!
//! A bootstrap step draws one same-size resample with replacement from the
//! base sample and computes **both** tracked statistics from that single
//! resample, so each (mean, variance) pair describes the same draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};
use crate::stats;

/// A statistic tracked across bootstrap resamples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticKind {
    /// Arithmetic mean.
    Mean,
    /// Sample variance with denominator `n − 1`.
    Variance,
}

impl StatisticKind {
    /// Every tracked statistic, in display order.
    pub const ALL: [StatisticKind; 2] = [StatisticKind::Mean, StatisticKind::Variance];

    /// Lowercase label, as shown by `Display`.
    pub fn name(&self) -> &'static str {
        match self {
            StatisticKind::Mean => "mean",
            StatisticKind::Variance => "variance",
        }
    }
}

impl std::fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Statistics computed from one bootstrap resample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapStep {
    pub mean: f64,
    pub variance: f64,
}

impl BootstrapStep {
    /// Returns the value of the given statistic.
    pub fn get(&self, kind: StatisticKind) -> f64 {
        match kind {
            StatisticKind::Mean => self.mean,
            StatisticKind::Variance => self.variance,
        }
    }
}

/// Draws one bootstrap resample: `n` values picked uniformly with
/// replacement from `sample`.
///
/// # Errors
/// Returns [`BootstrapError::EmptySample`] if `sample` is empty.
///
/// # Examples
/// ```
/// use bootstrap_lab::resample::resample_once;
/// use bootstrap_lab::random::create_rng;
/// let sample = [1.0, 2.0, 3.0];
/// let r = resample_once(&sample, &mut create_rng(1)).unwrap();
/// assert_eq!(r.len(), 3);
/// assert!(r.iter().all(|x| sample.contains(x)));
/// ```
pub fn resample_once<R: Rng + ?Sized>(sample: &[f64], rng: &mut R) -> Result<Vec<f64>> {
    let mut buf = Vec::with_capacity(sample.len());
    resample_into(sample, &mut buf, rng)?;
    Ok(buf)
}

/// Like [`resample_once`], but writes into `buf`, reusing its allocation.
///
/// `buf` is cleared first. On error it is left unchanged.
pub fn resample_into<R: Rng + ?Sized>(
    sample: &[f64],
    buf: &mut Vec<f64>,
    rng: &mut R,
) -> Result<()> {
    let n = sample.len();
    if n == 0 {
        return Err(BootstrapError::EmptySample);
    }
    buf.clear();
    buf.extend((0..n).map(|_| sample[rng.random_range(0..n)]));
    Ok(())
}

/// Computes one statistic of a resample.
///
/// Variance of fewer than two values is defined as `0`.
///
/// # Errors
/// Returns [`BootstrapError::InsufficientData`] for the mean of an empty
/// slice.
pub fn compute_statistic(resample: &[f64], kind: StatisticKind) -> Result<f64> {
    match kind {
        StatisticKind::Mean => stats::mean(resample).ok_or(BootstrapError::InsufficientData {
            needed: 1,
            actual: 0,
        }),
        StatisticKind::Variance => Ok(stats::sample_variance(resample)),
    }
}

/// Performs one bootstrap step against `sample`.
///
/// Exactly one resample is drawn; mean and variance both come from it.
///
/// # Errors
/// Returns [`BootstrapError::EmptySample`] if `sample` is empty.
pub fn bootstrap_step<R: Rng + ?Sized>(sample: &[f64], rng: &mut R) -> Result<BootstrapStep> {
    let mut buf = Vec::with_capacity(sample.len());
    bootstrap_step_with(sample, &mut buf, rng)
}

/// [`bootstrap_step`] using `scratch` as the resample buffer.
pub(crate) fn bootstrap_step_with<R: Rng + ?Sized>(
    sample: &[f64],
    scratch: &mut Vec<f64>,
    rng: &mut R,
) -> Result<BootstrapStep> {
    resample_into(sample, scratch, rng)?;
    Ok(BootstrapStep {
        mean: compute_statistic(scratch, StatisticKind::Mean)?,
        variance: compute_statistic(scratch, StatisticKind::Variance)?,
    })
}

// ============================================================================
// Tests
// ============================================================================

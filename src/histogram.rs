//! Fixed-count histogram binning for display.
//!
//! A [`Histogram`] is a derived, read-only view: it is rebuilt from the
//! full input sequence on every call.
//!
//! # Binning rule
//!
//! The range `[min, max]` is split into `num_bins` equal-width bins. A value
//! `v` goes to bin `floor((v − min) / width)`; the maximum lands exactly on
//! `num_bins` and is clamped into the last bin. Counts therefore always sum
//! to the input length.

use serde::Serialize;

use crate::error::{BootstrapError, Result};
use crate::stats;

/// Default number of bins.
pub const DEFAULT_BINS: usize = 20;

/// Default number of decimals in bin labels.
pub const DEFAULT_DECIMALS: usize = 3;

/// Most decimals a label may carry; an f64 has no more significant digits.
pub const MAX_DECIMALS: usize = 17;

/// Bin labels and counts, ready for a bar chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    /// One label per bin, `"left – right"` (or the single value for a
    /// degenerate input).
    pub labels: Vec<String>,
    /// One count per bin, same length as `labels`.
    pub counts: Vec<usize>,
    /// Bin boundaries, `labels.len() + 1` values; `[v, v]` for the
    /// degenerate single bin.
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True for empty input.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bins `values` into `num_bins` bins with [`DEFAULT_DECIMALS`]-decimal labels.
///
/// # Examples
/// ```
/// use bootstrap_lab::histogram::histogram;
/// let h = histogram(&[5.0, 5.0, 5.0], 20).unwrap();
/// assert_eq!(h.labels, vec!["5.000".to_string()]);
/// assert_eq!(h.counts, vec![3]);
/// ```
pub fn histogram(values: &[f64], num_bins: usize) -> Result<Histogram> {
    histogram_with_decimals(values, num_bins, DEFAULT_DECIMALS)
}

/// Bins `values` into `num_bins` bins, labelling boundaries with
/// `decimals` decimal places.
///
/// - Empty input gives an empty histogram.
/// - If every value is equal, a single bin labelled with that value holds
///   all of them, whatever `num_bins` is.
///
/// # Errors
/// Returns [`BootstrapError::InvalidParameter`] if any value is not
/// finite, if `decimals > MAX_DECIMALS`, or if `num_bins == 0` for input
/// that needs binning.
pub fn histogram_with_decimals(
    values: &[f64],
    num_bins: usize,
    decimals: usize,
) -> Result<Histogram> {
    check_decimals(decimals)?;
    if values.is_empty() {
        return Ok(Histogram::default());
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(BootstrapError::InvalidParameter(
            "histogram values must be finite".into(),
        ));
    }
    let (lo, hi) = match (stats::min(values), stats::max(values)) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Ok(Histogram::default()),
    };

    if lo == hi {
        return Ok(Histogram {
            labels: vec![format!("{lo:.decimals$}")],
            counts: vec![values.len()],
            edges: vec![lo, hi],
        });
    }
    if num_bins == 0 {
        return Err(BootstrapError::InvalidParameter(
            "histogram needs at least one bin".into(),
        ));
    }

    // Work on half-scale values so `hi - lo` cannot overflow. Halving a
    // normal f64 is exact, so ordinary ranges bin as they would at full scale.
    let half_lo = lo / 2.0;
    let half_width = (hi / 2.0 - half_lo) / num_bins as f64;
    let edges: Vec<f64> = (0..=num_bins)
        .map(|i| 2.0 * (half_lo + i as f64 * half_width))
        .collect();
    let labels = edges
        .windows(2)
        .map(|w| format!("{:.decimals$} – {:.decimals$}", w[0], w[1]))
        .collect();

    let mut counts = vec![0usize; num_bins];
    for &v in values {
        counts[bin_index(v, half_lo, half_width, num_bins)] += 1;
    }

    Ok(Histogram {
        labels,
        counts,
        edges,
    })
}

/// Rejects label precisions `format!` cannot render.
pub fn check_decimals(decimals: usize) -> Result<()> {
    if decimals > MAX_DECIMALS {
        return Err(BootstrapError::InvalidParameter(format!(
            "label decimals must be at most {MAX_DECIMALS}, got {decimals}"
        )));
    }
    Ok(())
}

fn bin_index(v: f64, half_lo: f64, half_width: f64, num_bins: usize) -> usize {
    let idx = ((v / 2.0 - half_lo) / half_width).floor() as usize;
    idx.min(num_bins - 1)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let h = histogram(&[], 20).unwrap();
        assert!(h.labels.is_empty());
        assert!(h.counts.is_empty());
        assert!(h.is_empty());
    }

    #[test]
    fn test_degenerate_single_bin() {
        let h = histogram(&[5.0, 5.0, 5.0], 20).unwrap();
        assert_eq!(h.labels, vec!["5.000"]);
        assert_eq!(h.counts, vec![3]);
        assert_eq!(h.edges, vec![5.0, 5.0]);
    }

    #[test]
    fn test_degenerate_ignores_zero_bins() {
        let h = histogram(&[1.5], 0).unwrap();
        assert_eq!(h.counts, vec![1]);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        // min 1, max 4, width 0.75: 4 maps to index 4, clamped to 3
        let h = histogram(&[1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.counts, vec![1, 1, 1, 1]);
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn test_labels_format() {
        let h = histogram(&[1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(
            h.labels,
            vec![
                "1.000 – 1.750",
                "1.750 – 2.500",
                "2.500 – 3.250",
                "3.250 – 4.000"
            ]
        );
        assert_eq!(h.edges.len(), 5);
    }

    #[test]
    fn test_custom_decimals() {
        let h = histogram_with_decimals(&[0.0, 1.0], 2, 1).unwrap();
        assert_eq!(h.labels, vec!["0.0 – 0.5", "0.5 – 1.0"]);
        assert_eq!(h.counts, vec![1, 1]);
    }

    #[test]
    fn test_counts_sum_to_len() {
        let values: Vec<f64> = (0..1000).map(|i| (f64::from(i) * 0.37).sin()).collect();
        let h = histogram(&values, DEFAULT_BINS).unwrap();
        assert_eq!(h.len(), DEFAULT_BINS);
        assert_eq!(h.total(), values.len());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            histogram(&[1.0, f64::NAN], 5),
            Err(BootstrapError::InvalidParameter(_))
        ));
        assert!(histogram(&[1.0, f64::INFINITY], 5).is_err());
    }

    #[test]
    fn test_rejects_zero_bins() {
        assert!(matches!(
            histogram(&[1.0, 2.0], 0),
            Err(BootstrapError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_excessive_decimals() {
        assert!(matches!(
            histogram_with_decimals(&[1.0, 2.0], 4, 70_000),
            Err(BootstrapError::InvalidParameter(_))
        ));
        assert!(histogram_with_decimals(&[5.0], 4, MAX_DECIMALS + 1).is_err());
        assert!(histogram_with_decimals(&[], 4, MAX_DECIMALS + 1).is_err());
        let h = histogram_with_decimals(&[0.0, 1.0], 1, MAX_DECIMALS).unwrap();
        assert_eq!(h.counts, vec![2]);
    }

    #[test]
    fn test_range_wider_than_f64() {
        // hi - lo overflows to inf; binning must still place the maximum
        // in the last bin and keep every edge finite
        let h = histogram(&[-1e308, 0.0, 1e308], 4).unwrap();
        assert_eq!(h.counts, vec![1, 0, 1, 1]);
        assert_eq!(h.edges.first(), Some(&-1e308));
        assert_eq!(h.edges.last(), Some(&1e308));
        assert!(h.edges.iter().all(|e| e.is_finite()));
        assert!(h
            .labels
            .iter()
            .all(|l| !l.contains("NaN") && !l.contains("inf")));
    }

    #[test]
    fn test_pure() {
        let values = [0.5, 1.5, 1.5, 9.0, -2.0];
        assert_eq!(histogram(&values, 7).unwrap(), histogram(&values, 7).unwrap());
    }
}

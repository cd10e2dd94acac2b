//! Append-only storage for bootstrap statistic sequences.

use serde::Serialize;

use crate::resample::{BootstrapStep, StatisticKind};

/// One ordered sequence per tracked statistic.
///
/// Values are only ever appended as a full [`BootstrapStep`], so the mean
/// and variance sequences always have the same length: the number of
/// completed steps since the last reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BootstrapAccumulator {
    means: Vec<f64>,
    variances: Vec<f64>,
}

impl BootstrapAccumulator {
    /// Empty accumulator with no completed steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one step's statistics to their sequences. O(1) amortized.
    pub fn append(&mut self, step: BootstrapStep) {
        self.means.push(step.mean);
        self.variances.push(step.variance);
    }

    /// Clears every sequence in one operation.
    pub fn reset(&mut self) {
        self.means.clear();
        self.variances.clear();
    }

    /// Number of completed steps.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// True before the first step and after a reset.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// The accumulated values of one statistic, in step order.
    pub fn sequence(&self, kind: StatisticKind) -> &[f64] {
        match kind {
            StatisticKind::Mean => &self.means,
            StatisticKind::Variance => &self.variances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(mean: f64, variance: f64) -> BootstrapStep {
        BootstrapStep { mean, variance }
    }

    #[test]
    fn test_append_keeps_lengths_equal() {
        let mut acc = BootstrapAccumulator::new();
        assert!(acc.is_empty());
        acc.append(step(1.0, 0.5));
        acc.append(step(2.0, 0.25));
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.sequence(StatisticKind::Mean), &[1.0, 2.0]);
        assert_eq!(acc.sequence(StatisticKind::Variance), &[0.5, 0.25]);
    }

    #[test]
    fn test_reset_clears_all() {
        let mut acc = BootstrapAccumulator::new();
        for i in 0..10 {
            acc.append(step(f64::from(i), 1.0));
        }
        acc.reset();
        assert_eq!(acc.len(), 0);
        for kind in StatisticKind::ALL {
            assert!(acc.sequence(kind).is_empty());
        }
    }

    #[test]
    fn test_reset_when_empty() {
        let mut acc = BootstrapAccumulator::new();
        acc.reset();
        assert_eq!(acc, BootstrapAccumulator::default());
    }
}

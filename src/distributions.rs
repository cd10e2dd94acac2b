//! Synthetic-data distributions and their random variate generators.
//!
//! # Supported Distributions
//!
//! | Distribution | Generator | Mean | Variance |
//! |---|---|---|---|
//! | [`Distribution::Normal`] | Box–Muller | 0 | 1 |
//! | [`Distribution::LogNormal`] | exp(normal) | e^{1/2} | (e − 1)·e |
//! | [`Distribution::Gamma`] | sum of two Exp(2) | 4 | 8 |
//! | [`Distribution::HeavyTailed`] | normal / √(uniform) | 0 | undefined |
//!
//! # Simplifications
//!
//! The gamma generator only covers shape 2, scale 2: it is the sum of two
//! exponential draws, not a general gamma sampler.
//!
//! The heavy-tailed generator divides a normal draw by `sqrt(chi2 / df)`
//! where `chi2` is a crude stand-in `uniform(0, 1) · df`, **not** a
//! chi-squared variate. The result is symmetric with a heavy tail, which is
//! what the demonstration needs, but it is not a Student-t sample. It is
//! kept as is so seeded output stays reproducible.

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};
use crate::random::open_unit;

/// Shape of the fixed gamma family.
pub const GAMMA_SHAPE: f64 = 2.0;

/// Scale of the fixed gamma family.
pub const GAMMA_SCALE: f64 = 2.0;

/// Default degrees of freedom for the heavy-tailed family.
pub const DEFAULT_DF: f64 = 2.0;

/// Distribution family used to generate the base sample.
///
/// Exactly one family is active per session. Serialized names match the
/// [`FromStr`] names: `normal`, `lognormal`, `gamma`, `heavy-tailed`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    /// Standard normal N(0, 1).
    #[default]
    Normal,
    /// exp(N(0, 1)).
    #[serde(rename = "lognormal")]
    LogNormal,
    /// Gamma(shape = 2, scale = 2).
    Gamma,
    /// Heavy-tailed, t-like approximation with `df` degrees of freedom.
    HeavyTailed {
        /// Degrees of freedom; must be finite and at least 2.
        df: f64,
    },
}

impl Distribution {
    /// Heavy-tailed family with the default `df = 2`.
    pub const HEAVY_TAILED: Distribution = Distribution::HeavyTailed { df: DEFAULT_DF };

    /// Creates a heavy-tailed distribution, rejecting invalid `df`.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] if `df` is not finite
    /// or below 2.
    pub fn heavy_tailed(df: f64) -> Result<Self> {
        let d = Distribution::HeavyTailed { df };
        d.validate()?;
        Ok(d)
    }

    /// Checks that the family's parameters are in their valid domain.
    ///
    /// Only the heavy-tailed family is parameterized. Degrees of freedom
    /// must be finite and `>= 2`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Distribution::HeavyTailed { df } if !df.is_finite() || df < DEFAULT_DF => {
                Err(BootstrapError::InvalidParameter(format!(
                    "heavy-tailed requires finite df >= 2, got df={df}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Stable lowercase name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Normal => "normal",
            Distribution::LogNormal => "lognormal",
            Distribution::Gamma => "gamma",
            Distribution::HeavyTailed { .. } => "heavy-tailed",
        }
    }

    /// Population mean of the family, for comparison with bootstrap output.
    ///
    /// The heavy-tailed approximation is symmetric about zero, so its mean
    /// is `0` even though its variance is infinite.
    pub fn theoretical_mean(&self) -> Option<f64> {
        match self {
            Distribution::Normal => Some(0.0),
            Distribution::LogNormal => Some(E.sqrt()),
            Distribution::Gamma => Some(GAMMA_SHAPE * GAMMA_SCALE),
            Distribution::HeavyTailed { .. } => Some(0.0),
        }
    }

    /// Population variance of the family, or `None` when it does not exist.
    ///
    /// For the heavy-tailed approximation `E[1/U]` diverges, so the
    /// variance is undefined.
    pub fn theoretical_variance(&self) -> Option<f64> {
        match self {
            Distribution::Normal => Some(1.0),
            Distribution::LogNormal => Some((E - 1.0) * E),
            Distribution::Gamma => Some(GAMMA_SHAPE * GAMMA_SCALE * GAMMA_SCALE),
            Distribution::HeavyTailed { .. } => None,
        }
    }

    /// Draws one value from this family.
    ///
    /// Every call consumes fresh uniform randomness from `rng`.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] if the family's
    /// parameters are invalid. No sentinel value is ever returned.
    ///
    /// # Examples
    /// ```
    /// use bootstrap_lab::distributions::Distribution;
    /// use bootstrap_lab::random::create_rng;
    /// let mut rng = create_rng(42);
    /// let x = Distribution::Gamma.draw(&mut rng).unwrap();
    /// assert!(x > 0.0);
    /// assert!(Distribution::HeavyTailed { df: 1.0 }.draw(&mut rng).is_err());
    /// ```
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        self.validate()?;
        Ok(self.draw_unchecked(rng))
    }

    fn draw_unchecked<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Distribution::Normal => standard_normal(rng),
            Distribution::LogNormal => standard_normal(rng).exp(),
            Distribution::Gamma => gamma_shape_two(GAMMA_SCALE, rng),
            Distribution::HeavyTailed { df } => heavy_tailed_approx(df, rng),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Distribution::Normal),
            "lognormal" | "log-normal" => Ok(Distribution::LogNormal),
            "gamma" => Ok(Distribution::Gamma),
            "heavy-tailed" | "heavy_tailed" | "t" => Ok(Distribution::HEAVY_TAILED),
            _ => Err(BootstrapError::UnknownDistribution(s.to_string())),
        }
    }
}

/// Generates a base sample of `n` independent draws, in draw order.
///
/// `n = 0` yields an empty sample, which is a valid state.
///
/// # Errors
/// Returns [`BootstrapError::InvalidParameter`] before drawing anything if
/// the distribution's parameters are invalid.
///
/// # Examples
/// ```
/// use bootstrap_lab::distributions::{generate_sample, Distribution};
/// use bootstrap_lab::random::create_rng;
/// let mut rng = create_rng(42);
/// let s = generate_sample(Distribution::LogNormal, 25, &mut rng).unwrap();
/// assert_eq!(s.len(), 25);
/// assert!(s.iter().all(|&x| x > 0.0));
/// ```
pub fn generate_sample<R: Rng + ?Sized>(
    distribution: Distribution,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    distribution.validate()?;
    Ok((0..n).map(|_| distribution.draw_unchecked(rng)).collect())
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Standard normal draw via the Box–Muller transform.
///
/// `sqrt(−2·ln u) · cos(2π·v)` with `u, v` uniform on `(0, 1)`.
///
/// Reference: Box & Muller (1958), "A Note on the Generation of Random
/// Normal Deviates", *Ann. Math. Statist.* 29(2).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Exponential draw with the given scale, `−scale·ln u`.
pub fn exponential<R: Rng + ?Sized>(scale: f64, rng: &mut R) -> f64 {
    -scale * open_unit(rng).ln()
}

/// Gamma(shape = 2, scale) as the sum of two independent exponentials.
///
/// Only valid for shape 2.
pub fn gamma_shape_two<R: Rng + ?Sized>(scale: f64, rng: &mut R) -> f64 {
    let e1 = exponential(scale, rng);
    let e2 = exponential(scale, rng);
    e1 + e2
}

/// Heavy-tailed, t-like draw: `z / sqrt(chi2_approx / df)`.
///
/// `chi2_approx = uniform(0, 1) · df` is an illustrative stand-in, not a
/// chi-squared variate; the ratio reduces to `z / sqrt(u)`.
fn heavy_tailed_approx<R: Rng + ?Sized>(df: f64, rng: &mut R) -> f64 {
    let z = standard_normal(rng);
    let chi2_approx = open_unit(rng) * df;
    z / (chi2_approx / df).sqrt()
}

// ============================================================================
// Tests
// ============================================================================

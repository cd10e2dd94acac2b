//! # bootstrap-lab
//!
//! Numerical engine for an interactive demonstration of the statistical
//! bootstrap. Given a synthetic base sample, it repeatedly resamples with
//! replacement and tracks how the distributions of the resample mean and
//! variance converge.
//!
//! Rendering and UI wiring are left to the host; everything here produces
//! plain data (samples, summaries, histograms) that a chart layer consumes.
//!
//! ## Modules
//!
//! - [`distributions`]: Synthetic-data families and their generators
//! - [`random`]: Seeded RNG and uniform helpers
//! - [`stats`]: Descriptive statistics primitives
//! - [`resample`]: Bootstrap resampling and the statistic engine
//! - [`accumulator`]: Per-statistic bootstrap sequences
//! - [`summary`]: Point estimates, normal and percentile intervals
//! - [`histogram`]: Fixed-count binning for display
//! - [`config`]: Session configuration
//! - [`session`]: The session controller
//! - [`autorun`]: Timed, cancellable repeated stepping
//!
//! ## Example
//!
//! ```
//! use bootstrap_lab::distributions::Distribution;
//! use bootstrap_lab::resample::StatisticKind;
//! use bootstrap_lab::session::Session;
//!
//! let mut session = Session::with_seed(42);
//! session.generate_sample(Distribution::Gamma, 30).unwrap();
//! session.run_many(200).unwrap();
//!
//! let boot = session.summarize_bootstrap(StatisticKind::Mean).unwrap();
//! assert_eq!(boot.count, 200);
//! assert!(boot.percentile_interval.lower <= boot.percentile_interval.upper);
//! ```
//!
//! ## Simplifications
//!
//! Some generators are illustrative rather than exact samplers; see
//! [`distributions`].

pub mod accumulator;
pub mod autorun;
pub mod config;
pub mod distributions;
pub mod error;
pub mod histogram;
pub mod random;
pub mod resample;
pub mod session;
pub mod stats;
pub mod summary;

pub use error::{BootstrapError, Result};

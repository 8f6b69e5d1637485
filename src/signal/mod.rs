//! Signal processing module - resampling, band-pass filtering, and scoring
//!
//! The burst path is: raw samples → [`resample_uniform`] →
//! [`BandPass::filtfilt`] → [`scoring`]. Every step is pure and
//! allocation-bounded; degraded inputs produce empty signals rather than
//! errors so the pipeline can fall back to a zero score.

mod filter;
mod resample;
pub mod scoring;

pub use filter::{BandPass, Biquad};
pub use resample::{resample_uniform, ResampledSignal};

use thiserror::Error;

/// Errors in signal preparation.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("sample timestamps are not monotonically non-decreasing")]
    NonMonotonicTimestamps,
}

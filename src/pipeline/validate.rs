//! Submission validation
//!
//! The only stage that can reject a submission. Everything past validation
//! degrades instead of failing, so the checks here are exactly the ones
//! with no sensible fallback.

use thiserror::Error;

use crate::signal::SignalError;
use crate::types::Submission;

/// Structural rejection of a submission. No partial result is produced.
#[derive(Error, Debug)]
pub enum InvalidInput {
    #[error("device_id is empty")]
    EmptyDeviceId,

    #[error("samples array is empty")]
    EmptySamples,

    #[error("sample timestamps are not monotonically non-decreasing")]
    NonMonotonicTimestamps,

    #[error("coordinates are not finite: lat={latitude}, lon={longitude}")]
    NonFiniteCoordinates { latitude: f64, longitude: f64 },

    #[error("reported speed is not finite: {speed_kmh}")]
    NonFiniteSpeed { speed_kmh: f64 },
}

impl From<SignalError> for InvalidInput {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::NonMonotonicTimestamps => Self::NonMonotonicTimestamps,
        }
    }
}

/// Check structural validity; all checks run in declaration order and the
/// first failure wins.
pub fn validate(submission: &Submission) -> Result<(), InvalidInput> {
    if submission.device_id.is_empty() {
        return Err(InvalidInput::EmptyDeviceId);
    }
    if !submission.latitude.is_finite() || !submission.longitude.is_finite() {
        return Err(InvalidInput::NonFiniteCoordinates {
            latitude: submission.latitude,
            longitude: submission.longitude,
        });
    }
    if !submission.speed_kmh.is_finite() {
        return Err(InvalidInput::NonFiniteSpeed {
            speed_kmh: submission.speed_kmh,
        });
    }
    if submission.samples.is_empty() {
        return Err(InvalidInput::EmptySamples);
    }
    if !submission.timestamps_monotonic() {
        return Err(InvalidInput::NonMonotonicTimestamps);
    }
    Ok(())
}

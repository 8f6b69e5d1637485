//! Uniform-rate resampling of irregular accelerometer bursts
//!
//! Phone accelerometers deliver nominally periodic samples with real jitter
//! (scheduler delays, sensor batching). The IIR filter downstream assumes a
//! uniform rate, so every burst is first linearly interpolated onto a
//! uniform grid.
//!
//! Target rate policy: derived from the observed mean inter-sample interval
//! and clamped to the configured `[min, max]` band. A burst that was
//! submitted as a flat array at a nominal rate has synthetic timestamps at
//! exactly that rate, so the derived rate reproduces it.

use tracing::warn;

use crate::config::defaults;
use crate::types::SensorSample;

use super::SignalError;

/// A uniformly sampled signal ready for filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSignal {
    /// Interpolated values on the uniform grid
    pub values: Vec<f64>,
    /// Grid rate (Hz)
    pub rate_hz: f64,
}

impl ResampledSignal {
    /// Signal with no usable samples; scores fall back to zero downstream.
    pub fn empty() -> Self {
        Self {
            values: Vec::new(),
            rate_hz: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Resample a burst onto a uniform grid by linear interpolation.
///
/// The grid starts at the first raw timestamp and has
/// `round(duration * rate)` points spaced `1 / rate` apart, where `rate` is
/// the observed mean rate clamped to `[min_rate_hz, max_rate_hz]`.
///
/// ## Edge cases
/// - Zero or one sample, or zero duration → empty signal (degraded, not an
///   error).
/// - Non-monotonic timestamps → [`SignalError::NonMonotonicTimestamps`].
/// - Observed rate below 2× the filter's upper passband edge → the rate is
///   kept (upsampling invents no information) and a warning is logged; the
///   filter clamps its own upper cutoff.
pub fn resample_uniform(
    samples: &[SensorSample],
    min_rate_hz: f64,
    max_rate_hz: f64,
) -> Result<ResampledSignal, SignalError> {
    if samples.len() < 2 {
        return Ok(ResampledSignal::empty());
    }
    if samples
        .windows(2)
        .any(|w| w[1].timestamp < w[0].timestamp)
    {
        return Err(SignalError::NonMonotonicTimestamps);
    }

    let t0 = samples[0].timestamp;
    let duration = samples[samples.len() - 1].timestamp - t0;
    if duration <= 0.0 {
        // All samples share one timestamp; there is no time axis to grid.
        return Ok(ResampledSignal::empty());
    }

    let observed_rate = (samples.len() - 1) as f64 / duration;
    let rate = observed_rate.clamp(min_rate_hz, max_rate_hz);
    if rate < defaults::FULL_BAND_MIN_RATE_HZ {
        warn!(
            observed_rate_hz = observed_rate,
            target_rate_hz = rate,
            required_rate_hz = defaults::FULL_BAND_MIN_RATE_HZ,
            "Burst rate too low for the full passband; upper cutoff will be clamped"
        );
    }

    let n_out = (duration * rate).round() as usize;
    if n_out == 0 {
        return Ok(ResampledSignal::empty());
    }

    let dt = 1.0 / rate;
    let mut values = Vec::with_capacity(n_out);
    let mut seg = 0usize;

    for i in 0..n_out {
        let t = t0 + i as f64 * dt;
        // Advance to the segment containing t; grid and raw times are both
        // non-decreasing so the cursor only moves forward.
        while seg + 2 < samples.len() && samples[seg + 1].timestamp < t {
            seg += 1;
        }
        let a = &samples[seg];
        let b = &samples[seg + 1];
        let span = b.timestamp - a.timestamp;
        let value = if span <= 0.0 {
            // Repeated timestamp; either endpoint is as good as the other.
            b.z_accel
        } else {
            let frac = ((t - a.timestamp) / span).clamp(0.0, 1.0);
            a.z_accel + (b.z_accel - a.z_accel) * frac
        };
        values.push(value);
    }

    Ok(ResampledSignal { values, rate_hz: rate })
}

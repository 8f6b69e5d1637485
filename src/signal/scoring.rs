//! Roughness scoring metrics
//!
//! All metrics run over the band-passed signal in double precision. RMS is
//! the persisted roughness score; VDV and crest factor are auxiliary
//! outputs. A NaN or Inf escaping any metric is clamped to 0.0 at this
//! boundary and logged as an error; a single corrupt sample must not take
//! down a submission.

use tracing::error;

/// Root mean square of the signal. Returns 0.0 for an empty signal.
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let mean_square = signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64;
    sanitize(mean_square.sqrt(), "rms")
}

/// Vibration Dose Value: `(Σ x⁴ · Δt)^(1/4)` over the burst window.
///
/// The fourth power weights impulsive events (potholes, joints) far more
/// heavily than RMS does. Returns 0.0 for an empty signal or a non-positive
/// rate.
pub fn vibration_dose_value(signal: &[f64], rate_hz: f64) -> f64 {
    if signal.is_empty() || rate_hz <= 0.0 {
        return 0.0;
    }
    let dt = 1.0 / rate_hz;
    let dose = signal.iter().map(|x| x.powi(4) * dt).sum::<f64>();
    sanitize(dose.powf(0.25), "vdv")
}

/// Peak-to-RMS ratio. Defined as 0.0 when the RMS is 0.
pub fn crest_factor(signal: &[f64], rms_value: f64) -> f64 {
    if signal.is_empty() || rms_value <= 0.0 {
        return 0.0;
    }
    let peak = signal.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    sanitize(peak / rms_value, "crest_factor")
}

/// Clamp a non-finite metric to 0.0, logging the anomaly.
///
/// Non-fatal: the pipeline completes and the persisted score is 0.0.
pub fn sanitize(value: f64, metric: &'static str) -> f64 {
    if value.is_finite() {
        value
    } else {
        error!(metric, value = %value, "Numeric anomaly clamped to 0.0");
        0.0
    }
}

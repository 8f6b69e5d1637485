//! System-wide default constants.
//!
//! Centralises the pipeline's fixed numeric configuration.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Band-pass filter
// ============================================================================

/// Lower passband edge (Hz). Sub-0.5 Hz content is body motion and GPS-grade
/// drift, not road texture.
pub const LOW_CUT_HZ: f64 = 0.5;

/// Upper passband edge (Hz). Road-induced chassis vibration lives well below
/// 50 Hz at survey speeds.
pub const HIGH_CUT_HZ: f64 = 50.0;

/// Butterworth order per passband edge (low-pass and high-pass cascades).
pub const FILTER_ORDER: usize = 4;

/// Fraction of the Nyquist frequency the upper cutoff is clamped to when the
/// burst's sample rate cannot support [`HIGH_CUT_HZ`].
pub const UPPER_CUTOFF_NYQUIST_FRACTION: f64 = 0.9;

// ============================================================================
// Resampler
// ============================================================================

/// Default floor for the derived resampling rate (Hz).
pub const MIN_TARGET_RATE_HZ: f64 = 4.0;

/// Default ceiling for the derived resampling rate (Hz).
///
/// Bounds the uniform-grid length against hostile timestamp spreads; no
/// phone accelerometer reports faster than this.
pub const MAX_TARGET_RATE_HZ: f64 = 500.0;

/// A burst whose rate falls below 2x the upper passband edge cannot
/// represent the full band; the filter clamps its upper cutoff instead.
pub const FULL_BAND_MIN_RATE_HZ: f64 = 2.0 * HIGH_CUT_HZ;

// ============================================================================
// Speed gate
// ============================================================================

/// Below this reported average speed (km/h) the roughness score is forced to
/// zero: a stationary or crawling device measures door slams and pocket
/// motion, not the road.
pub const MIN_SPEED_KMH: f64 = 7.0;

// ============================================================================
// Distance
// ============================================================================

/// Mean Earth radius (meters) for the haversine great-circle distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

//! Roadscore: road roughness scoring core
//!
//! Turns one burst of raw, irregularly-sampled Z-axis accelerometer
//! readings plus a GPS fix into a single road-roughness score.
//!
//! ## Architecture
//!
//! - **Signal path**: resample to a uniform rate, zero-phase Butterworth
//!   band-pass (0.5-50 Hz), score (RMS, VDV, crest factor)
//! - **Speed Gate**: scores below the motion threshold are forced to zero
//! - **Distance**: haversine from the device's previous fix, tracked in a
//!   sharded per-device store
//! - **Pipeline**: validation rejects, everything downstream degrades
//!
//! The crate has no I/O of its own; the HTTP and persistence layers live
//! upstream and downstream of [`RoughnessPipeline::process`].

pub mod config;
pub mod geo;
pub mod pipeline;
pub mod signal;
pub mod types;

// Re-export configuration
pub use config::PipelineConfig;

// Re-export commonly used types
pub use types::{RoughnessResult, SensorSample, Submission};

// Re-export the pipeline entry points
pub use pipeline::{InvalidInput, PipelineStage, RoughnessPipeline};

// Re-export the fix store for callers that pre-seed device state
pub use geo::{DeviceFix, DeviceFixStore};

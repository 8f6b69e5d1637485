//! Roughness Scoring Pipeline
//!
//! One submission flows through a fixed stage sequence:
//!
//! ```text
//! Validating -> Resampling -> Filtering -> Scoring -> Gating -> Finalizing -> Done
//!      |
//!      +-> Rejected (InvalidInput, no result produced)
//! ```
//!
//! Only validation can reject. Resampling, filtering and scoring degrade to
//! a zero score instead of aborting; the gate always runs; finalizing
//! merges the distance-from-previous-fix (independent of the signal path)
//! into the result. Every tracing event carries the stage it was emitted
//! from.

mod gate;
mod validate;

pub use gate::Scores;
pub use validate::{validate, InvalidInput};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{defaults, PipelineConfig};
use crate::geo::DeviceFixStore;
use crate::signal::{resample_uniform, scoring, BandPass};
use crate::types::{RoughnessResult, Submission};

/// Stage of the scoring pipeline, stamped on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Validating,
    Resampling,
    Filtering,
    Scoring,
    Gating,
    Finalizing,
    Done,
    Rejected,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Resampling => "resampling",
            Self::Filtering => "filtering",
            Self::Scoring => "scoring",
            Self::Gating => "gating",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// The scoring pipeline: stateless compute plus the shared per-device fix
/// store. One instance serves all submissions for the process lifetime;
/// `process` is safe to call from any thread.
#[derive(Debug)]
pub struct RoughnessPipeline {
    config: PipelineConfig,
    fixes: DeviceFixStore,
}

impl RoughnessPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            fixes: DeviceFixStore::new(),
        }
    }

    /// Pipeline with built-in default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Shared fix store, exposed for inspection.
    pub fn fixes(&self) -> &DeviceFixStore {
        &self.fixes
    }

    /// Score one submission.
    ///
    /// Returns `Err` only for structural rejection at validation; every
    /// other failure mode degrades to a zero score inside a completed
    /// result.
    pub fn process(&self, submission: &Submission) -> Result<RoughnessResult, InvalidInput> {
        // --- Validating ---
        if let Err(err) = validate(submission) {
            warn!(
                stage = %PipelineStage::Rejected,
                device_id = %submission.device_id,
                error = %err,
                "Submission rejected"
            );
            return Err(err);
        }

        let device_id = submission.device_id.as_str();

        // --- Resampling ---
        let resampled = resample_uniform(
            &submission.samples,
            self.config.min_target_rate_hz,
            self.config.max_target_rate_hz,
        )?;
        let mut degraded = false;
        if resampled.is_empty() {
            degraded = true;
            warn!(
                stage = %PipelineStage::Resampling,
                device_id,
                raw_samples = submission.samples.len(),
                "Burst too small to resample; score degrades to zero"
            );
        }

        // --- Filtering ---
        let filtered = if resampled.is_empty() {
            Vec::new()
        } else {
            match BandPass::design(defaults::LOW_CUT_HZ, defaults::HIGH_CUT_HZ, resampled.rate_hz)
            {
                Some(filter) => match filter.filtfilt(&resampled.values) {
                    Some(filtered) => filtered,
                    None => {
                        degraded = true;
                        warn!(
                            stage = %PipelineStage::Filtering,
                            device_id,
                            resampled_len = resampled.len(),
                            min_len = filter.min_input_len(),
                            "Signal shorter than filter padding; score degrades to zero"
                        );
                        Vec::new()
                    }
                },
                None => {
                    degraded = true;
                    warn!(
                        stage = %PipelineStage::Filtering,
                        device_id,
                        rate_hz = resampled.rate_hz,
                        "Sample rate cannot support the passband; score degrades to zero"
                    );
                    Vec::new()
                }
            }
        };

        // --- Scoring ---
        let roughness = scoring::rms(&filtered);
        let scores = Scores {
            roughness,
            vdv: scoring::vibration_dose_value(&filtered, resampled.rate_hz),
            crest_factor: scoring::crest_factor(&filtered, roughness),
        };

        // --- Gating ---
        let (scores, gated) = gate::apply(scores, submission.speed_kmh, self.config.min_speed_kmh);
        if gated {
            debug!(
                stage = %PipelineStage::Gating,
                device_id,
                speed_kmh = submission.speed_kmh,
                threshold_kmh = self.config.min_speed_kmh,
                "Speed below threshold; scores forced to zero"
            );
        }

        // --- Finalizing ---
        let distance_m = self
            .fixes
            .advance(device_id, submission.latitude, submission.longitude);

        let result = RoughnessResult {
            roughness: scores.roughness,
            vdv: scores.vdv,
            crest_factor: scores.crest_factor,
            distance_m,
            gated,
            degraded,
        };
        debug!(
            stage = %PipelineStage::Done,
            device_id,
            roughness = result.roughness,
            distance_m = result.distance_m,
            gated = result.gated,
            degraded = result.degraded,
            "Submission scored"
        );
        Ok(result)
    }

    /// Score a batch of submissions in parallel, preserving input order.
    ///
    /// The compute path is pure per submission; the fix store serialises
    /// per-device access on its own, so submissions for the same device in
    /// one batch race only on fix replacement order; callers that care
    /// about fix ordering should batch per device.
    pub fn process_batch(
        &self,
        submissions: &[Submission],
    ) -> Vec<Result<RoughnessResult, InvalidInput>> {
        submissions.par_iter().map(|s| self.process(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_burst(
        device: &str,
        speed_kmh: f64,
        freq_hz: f64,
        amplitude: f64,
        n: usize,
    ) -> Submission {
        let values: Vec<f64> = (0..n)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / 100.0).sin())
            .collect();
        Submission::from_waveform(device, 52.0, 5.0, speed_kmh, 0.0, &values, 100.0)
    }

    #[test]
    fn test_flat_signal_scores_zero_without_gating() {
        let pipeline = RoughnessPipeline::with_defaults();
        let submission =
            Submission::from_waveform("dev-1", 52.0, 5.0, 20.0, 0.0, &[0.0; 100], 100.0);
        let result = pipeline.process(&submission).unwrap();
        assert_eq!(result.roughness, 0.0);
        assert!(!result.gated);
        assert!(!result.degraded);
    }

    #[test]
    fn test_sine_burst_scores_near_a_over_sqrt2() {
        let pipeline = RoughnessPipeline::with_defaults();
        let result = pipeline
            .process(&sine_burst("dev-1", 20.0, 5.0, 2.0, 100))
            .unwrap();
        let expected = 2.0 / 2.0_f64.sqrt();
        assert!(
            (result.roughness - expected).abs() / expected < 0.10,
            "roughness was {}",
            result.roughness
        );
        assert!(!result.gated);
        assert!(result.crest_factor > 1.0);
        assert!(result.vdv > 0.0);
    }

    #[test]
    fn test_slow_submission_is_gated_to_zero() {
        let pipeline = RoughnessPipeline::with_defaults();
        let result = pipeline
            .process(&sine_burst("dev-1", 3.0, 5.0, 2.0, 100))
            .unwrap();
        assert!(result.gated);
        assert!(result.is_zero_score());
    }

    #[test]
    fn test_three_samples_degrade_but_complete() {
        let pipeline = RoughnessPipeline::with_defaults();
        let submission =
            Submission::from_waveform("dev-1", 52.0, 5.0, 20.0, 0.0, &[0.1, 0.4, 0.2], 100.0);
        let result = pipeline.process(&submission).unwrap();
        assert!(result.degraded);
        assert!(!result.gated);
        assert_eq!(result.roughness, 0.0);
    }

    #[test]
    fn test_empty_samples_rejected_without_result() {
        let pipeline = RoughnessPipeline::with_defaults();
        let submission = Submission::new("dev-1", 52.0, 5.0, 20.0, 0.0, Vec::new());
        assert!(matches!(
            pipeline.process(&submission),
            Err(InvalidInput::EmptySamples)
        ));
        // Rejection must not touch the fix store.
        assert!(pipeline.fixes().is_empty());
    }

    #[test]
    fn test_distance_accumulates_across_submissions() {
        let pipeline = RoughnessPipeline::with_defaults();
        let first = pipeline
            .process(&sine_burst("dev-1", 20.0, 5.0, 1.0, 100))
            .unwrap();
        assert_eq!(first.distance_m, 0.0);

        let mut moved = sine_burst("dev-1", 20.0, 5.0, 1.0, 100);
        moved.longitude = 5.1;
        let second = pipeline.process(&moved).unwrap();
        assert!(
            (second.distance_m - 6860.0).abs() / 6860.0 < 0.01,
            "distance was {}",
            second.distance_m
        );
    }

    #[test]
    fn test_gated_submission_still_updates_fix_store() {
        let pipeline = RoughnessPipeline::with_defaults();
        pipeline
            .process(&sine_burst("dev-1", 3.0, 5.0, 1.0, 100))
            .unwrap();
        assert!(pipeline.fixes().get("dev-1").is_some());
    }

    #[test]
    fn test_batch_preserves_order_and_results() {
        let pipeline = RoughnessPipeline::with_defaults();
        let submissions = vec![
            sine_burst("dev-1", 20.0, 5.0, 2.0, 100),
            sine_burst("dev-2", 3.0, 5.0, 2.0, 100),
            sine_burst("dev-3", 20.0, 5.0, 0.0, 100),
        ];
        let results = pipeline.process_batch(&submissions);
        assert_eq!(results.len(), 3);
        assert!(!results[0].as_ref().unwrap().gated);
        assert!(results[1].as_ref().unwrap().gated);
        assert_eq!(results[2].as_ref().unwrap().roughness, 0.0);
    }
}

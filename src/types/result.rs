//! Pipeline output types

use serde::{Deserialize, Serialize};

/// Scored result for one submission, handed to the persistence collaborator.
///
/// `roughness` and `distance_m` are the fields the storage layer persists;
/// `vdv` and `crest_factor` are auxiliary outputs the storage layer is free
/// to keep transient. Invariant: `gated == true` implies `roughness`, `vdv`
/// and `crest_factor` are all exactly 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoughnessResult {
    /// Band-passed RMS of vertical acceleration (m/s²), the roughness score
    pub roughness: f64,
    /// Vibration Dose Value over the burst window ((m/s²)·s^0.25)
    pub vdv: f64,
    /// Peak-to-RMS ratio of the filtered signal (0 when RMS is 0)
    pub crest_factor: f64,
    /// Great-circle distance from this device's previous fix (meters)
    pub distance_m: f64,
    /// Speed gate fired: reported speed was below the configured threshold
    pub gated: bool,
    /// Resampling or filtering fell back to a zero score (audit flag)
    pub degraded: bool,
}

impl RoughnessResult {
    /// True when every scored component is zero.
    pub fn is_zero_score(&self) -> bool {
        self.roughness == 0.0 && self.vdv == 0.0 && self.crest_factor == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_predicate() {
        let r = RoughnessResult {
            roughness: 0.0,
            vdv: 0.0,
            crest_factor: 0.0,
            distance_m: 12.5,
            gated: true,
            degraded: false,
        };
        assert!(r.is_zero_score());
    }
}

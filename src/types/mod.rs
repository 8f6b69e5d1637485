//! Shared data structures for the roughness scoring pipeline
//!
//! - Submission side: SensorSample, Submission (one burst + GPS fix)
//! - Result side: RoughnessResult (score handed to persistence)

mod result;
mod submission;

pub use result::*;
pub use submission::*;

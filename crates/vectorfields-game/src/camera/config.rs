//! Camera configuration

use serde::{Deserialize, Serialize};

/// What the player does once the last track has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackEndBehavior {
    /// Keep interpolating the last track past its end
    Hold,
    /// Start over from the first track
    Wrap,
}

/// Camera track player configuration.
///
/// Track durations use the clock's unit length so the catalog and the run
/// length always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Behavior after the last track
    pub end_behavior: TrackEndBehavior,
    /// Replay this track over and over (debugging aid)
    pub pinned_track: Option<usize>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            end_behavior: TrackEndBehavior::Hold,
            pinned_track: None,
        }
    }
}

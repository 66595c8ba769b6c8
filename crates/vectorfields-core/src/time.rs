//! Animation clock for the demonstration
//!
//! The host supplies a wall-clock tick in milliseconds once per frame. The
//! clock anchors itself to the first tick it sees, blurs the value a little by
//! averaging with the previous smoothed tick, and reports when the fixed run
//! length has elapsed.

use serde::{Deserialize, Serialize};

/// Length in milliseconds of one camera track base unit.
///
/// The value originates from the music synchronization.
pub const TRACK_UNIT_LENGTH: i64 = 5420;

/// Configuration for the animation clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Milliseconds per track-length unit
    pub unit_length: i64,
    /// Total run length in track-length units
    pub run_length_units: i64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            unit_length: TRACK_UNIT_LENGTH,
            run_length_units: 20,
        }
    }
}

impl ClockConfig {
    /// Total run length in milliseconds
    pub fn run_length(&self) -> i64 {
        self.unit_length * self.run_length_units
    }
}

/// Result of advancing the clock by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    /// The smoothed tick is still inside the run length
    Running,
    /// The smoothed tick reached the run length
    Expired,
}

/// Smoothed animation clock
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Configuration
    pub config: ClockConfig,
    /// First raw tick seen, captured lazily
    start_tick: Option<i64>,
    /// Smoothed tick relative to the start tick
    tick: i64,
    /// Number of updates applied
    frame_count: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl AnimationClock {
    /// Create a clock with the given config
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            start_tick: None,
            tick: 0,
            frame_count: 0,
        }
    }

    /// Anchor the clock to `raw_tick` if it has not been anchored yet
    pub fn capture_start(&mut self, raw_tick: i64) -> i64 {
        *self.start_tick.get_or_insert(raw_tick)
    }

    /// Feed the raw tick for this frame and blur it into the smoothed tick
    pub fn update(&mut self, raw_tick: i64) -> ClockStatus {
        let start = self.capture_start(raw_tick);
        self.tick = (self.tick + raw_tick - start) >> 1;
        self.frame_count += 1;
        self.status()
    }

    /// Whether the smoothed tick has reached the run length
    pub fn status(&self) -> ClockStatus {
        if self.tick >= self.config.run_length() {
            ClockStatus::Expired
        } else {
            ClockStatus::Running
        }
    }

    /// Smoothed tick in milliseconds since the start tick
    pub fn tick(&self) -> i64 {
        self.tick
    }

    /// The anchored start tick, if any frame has been seen
    pub fn start_tick(&self) -> Option<i64> {
        self.start_tick
    }

    /// Number of updates applied so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

//! Camera track sequencing

use tracing::debug;
use vectorfields_core::TRACK_UNIT_LENGTH;

use super::config::{CameraConfig, TrackEndBehavior};
use super::track::{CameraPose, CameraTrack, CAMERA_TRACKS};

/// Plays the camera tracks back against the animation clock
#[derive(Debug, Clone)]
pub struct CameraPlayer {
    /// Configuration
    pub config: CameraConfig,
    /// Ticks per track-length unit
    unit_length: i64,
    tracks: &'static [CameraTrack],
    current: usize,
    /// Tick at which the current track started
    track_start: i64,
    /// Tick at which the next track starts
    next_track_start: i64,
}

impl Default for CameraPlayer {
    fn default() -> Self {
        Self::new(CameraConfig::default(), TRACK_UNIT_LENGTH)
    }
}

impl CameraPlayer {
    /// Create a player positioned at the start of the first (or pinned) track.
    ///
    /// `unit_length` is the clock's tick count per track-length unit.
    pub fn new(config: CameraConfig, unit_length: i64) -> Self {
        let tracks: &'static [CameraTrack] = &CAMERA_TRACKS;
        let current = config
            .pinned_track
            .map_or(0, |pinned| pinned.min(tracks.len() - 1));
        let next_track_start = tracks[current].duration(unit_length);
        Self {
            config,
            unit_length,
            tracks,
            current,
            track_start: 0,
            next_track_start,
        }
    }

    /// Index of the track being played
    pub fn current_track(&self) -> usize {
        self.current
    }

    /// The track being played
    pub fn track(&self) -> &CameraTrack {
        &self.tracks[self.current]
    }

    pub fn unit_length(&self) -> i64 {
        self.unit_length
    }

    pub fn track_start(&self) -> i64 {
        self.track_start
    }

    pub fn next_track_start(&self) -> i64 {
        self.next_track_start
    }

    /// Progress through the current track at `tick`; exceeds 1 while holding
    pub fn track_pos(&self, tick: i64) -> f32 {
        let duration = self.track().duration(self.unit_length);
        (tick - self.track_start) as f32 / duration as f32
    }

    /// Advance past every track that ended before `tick` and return the pose.
    ///
    /// A pinned track replays back to back, so its window keeps moving with
    /// the clock while the index stays put.
    pub fn update(&mut self, tick: i64) -> CameraPose {
        while tick >= self.next_track_start {
            let next = match (self.config.pinned_track, self.config.end_behavior) {
                (Some(_), _) => self.current,
                _ if self.current + 1 < self.tracks.len() => self.current + 1,
                (None, TrackEndBehavior::Wrap) => 0,
                (None, TrackEndBehavior::Hold) => break,
            };
            self.current = next;
            self.track_start = self.next_track_start;
            self.next_track_start =
                self.track_start + self.tracks[next].duration(self.unit_length);
            debug!(
                "Camera track {} starts at tick {} (next at {})",
                next, self.track_start, self.next_track_start
            );
        }

        self.track().pose(self.track_pos(tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::track::total_length;

    const UNIT: i64 = vectorfields_core::TRACK_UNIT_LENGTH;

    #[test]
    fn test_starts_on_first_track() {
        let mut player = CameraPlayer::default();
        let pose = player.update(0);
        assert_eq!(player.current_track(), 0);
        assert_eq!(player.track_start(), 0);
        assert_eq!(player.next_track_start(), UNIT);
        assert_eq!(pose, CAMERA_TRACKS[0].pose(0.0));
    }

    #[test]
    fn test_advances_at_boundary() {
        let mut player = CameraPlayer::default();
        player.update(UNIT - 1);
        assert_eq!(player.current_track(), 0);

        player.update(UNIT);
        assert_eq!(player.current_track(), 1);
        assert_eq!(player.track_start(), UNIT);
        assert_eq!(player.next_track_start(), 2 * UNIT);
        assert_eq!(player.track_pos(UNIT), 0.0);
    }

    #[test]
    fn test_catches_up_over_skipped_tracks() {
        let mut player = CameraPlayer::default();
        // Tracks 0..6 are one unit long, track 6 is two.
        player.update(7 * UNIT);
        assert_eq!(player.current_track(), 6);
        assert_eq!(player.track_start(), 6 * UNIT);
        assert_eq!(player.next_track_start(), 8 * UNIT);
        assert!((player.track_pos(7 * UNIT) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_holds_last_track() {
        let mut player = CameraPlayer::default();
        let end = total_length(&CAMERA_TRACKS) * UNIT;
        player.update(end + UNIT);
        assert_eq!(player.current_track(), CAMERA_TRACKS.len() - 1);
        assert_eq!(player.next_track_start(), end);
        assert!(player.track_pos(end + UNIT) > 1.0);
    }

    #[test]
    fn test_wraps_to_first_track() {
        let mut player = CameraPlayer::new(
            CameraConfig {
                end_behavior: TrackEndBehavior::Wrap,
                ..CameraConfig::default()
            },
            UNIT,
        );
        let end = total_length(&CAMERA_TRACKS) * UNIT;
        player.update(end);
        assert_eq!(player.current_track(), 0);
        assert_eq!(player.track_start(), end);
    }

    #[test]
    fn test_pinned_track_keeps_index_but_replays() {
        let mut player = CameraPlayer::new(
            CameraConfig {
                pinned_track: Some(99),
                ..CameraConfig::default()
            },
            UNIT,
        );
        let last = CAMERA_TRACKS.len() - 1;
        assert_eq!(player.current_track(), last);

        // The last track is one unit long.
        player.update(100 * UNIT + UNIT / 2);
        assert_eq!(player.current_track(), last);
        assert_eq!(player.track_start(), 100 * UNIT);
        assert_eq!(player.next_track_start(), 101 * UNIT);
        assert!((player.track_pos(100 * UNIT + UNIT / 2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unit_length_sets_durations() {
        let mut player = CameraPlayer::new(CameraConfig::default(), 100);
        assert_eq!(player.unit_length(), 100);
        assert_eq!(player.next_track_start(), 100);

        player.update(700);
        assert_eq!(player.current_track(), 6);
        assert_eq!(player.track_start(), 600);
        assert_eq!(player.next_track_start(), 800);
    }
}

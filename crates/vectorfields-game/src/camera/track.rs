//! Scripted camera tracks
//!
//! A track is a straight-line sweep of five channels from `source` to
//! `source + delta` over its duration. Channels are stored in hundredths
//! of a world unit (or of a radian, for the heading).

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use vectorfields_render::look_at;

/// Number of interpolated channels per track
pub const TRACK_CHANNELS: usize = 5;

/// The five animated channels of a camera track, in 1/100 units.
///
/// In orbit mode `x, y, z` place the look-at center, in direct mode the eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackChannels {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// Horizontal viewing angle
    pub heading: i16,
    /// Vertical offset between eye and center
    pub height: i16,
}

impl TrackChannels {
    pub const fn new(x: i16, y: i16, z: i16, heading: i16, height: i16) -> Self {
        Self {
            x,
            y,
            z,
            heading,
            height,
        }
    }

    pub fn to_array(self) -> [f32; TRACK_CHANNELS] {
        [self.x, self.y, self.z, self.heading, self.height].map(f32::from)
    }
}

/// One scripted camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraTrack {
    /// Channel values at the start of the track
    pub source: TrackChannels,
    /// Change of each channel over the whole track
    pub delta: TrackChannels,
    /// Orbit distance in 1/10 units; zero places the eye directly
    pub distance: i16,
    /// Duration in track-length units
    pub length: u16,
}

const fn track(
    source: [i16; TRACK_CHANNELS],
    delta: [i16; TRACK_CHANNELS],
    distance: i16,
    length: u16,
) -> CameraTrack {
    CameraTrack {
        source: TrackChannels::new(source[0], source[1], source[2], source[3], source[4]),
        delta: TrackChannels::new(delta[0], delta[1], delta[2], delta[3], delta[4]),
        distance,
        length,
    }
}

/// The flight through the city, 20 units in total
pub const CAMERA_TRACKS: [CameraTrack; 14] = [
    track([4500, 2700, 100, 70, -30], [50, 50, -90, -100, 0], 20, 1),
    track([-1448, 4294, 25, 363, 0], [-136, 202, 125, -98, 100], 0, 1),
    track([1437, 4930, 200, -275, -20], [1684, 0, 0, 9, 0], 0, 1),
    track([1800, 3609, 200, 0, 675], [0, 0, 0, 300, 0], 0, 1),
    track([923, 996, 50, 2336, -80], [0, -20, -50, 0, 170], 0, 1),
    track([-1663, -43, 600, 2170, 0], [20, 0, -600, 0, 100], 0, 1),
    track([1049, -1420, 175, 2111, -17], [0, 0, 0, -334, 0], 0, 2),
    track([0, 0, 50, 300, 25], [0, 0, 0, 300, 0], 70, 2),
    track([-473, -953, 3500, -353, -350], [0, 0, -2800, 0, 0], 0, 2),
    track([191, 1938, 35, 1139, -17], [1121, -1001, -20, 0, 0], 0, 2),
    track([-1475, 1565, 20, 1088, -9], [0, 0, 0, 300, 0], 0, 1),
    track([1191, -1061, 5, 1470, 0], [-1200, 1100, 60, 0, 15], 0, 2),
    track([0, 0, 200, 0, 150], [0, 0, -150, 628, -120], 120, 2),
    track([400, 400, 40, 200, 40], [-400, -400, -20, 0, -40], 50, 1),
];

/// Sum of track lengths, in track-length units
pub fn total_length(tracks: &[CameraTrack]) -> i64 {
    tracks.iter().map(|t| i64::from(t.length)).sum()
}

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.center, self.up)
    }
}

impl CameraTrack {
    /// Duration in ticks, never zero
    pub fn duration(&self, unit_length: i64) -> i64 {
        (i64::from(self.length) * unit_length).max(1)
    }

    /// Whether the eye orbits a center instead of being placed directly
    pub fn is_orbit(&self) -> bool {
        self.distance != 0
    }

    /// Channel values at `pos` (0 at the start, 1 at the end; not clamped)
    pub fn interpolate(&self, pos: f32) -> [f32; TRACK_CHANNELS] {
        let source = self.source.to_array();
        let delta = self.delta.to_array();
        std::array::from_fn(|i| (source[i] + delta[i] * pos) * 0.01)
    }

    /// Eye and center at `pos`
    pub fn pose(&self, pos: f32) -> CameraPose {
        let [x, y, z, heading, height] = self.interpolate(pos);
        let point = Vec3::new(x, y, z);
        let direction = Vec3::new(heading.cos(), heading.sin(), 0.0);

        let (eye, center) = if self.is_orbit() {
            let distance = f32::from(self.distance) * 0.1;
            (point - direction * distance - Vec3::new(0.0, 0.0, height), point)
        } else {
            (point, point + direction + Vec3::new(0.0, 0.0, height))
        };

        CameraPose {
            eye,
            center,
            up: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_runs_twenty_units() {
        assert_eq!(total_length(&CAMERA_TRACKS), 20);
        assert!(CAMERA_TRACKS.iter().all(|t| t.length > 0));
    }

    #[test]
    fn test_interpolation_endpoints() {
        let track = CAMERA_TRACKS[0];
        let cases = [
            (0.0, [45.0, 27.0, 1.0, 0.7, -0.3]),
            (1.0, [45.5, 27.5, 0.1, -0.3, -0.3]),
        ];
        for (pos, expected) in cases {
            for (got, want) in track.interpolate(pos).iter().zip(expected) {
                assert!((got - want).abs() < 1e-5, "pos {pos}: {got} != {want}");
            }
        }
    }

    #[test]
    fn test_interpolation_extrapolates_past_end() {
        let track = track([0, 0, 0, 0, 0], [100, 0, 0, 0, 0], 0, 1);
        assert!((track.interpolate(1.5)[0] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_eye_circles_center() {
        let track = CAMERA_TRACKS[7];
        assert!(track.is_orbit());
        let pose = track.pose(0.25);
        let [x, y, z, heading, height] = track.interpolate(0.25);

        assert_eq!(pose.center, Vec3::new(x, y, z));
        let offset = pose.center - pose.eye;
        assert!((offset.truncate().length() - 7.0).abs() < 1e-4);
        assert!((offset.z - height).abs() < 1e-5);
        let direction = offset.truncate().normalize();
        assert!((direction.x - heading.cos()).abs() < 1e-4);
        assert!((direction.y - heading.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_direct_center_is_one_step_ahead() {
        let track = CAMERA_TRACKS[1];
        assert!(!track.is_orbit());
        let pose = track.pose(0.5);
        let [x, y, z, heading, height] = track.interpolate(0.5);

        assert_eq!(pose.eye, Vec3::new(x, y, z));
        let expected = Vec3::new(heading.cos(), heading.sin(), height);
        assert!((pose.center - pose.eye).abs_diff_eq(expected, 1e-5));
        assert_eq!(pose.up, Vec3::Z);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let pose = CAMERA_TRACKS[0].pose(0.0);
        let view = pose.view_matrix();
        assert!(view.transform_point3(pose.eye).length() < 1e-3);
    }
}

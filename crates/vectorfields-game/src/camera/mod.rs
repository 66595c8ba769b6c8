//! Camera track engine
//!
//! Plays a fixed catalog of scripted camera moves against the animation
//! clock and derives the view transform for each frame.

mod config;
mod player;
mod track;

pub use config::{CameraConfig, TrackEndBehavior};
pub use player::CameraPlayer;
pub use track::{total_length, CameraPose, CameraTrack, TrackChannels, CAMERA_TRACKS, TRACK_CHANNELS};

//! Vectorfields Game - Camera animation and the frame driver
//!
//! Provides the scripted camera track engine, the fade overlay and the
//! session that turns host ticks into render backend calls.

pub mod camera;
pub mod fade;
pub mod session;

pub use camera::{
    CameraConfig, CameraPlayer, CameraPose, CameraTrack, TrackChannels, TrackEndBehavior,
    CAMERA_TRACKS,
};
pub use fade::{fade_overlay, ticks_to_transition, FADE_THRESHOLD};
pub use session::{FrameOutcome, Session, SessionConfig, SessionError, DEFAULT_SEED};

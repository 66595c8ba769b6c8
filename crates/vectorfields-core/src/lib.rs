//! Vectorfields Core - Numeric foundations shared by every vectorfields crate
//!
//! This crate provides:
//! - 16.16 fixed-point conversion used by every mesh buffer
//! - The deterministic random stream driving colors and shape choice
//! - The animation clock that paces the demonstration
//! - Color helpers (re-exports glam math types for convenience)

pub mod fixed;
pub mod random;
pub mod time;
pub mod types;

pub use fixed::{from_fixed, to_fixed, to_fixed_matrix, to_fixed_vec3, Fixed, FIXED_ONE};
pub use glam::{Mat4, Vec2, Vec3, Vec4};
pub use random::RandomStream;
pub use time::{AnimationClock, ClockConfig, ClockStatus, TRACK_UNIT_LENGTH};
pub use types::Color;

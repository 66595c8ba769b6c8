//! 16.16 fixed-point conversion
//!
//! Every coordinate, normal and matrix element handed to the rendering
//! backend is encoded as a signed 32-bit integer whose low 16 bits hold the
//! fraction. Conversion from `f32` saturates instead of wrapping.

use glam::{Mat4, Vec3};

/// A 16.16 signed fixed-point scalar
pub type Fixed = i32;

/// Fixed-point representation of 1.0
pub const FIXED_ONE: Fixed = 0x10000;

/// Smallest value representable before scaling
const MIN_VALUE: f32 = -32768.0;

/// Largest value accepted before scaling
const MAX_VALUE: f32 = 32767.0;

/// Convert f32 to 16.16 fixed-point.
///
/// Input is clamped to `[-32768, 32767]` and then scaled by 65536 with the
/// fraction truncated toward zero. Out-of-range values are never rejected.
pub fn to_fixed(value: f32) -> Fixed {
    let clamped = value.clamp(MIN_VALUE, MAX_VALUE);
    (clamped * 65536.0) as Fixed
}

/// Convert 16.16 fixed-point back to f32.
pub fn from_fixed(value: Fixed) -> f32 {
    value as f32 / 65536.0
}

/// Convert each component of a vector to fixed-point.
pub fn to_fixed_vec3(v: Vec3) -> [Fixed; 3] {
    [to_fixed(v.x), to_fixed(v.y), to_fixed(v.z)]
}

/// Convert a matrix to 16 fixed-point elements in column-major order.
pub fn to_fixed_matrix(m: &Mat4) -> [Fixed; 16] {
    m.to_cols_array().map(to_fixed)
}

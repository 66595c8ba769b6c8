//! Scene-wide view, projection and lighting configuration

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use vectorfields_core::{to_fixed, Color, Fixed};

/// Build a right-handed view matrix looking from `eye` toward `center`.
///
/// Rows of the rotation are right, recomputed up and backward (eye minus
/// center); the result is then translated by `-eye`. Zero-length axes are
/// left unnormalized rather than producing NaNs.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let forward = normalize_nonzero(eye - center);
    let right = normalize_nonzero(up.cross(forward));
    let up = normalize_nonzero(forward.cross(right));

    let rotation = Mat4::from_cols(
        Vec4::new(right.x, up.x, forward.x, 0.0),
        Vec4::new(right.y, up.y, forward.y, 0.0),
        Vec4::new(right.z, up.z, forward.z, 0.0),
        Vec4::W,
    );
    rotation * Mat4::from_translation(-eye)
}

fn normalize_nonzero(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(v)
}

/// Symmetric perspective projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Clip planes of a frustum at the near distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// The demo's camera: 45 degrees, near 0.5, far 150
    pub fn demo(aspect: f32) -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect,
            near: 0.5,
            far: 150.0,
        }
    }

    /// Frustum planes equivalent to this perspective
    pub fn frustum(&self) -> Frustum {
        let top = self.near * (self.fov_y_degrees.to_radians() * 0.5).tan();
        let bottom = -top;
        Frustum {
            left: bottom * self.aspect,
            right: top * self.aspect,
            bottom,
            top,
            near: self.near,
            far: self.far,
        }
    }

    /// Frustum planes as fixed-point (left, right, bottom, top, near, far)
    pub fn frustum_fixed(&self) -> [Fixed; 6] {
        let f = self.frustum();
        [f.left, f.right, f.bottom, f.top, f.near, f.far].map(to_fixed)
    }

    /// OpenGL-style clip-space projection matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Directional light (position with w = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub diffuse: Color,
}

impl DirectionalLight {
    /// Homogeneous light position in fixed-point, w = 0
    pub fn position_fixed(&self) -> [Fixed; 4] {
        [
            to_fixed(self.direction.x),
            to_fixed(self.direction.y),
            to_fixed(self.direction.z),
            0,
        ]
    }
}

/// Static light and material configuration applied every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingSetup {
    pub lights: [DirectionalLight; 3],
    pub material_specular: Color,
    pub shininess: f32,
    /// Vertex colors drive the material's ambient and diffuse terms
    pub color_material: bool,
}

impl Default for LightingSetup {
    fn default() -> Self {
        Self {
            lights: [
                DirectionalLight {
                    direction: Vec3::new(-4.0, 1.0, 1.0),
                    diffuse: Color::rgb(1.0, 0.4, 0.0),
                },
                DirectionalLight {
                    direction: Vec3::new(1.0, -2.0, -1.0),
                    diffuse: Color::rgb(0.07, 0.14, 0.35),
                },
                DirectionalLight {
                    direction: Vec3::new(-1.0, 0.0, -4.0),
                    diffuse: Color::rgb(0.07, 0.17, 0.14),
                },
            ],
            material_specular: Color::WHITE,
            shininess: 60.0,
            color_material: true,
        }
    }
}

/// Background color the frame is cleared to
pub const CLEAR_COLOR: Color = Color::rgb(0.1, 0.2, 0.3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_matches_glam() {
        let cases = [
            (Vec3::new(5.0, -5.0, 5.0), Vec3::ZERO),
            (Vec3::new(45.0, 27.0, 1.0), Vec3::new(44.0, 26.0, 0.7)),
            (Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, 2.0, 0.5)),
        ];
        for (eye, center) in cases {
            let ours = look_at(eye, center, Vec3::Z);
            let glam = Mat4::look_at_rh(eye, center, Vec3::Z);
            assert!(ours.abs_diff_eq(glam, 1e-4), "eye {eye} center {center}");
        }
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, -2.0, 4.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Z);
        assert!(view.transform_point3(eye).length() < 1e-5);

        // The center lies straight down the negative view axis.
        let center = view.transform_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);
        assert!(center.z < 0.0);
    }

    #[test]
    fn test_look_at_degenerate_does_not_produce_nan() {
        let view = look_at(Vec3::ONE, Vec3::ONE, Vec3::Z);
        assert!(!view.is_nan());
    }

    #[test]
    fn test_frustum_planes() {
        let projection = Projection::demo(2.0);
        let f = projection.frustum();
        let expected_top = 0.5 * (22.5f32).to_radians().tan();
        assert!((f.top - expected_top).abs() < 1e-6);
        assert!((f.right - 2.0 * expected_top).abs() < 1e-6);
        assert_eq!(f.left, -f.right);
        assert_eq!(projection.frustum_fixed()[5], to_fixed(150.0));
    }

    #[test]
    fn test_default_lighting_fixed_values() {
        let lighting = LightingSetup::default();
        assert_eq!(lighting.lights[0].position_fixed(), [-0x40000, 0x10000, 0x10000, 0]);
        assert_eq!(lighting.lights[0].diffuse.to_fixed(), [0x10000, 0x6666, 0, 0x10000]);
        assert_eq!(lighting.lights[1].diffuse.to_fixed(), [0x11eb, 0x23d7, 0x5999, 0x10000]);
        assert_eq!(lighting.lights[2].diffuse.to_fixed(), [0x11eb, 0x2b85, 0x23d7, 0x10000]);
        assert_eq!(to_fixed(lighting.shininess), 60 << 16);
    }
}

//! Box builder
//!
//! A rectangular prism of 12 flat-shaded triangles. Every triangle's normal is
//! derived from its three positions once they are laid out, which keeps the
//! normals consistent with the winding of the corner table.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vectorfields_core::RandomStream;
use vectorfields_render::{Mesh, MeshBuilder, MeshError, VertexComponents};

/// Vertices in every box (12 triangles)
pub const BOX_VERTICES: usize = 36;

/// Corner indices of each triangle, wound so the normal points outward.
///
/// Corners 0..4 are the bottom face counter-clockwise from the origin,
/// corners 4..8 the same four lifted by the height.
const FACES: [[usize; 3]; 12] = [
    [0, 1, 5],
    [5, 4, 0],
    [1, 2, 6],
    [6, 5, 1],
    [2, 3, 7],
    [7, 6, 2],
    [3, 0, 4],
    [4, 7, 3],
    [4, 5, 6],
    [6, 7, 4],
    [1, 0, 3],
    [3, 2, 1],
];

/// Gray offset added to every random shade; lighting separates the sides
const SHADE_OFFSET: u32 = 81;

/// Axis-aligned box placement and size
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub origin: Vec3,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub length: f32,
    /// Extent along Z
    pub height: f32,
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            width: 2.0,
            length: 2.0,
            height: 2.0,
        }
    }
}

impl BoxSpec {
    pub fn new(origin: Vec3, width: f32, length: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            length,
            height,
        }
    }

    /// The eight corners, bottom ring first
    pub fn corners(&self) -> [Vec3; 8] {
        let o = self.origin;
        let (w, l, h) = (self.width, self.length, self.height);
        [
            o,
            o + Vec3::new(w, 0.0, 0.0),
            o + Vec3::new(w, l, 0.0),
            o + Vec3::new(0.0, l, 0.0),
            o + Vec3::new(0.0, 0.0, h),
            o + Vec3::new(w, 0.0, h),
            o + Vec3::new(w, l, h),
            o + Vec3::new(0.0, l, h),
        ]
    }

    /// Geometric center
    pub fn center(&self) -> Vec3 {
        self.origin + Vec3::new(self.width, self.length, self.height) * 0.5
    }
}

/// Unit normal of triangle `a, b, c` from the edges `b - a` and `c - b`.
///
/// Degenerate triangles yield a zero vector.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - b).normalize_or_zero()
}

/// Build a box, drawing one random shade per vertex.
pub fn create_box(spec: &BoxSpec, random: &mut RandomStream) -> Result<Mesh, MeshError> {
    let mut builder = MeshBuilder::new(BOX_VERTICES, VertexComponents::Three, true)?;
    let corners = spec.corners();

    for indices in FACES {
        let positions = indices.map(|i| corners[i]);
        let normal = face_normal(positions[0], positions[1], positions[2]);

        for position in positions {
            let shade = ((random.next_u32() & 0x5f) + SHADE_OFFSET) as u8;
            builder.push_vertex(&position.to_array(), [shade, shade, shade, 0], Some(normal));
        }
    }

    let mesh = builder.finish();
    debug!("Generated box at {} ({} vertices)", spec.origin, mesh.count());
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorfields_core::from_fixed;

    fn read_vec3(buffer: &[i32], index: usize) -> Vec3 {
        Vec3::new(
            from_fixed(buffer[index * 3]),
            from_fixed(buffer[index * 3 + 1]),
            from_fixed(buffer[index * 3 + 2]),
        )
    }

    #[test]
    fn test_box_has_36_vertices() {
        let mesh = create_box(&BoxSpec::default(), &mut RandomStream::new(15)).unwrap();
        assert_eq!(mesh.count(), BOX_VERTICES);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices().len(), 36 * 3);
        assert_eq!(mesh.colors().len(), 36 * 4);
        assert_eq!(mesh.normals().map(<[i32]>::len), Some(36 * 3));
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let spec = BoxSpec::new(Vec3::new(1.0, -2.0, 0.5), 3.0, 1.5, 4.0);
        let mesh = create_box(&spec, &mut RandomStream::new(7)).unwrap();
        let normals = mesh.normals().unwrap();
        let center = spec.center();

        for triangle in 0..12 {
            let first = triangle * 3;
            let normal = read_vec3(normals, first);
            assert!((normal.length() - 1.0).abs() < 1e-3, "triangle {triangle}");

            let centroid = (read_vec3(mesh.vertices(), first)
                + read_vec3(mesh.vertices(), first + 1)
                + read_vec3(mesh.vertices(), first + 2))
                / 3.0;
            assert!(normal.dot(centroid - center) > 0.0, "triangle {triangle}");

            for vertex in first + 1..first + 3 {
                assert_eq!(read_vec3(normals, vertex), normal);
            }
        }
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let c = Vec3::new(1.0, 1.0, 0.0);
        assert_eq!(face_normal(a, b, c), Vec3::Z);
        assert_eq!(face_normal(c, b, a), -Vec3::Z);
        assert_eq!(face_normal(a, a, c), Vec3::ZERO);
    }

    #[test]
    fn test_colors_consume_one_draw_per_vertex() {
        let mut random = RandomStream::new(15);
        let mesh = create_box(&BoxSpec::default(), &mut random).unwrap();

        let mut expected = RandomStream::new(15);
        for color in mesh.colors().chunks_exact(4) {
            let shade = ((expected.next_u32() & 0x5f) + 81) as u8;
            assert_eq!(color, &[shade, shade, shade, 0]);
            assert!((81..=176).contains(&shade));
        }
        assert_eq!(random, expected);
    }
}

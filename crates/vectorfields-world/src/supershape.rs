//! Supershape tessellation
//!
//! Each shape combines two superformula instances, one swept along longitude
//! and one along latitude, and maps them onto a sphere-like surface. Only the
//! upper hemisphere is built (the lower half would be a mirrored duplicate,
//! and the reflection pass draws that instead).
//!
//! Cells where any corner radius comes out exactly zero are skipped, so the
//! final vertex count is usually below the allocated capacity.

use std::f32::consts::PI;
use std::ops::Range;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vectorfields_core::{Color, RandomStream};
use vectorfields_render::{Mesh, MeshBuilder, MeshError, VertexComponents};

/// One superformula instance: `m, a, b, n1, n2, n3`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuperformulaParams {
    /// Rotational symmetry
    pub m: f32,
    pub a: f32,
    pub b: f32,
    pub n1: f32,
    pub n2: f32,
    pub n3: f32,
}

impl SuperformulaParams {
    pub const fn new(m: f32, a: f32, b: f32, n1: f32, n2: f32, n3: f32) -> Self {
        Self { m, a, b, n1, n2, n3 }
    }
}

/// Evaluate `(|cos(m t / 4)| / a ^ n2 + |sin(m t / 4)| / b ^ n3) ^ (1 / n1)`.
///
/// The result is the reciprocal of the classic superformula radius, which is
/// why positions are divided by it.
pub fn superformula(t: f32, p: &SuperformulaParams) -> f32 {
    let angle = f64::from(p.m) * f64::from(t) / 4.0;
    let cos_term = (angle.cos().abs() / f64::from(p.a)).powf(f64::from(p.n2));
    let sin_term = (angle.sin().abs() / f64::from(p.b)).powf(f64::from(p.n3));
    (cos_term + sin_term).powf(1.0 / f64::from(p.n1)) as f32
}

/// Complete description of one supershape
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuperShapeParams {
    /// Formula swept along longitude
    pub longitude: SuperformulaParams,
    /// Formula swept along latitude
    pub latitude: SuperformulaParams,
    /// Longitude subdivisions over the full turn
    pub longitude_resolution: u32,
    /// Latitude subdivisions over the full turn (a quarter of them is built)
    pub latitude_resolution: u32,
    /// Uniform scale applied when the shape is placed
    pub scale: f32,
}

const fn shape(
    longitude: SuperformulaParams,
    latitude: SuperformulaParams,
    longitude_resolution: u32,
    latitude_resolution: u32,
    scale: f32,
) -> SuperShapeParams {
    SuperShapeParams {
        longitude,
        latitude,
        longitude_resolution,
        latitude_resolution,
        scale,
    }
}

const fn sf(m: f32, a: f32, b: f32, n1: f32, n2: f32, n3: f32) -> SuperformulaParams {
    SuperformulaParams::new(m, a, b, n1, n2, n3)
}

/// The shape catalog, in generation order. The last entry is the ship.
pub const SUPERSHAPES: [SuperShapeParams; 9] = [
    shape(sf(10.0, 1.0, 2.0, 90.0, 1.0, -45.0), sf(8.0, 1.0, 1.0, -1.0, 1.0, -0.4), 20, 30, 2.0),
    shape(sf(4.0, 1.0, 1.0, 10.0, 10.0, 10.0), sf(4.0, 1.0, 1.0, 10.0, 10.0, 10.0), 10, 20, 1.5),
    shape(sf(4.0, 1.0, 1.0, 1.0, 1.0, 1.0), sf(4.0, 1.0, 1.0, 1.0, 1.0, 1.0), 10, 10, 2.0),
    shape(sf(2.0, 1.0, 1.0, 2.0, 2.0, 2.0), sf(2.0, 1.0, 1.0, 2.0, 2.0, 2.0), 10, 20, 1.5),
    shape(sf(6.0, 1.0, 1.0, 1.0, 1.0, 6.0), sf(4.0, 1.0, 1.0, 2.0, 2.0, 2.0), 24, 20, 1.5),
    shape(sf(7.0, 1.0, 1.0, 0.2, 1.7, 1.7), sf(2.0, 1.0, 1.0, 1.0, 1.0, 1.0), 28, 12, 1.0),
    shape(sf(3.0, 1.0, 1.0, 4.5, 10.0, 10.0), sf(4.0, 1.0, 1.0, 12.0, 15.0, 15.0), 18, 16, 2.0),
    shape(sf(8.0, 1.0, 1.0, 3.0, 6.0, 6.0), sf(2.0, 1.0, 1.0, 0.5, 0.5, 0.5), 16, 24, 1.5),
    shape(sf(4.0, 1.0, 1.0, 1.0, 1.0, 1.0), sf(2.0, 1.0, 1.0, 2.0, 2.0, 2.0), 12, 16, 1.0),
];

impl SuperShapeParams {
    /// Latitude rows actually built: a quarter turn ending at the pole
    pub fn latitude_rows(&self) -> Range<u32> {
        self.latitude_resolution / 4..self.latitude_resolution / 2
    }

    /// Worst-case vertex count (no cell skipped)
    pub fn capacity(&self) -> usize {
        let rows = self.latitude_rows().len();
        self.longitude_resolution as usize * rows * 6
    }

    /// Longitude angle of column `i`, from -pi
    pub fn longitude_angle(&self, i: u32) -> f32 {
        -PI + i as f32 * 2.0 * PI / self.longitude_resolution as f32
    }

    /// Latitude angle of row `j`, from -pi/2
    pub fn latitude_angle(&self, j: u32) -> f32 {
        -PI / 2.0 + j as f32 * 2.0 * PI / self.latitude_resolution as f32
    }

    /// Corner radii `[r0, r1, r2, r3]` of cell `(i, j)`
    pub fn cell_radii(&self, i: u32, j: u32) -> [f32; 4] {
        let t1 = self.longitude_angle(i);
        let t2 = self.longitude_angle(i + 1);
        let p1 = self.latitude_angle(j);
        let p2 = self.latitude_angle(j + 1);
        [
            superformula(t1, &self.longitude),
            superformula(p1, &self.latitude),
            superformula(t2, &self.longitude),
            superformula(p2, &self.latitude),
        ]
    }
}

/// Sphere-map the two radii at longitude `t` and latitude `p`
fn map_point(r1: f32, r2: f32, t: f32, p: f32) -> Vec3 {
    Vec3::new(
        t.cos() * p.cos() / r1 / r2,
        t.sin() * p.cos() / r1 / r2,
        p.sin() / r2,
    )
}

/// Build one supershape mesh. Draws three values from `random` for the base color.
pub fn create_supershape(
    params: &SuperShapeParams,
    random: &mut RandomStream,
) -> Result<Mesh, MeshError> {
    let mut builder = MeshBuilder::new(params.capacity(), VertexComponents::Three, true)?;

    let mut channel = || ((random.next_u32() % 155) + 100) as f32 / 255.0;
    let (r, g, b) = (channel(), channel(), channel());
    let base_color = Color::rgb(r, g, b);

    let rows = params.latitude_rows();
    let seam_row = rows.start + 1;
    let mut skipped = 0usize;

    for longitude in 0..params.longitude_resolution {
        for latitude in rows.clone() {
            let radii = params.cell_radii(longitude, latitude);
            if radii.contains(&0.0) {
                skipped += 1;
                continue;
            }
            let [r0, r1, r2, r3] = radii;

            let t1 = params.longitude_angle(longitude);
            let t2 = params.longitude_angle(longitude + 1);
            let p1 = params.latitude_angle(latitude);
            let p2 = params.latitude_angle(latitude + 1);

            let mut pa = map_point(r0, r1, t1, p1);
            let mut pb = map_point(r2, r1, t2, p1);
            let pc = map_point(r2, r3, t2, p2);
            let pd = map_point(r0, r3, t1, p2);

            // Rim row sits flat at z = 0.
            if latitude == seam_row {
                pa.z = 0.0;
                pb.z = 0.0;
            }

            // Left unnormalized; the rasterizer renormalizes scaled normals.
            let normal = (pb - pa).cross(pd - pa);

            let shade = pa.z + 0.5;
            let [sr, sg, sb, _] = base_color.scaled(shade).to_rgba8();
            let color = [sr, sg, sb, 0];

            for point in [pa, pb, pd, pb, pc, pd] {
                builder.push_vertex(&point.to_array(), color, Some(normal));
            }
        }
    }

    let capacity = builder.capacity();
    let mesh = builder.finish();
    debug!(
        "Generated supershape: {} of {} vertices, {} degenerate cells skipped",
        mesh.count(),
        capacity,
        skipped
    );
    Ok(mesh)
}

/// Build every shape in `catalog`, in order, from one shared random stream.
pub fn create_supershapes(
    catalog: &[SuperShapeParams],
    random: &mut RandomStream,
) -> Result<Vec<Mesh>, MeshError> {
    catalog
        .iter()
        .map(|params| create_supershape(params, random))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Latitude formula that collapses to zero exactly at 45 degrees
    fn pinched() -> SuperShapeParams {
        SuperShapeParams {
            longitude: sf(4.0, 1.0, 1.0, 1.0, 1.0, 1.0),
            latitude: sf(4.0, 1.0, 1.0, 1.0, 400.0, 400.0),
            longitude_resolution: 8,
            latitude_resolution: 32,
            scale: 1.0,
        }
    }

    fn non_degenerate_cells(params: &SuperShapeParams) -> usize {
        (0..params.longitude_resolution)
            .flat_map(|i| params.latitude_rows().map(move |j| (i, j)))
            .filter(|&(i, j)| !params.cell_radii(i, j).contains(&0.0))
            .count()
    }

    #[test]
    fn test_superformula_unit_circle() {
        let circle = sf(4.0, 1.0, 1.0, 2.0, 2.0, 2.0);
        for t in [0.0, 0.3, 1.0, -2.5] {
            assert!((superformula(t, &circle) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_superformula_can_be_zero() {
        let radius = superformula(PI / 4.0, &pinched().latitude);
        assert_eq!(radius, 0.0);
        assert!(superformula(0.0, &pinched().latitude) > 0.0);
    }

    #[test]
    fn test_skips_cells_with_zero_radius() {
        let params = pinched();
        let mesh = create_supershape(&params, &mut RandomStream::new(15)).unwrap();

        let expected_cells = non_degenerate_cells(&params);
        assert!(expected_cells > 0);
        assert_eq!(mesh.count(), expected_cells * 6);
        assert!(mesh.count() < params.capacity());
        assert_eq!(mesh.vertices().len(), mesh.count() * 3);
        assert_eq!(mesh.colors().len(), mesh.count() * 4);
        assert_eq!(mesh.normals().map(<[i32]>::len), Some(mesh.count() * 3));
    }

    #[test]
    fn test_catalog_meshes_respect_invariants() {
        let mut random = RandomStream::new(15);
        let meshes = create_supershapes(&SUPERSHAPES, &mut random).unwrap();
        assert_eq!(meshes.len(), SUPERSHAPES.len());

        for (mesh, params) in meshes.iter().zip(SUPERSHAPES.iter()) {
            assert_eq!(mesh.count() % 6, 0);
            assert!(mesh.count() <= params.capacity());
            assert_eq!(mesh.count(), non_degenerate_cells(params) * 6);
            assert_eq!(mesh.components(), VertexComponents::Three);
            assert!(mesh.has_normals());
            assert!(mesh.colors().chunks_exact(4).all(|c| c[3] == 0));
        }
    }

    #[test]
    fn test_base_color_uses_three_draws() {
        let params = SUPERSHAPES[2];
        let mut random = RandomStream::new(15);
        create_supershape(&params, &mut random).unwrap();

        let mut expected = RandomStream::new(15);
        for _ in 0..3 {
            expected.next_u32();
        }
        assert_eq!(random, expected);
    }

    #[test]
    fn test_cells_share_color_and_normal() {
        let mesh = create_supershape(&SUPERSHAPES[2], &mut RandomStream::new(15)).unwrap();
        let normals = mesh.normals().unwrap();
        for (colors, normals) in mesh.colors().chunks_exact(24).zip(normals.chunks_exact(18)) {
            assert!(colors.chunks_exact(4).all(|c| c == &colors[..4]));
            assert!(normals.chunks_exact(3).all(|n| n == &normals[..3]));
        }
    }

    #[test]
    fn test_seam_row_is_flattened() {
        let params = SUPERSHAPES[2];
        let mesh = create_supershape(&params, &mut RandomStream::new(15)).unwrap();
        let rows = params.latitude_rows().len();
        // Every cell of this catalog entry is emitted, so cells are laid out
        // column by column; the second row of each column is the seam.
        assert_eq!(mesh.count(), params.capacity());
        for column in 0..params.longitude_resolution as usize {
            let cell = column * rows + 1;
            let vertices = &mesh.vertices()[cell * 18..cell * 18 + 6];
            assert_eq!(vertices[2], 0, "pa.z in column {column}");
            assert_eq!(vertices[5], 0, "pb.z in column {column}");
        }
    }
}

//! Ground plane tessellation
//!
//! A square grid of quads, two triangles each, with every corner nudged by a
//! deterministic wave so the terrain does not look machine-flat. The plane is
//! unlit and planar, so it carries two position components and no normals.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vectorfields_core::RandomStream;
use vectorfields_render::{Mesh, MeshBuilder, MeshError, VertexComponents};

/// Vertices emitted per grid cell (two triangles)
pub const QUAD_VERTICES: usize = 6;

/// Order in which the four cell corners are visited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Axis bit masks selecting the x/y corner offset of each of the 6 vertices
    fn masks(self) -> (u32, u32) {
        match self {
            // x: 011100, y: 110001
            Winding::Clockwise => (0x1c, 0x31),
            // x: 001110, y: 100011
            Winding::CounterClockwise => (0x0e, 0x23),
        }
    }

    /// Corner offsets (0 or 1 on each axis) of the 6 quad vertices
    pub fn quad_corners(self) -> [(i32, i32); QUAD_VERTICES] {
        let (x_mask, y_mask) = self.masks();
        std::array::from_fn(|a| (((x_mask >> a) & 1) as i32, ((y_mask >> a) & 1) as i32))
    }
}

/// Ground plane generation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlaneConfig {
    /// Cells on each side of the origin; the grid spans `2 * half_extent` cells
    pub half_extent: u32,
    /// World units per cell
    pub scale: f32,
    /// Triangle winding inside each cell
    pub winding: Winding,
}

impl Default for GroundPlaneConfig {
    fn default() -> Self {
        Self {
            half_extent: 2,
            scale: 1.0,
            winding: Winding::Clockwise,
        }
    }
}

impl GroundPlaneConfig {
    /// The wide city floor: 30 by 30 cells of 4 units
    pub fn city() -> Self {
        Self {
            half_extent: 15,
            scale: 4.0,
            winding: Winding::Clockwise,
        }
    }

    /// Number of cells along one side
    pub fn cells_per_side(&self) -> usize {
        (self.half_extent as usize).saturating_mul(2)
    }

    /// Total vertices the plane will contain, or `None` if that overflows
    pub fn vertex_count(&self) -> Option<usize> {
        let cells = self.cells_per_side();
        cells.checked_mul(cells)?.checked_mul(QUAD_VERTICES)
    }
}

/// Terrain wave added to both coordinates of a grid corner
fn perturbation(xm: i32, ym: i32) -> f32 {
    ((f64::from(xm) * 2.0).cos() * (f64::from(ym) * 4.0).sin() * 0.75) as f32
}

/// Build the ground plane, drawing one gray level per cell from `random`.
pub fn create_ground_plane(
    config: &GroundPlaneConfig,
    random: &mut RandomStream,
) -> Result<Mesh, MeshError> {
    let too_large = || MeshError::Allocation {
        requested_vertices: usize::MAX,
    };
    let vertex_count = config.vertex_count().ok_or_else(too_large)?;
    let end = i32::try_from(config.half_extent).map_err(|_| too_large())?;
    let begin = -end;

    let mut builder = MeshBuilder::new(vertex_count, VertexComponents::Two, false)?;
    let corners = config.winding.quad_corners();

    for y in begin..end {
        for x in begin..end {
            let shade = ((random.next_u32() & 0x5f) + 81) as u8;
            let color = [shade, shade, shade, 0];

            for (dx, dy) in corners {
                let xm = x + dx;
                let ym = y + dy;
                let m = perturbation(xm, ym);
                builder.push_vertex(
                    &[xm as f32 * config.scale + m, ym as f32 * config.scale + m],
                    color,
                    None,
                );
            }
        }
    }

    let mesh = builder.finish();
    debug!(
        "Generated ground plane: {} cells, {} vertices",
        mesh.count() / QUAD_VERTICES,
        mesh.count()
    );
    Ok(mesh)
}

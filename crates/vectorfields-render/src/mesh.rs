//! Fixed-point mesh objects
//!
//! A [`Mesh`] owns three parallel, tightly packed buffers: 16.16 positions,
//! RGBA8 colors and (for lit meshes) 16.16 normals. Meshes are built once
//! through a [`MeshBuilder`] and are read-only afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;
use vectorfields_core::{to_fixed, to_fixed_vec3, Fixed};

use crate::error::MeshError;

/// Color channels stored per vertex (R, G, B, A)
pub const COLOR_CHANNELS: usize = 4;

/// Normal components stored per vertex
pub const NORMAL_COMPONENTS: usize = 3;

/// Number of position components per vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexComponents {
    /// Planar X/Y positions (Z implied zero)
    Two,
    /// Full X/Y/Z positions
    Three,
}

impl VertexComponents {
    /// Number of scalars per vertex
    pub const fn count(self) -> usize {
        match self {
            VertexComponents::Two => 2,
            VertexComponents::Three => 3,
        }
    }
}

/// Drawable triangle-list mesh in fixed-point format
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Fixed>,
    colors: Vec<u8>,
    normals: Option<Vec<Fixed>>,
    components: VertexComponents,
    count: usize,
}

/// Reserve exactly `len` elements and fill them with zero
fn zeroed<T: Clone + Default>(len: usize, requested_vertices: usize) -> Result<Vec<T>, MeshError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| MeshError::Allocation { requested_vertices })?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

impl Mesh {
    /// Allocate every buffer for `vertex_count` vertices.
    ///
    /// Buffers obtained before a failing reservation are released before the
    /// error is returned. `count` starts at the full capacity.
    pub fn create(
        vertex_count: usize,
        components: VertexComponents,
        with_normals: bool,
    ) -> Result<Self, MeshError> {
        let overflow = || MeshError::Allocation {
            requested_vertices: vertex_count,
        };
        let vertex_len = vertex_count.checked_mul(components.count()).ok_or_else(overflow)?;
        let color_len = vertex_count.checked_mul(COLOR_CHANNELS).ok_or_else(overflow)?;
        let normal_len = vertex_count.checked_mul(NORMAL_COMPONENTS).ok_or_else(overflow)?;

        let vertices = zeroed(vertex_len, vertex_count)?;
        let colors = zeroed(color_len, vertex_count)?;
        let normals = if with_normals {
            Some(zeroed(normal_len, vertex_count)?)
        } else {
            None
        };

        Ok(Self {
            vertices,
            colors,
            normals,
            components,
            count: vertex_count,
        })
    }

    /// Release all buffers
    pub fn destroy(self) {
        trace!("Destroying mesh with {} vertices", self.count);
    }

    /// Number of populated vertices
    pub fn count(&self) -> usize {
        self.count
    }

    /// Position components per vertex
    pub fn components(&self) -> VertexComponents {
        self.components
    }

    /// Number of triangles in the list
    pub fn triangle_count(&self) -> usize {
        self.count / 3
    }

    /// Packed fixed-point positions
    pub fn vertices(&self) -> &[Fixed] {
        &self.vertices
    }

    /// Packed RGBA8 colors
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Packed fixed-point normals, if the mesh is lit
    pub fn normals(&self) -> Option<&[Fixed]> {
        self.normals.as_deref()
    }

    /// Whether normals are present
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Positions as raw bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Colors as raw bytes for upload
    pub fn color_bytes(&self) -> &[u8] {
        &self.colors
    }

    /// Normals as raw bytes for upload
    pub fn normal_bytes(&self) -> Option<&[u8]> {
        self.normals.as_deref().map(bytemuck::cast_slice)
    }

    /// Cut every buffer down to `count` vertices
    fn truncate(&mut self, count: usize) {
        self.vertices.truncate(count * self.components.count());
        self.colors.truncate(count * COLOR_CHANNELS);
        if let Some(normals) = self.normals.as_mut() {
            normals.truncate(count * NORMAL_COMPONENTS);
        }
        self.count = count;
    }
}

/// Sequential writer filling a freshly created [`Mesh`]
#[derive(Debug)]
pub struct MeshBuilder {
    mesh: Mesh,
    cursor: usize,
}

impl MeshBuilder {
    /// Allocate a mesh with worst-case `capacity` vertices
    pub fn new(
        capacity: usize,
        components: VertexComponents,
        with_normals: bool,
    ) -> Result<Self, MeshError> {
        Ok(Self {
            mesh: Mesh::create(capacity, components, with_normals)?,
            cursor: 0,
        })
    }

    /// Allocated vertex capacity
    pub fn capacity(&self) -> usize {
        self.mesh.count
    }

    /// Vertices written so far
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Write the next vertex.
    ///
    /// `position` must hold exactly one scalar per vertex component. The
    /// normal is ignored for meshes created without normals; lit meshes get a
    /// zero normal when none is given.
    ///
    /// # Panics
    ///
    /// Panics if the mesh capacity is exhausted.
    pub fn push_vertex(&mut self, position: &[f32], color: [u8; 4], normal: Option<Vec3>) {
        assert!(
            self.cursor < self.mesh.count,
            "mesh capacity of {} vertices exceeded",
            self.mesh.count
        );
        let components = self.mesh.components.count();
        debug_assert_eq!(position.len(), components);

        let i = self.cursor;
        let target = &mut self.mesh.vertices[i * components..(i + 1) * components];
        for (slot, &value) in target.iter_mut().zip(position) {
            *slot = to_fixed(value);
        }

        self.mesh.colors[i * COLOR_CHANNELS..(i + 1) * COLOR_CHANNELS].copy_from_slice(&color);

        if let Some(normals) = self.mesh.normals.as_mut() {
            let fixed = to_fixed_vec3(normal.unwrap_or(Vec3::ZERO));
            normals[i * NORMAL_COMPONENTS..(i + 1) * NORMAL_COMPONENTS].copy_from_slice(&fixed);
        }

        self.cursor += 1;
    }

    /// Finish construction, dropping any capacity that was never written
    pub fn finish(mut self) -> Mesh {
        let written = self.cursor;
        self.mesh.truncate(written);
        self.mesh
    }
}

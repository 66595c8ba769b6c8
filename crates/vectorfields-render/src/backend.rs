//! Contract between the frame driver and the host's rasterizer
//!
//! The driver never owns graphics state. It toggles capabilities around each
//! draw and hands over meshes, matrices and the static lighting setup; the
//! backend translates those into API calls.

use glam::Mat4;
use vectorfields_core::{Color, Fixed, FIXED_ONE};

use crate::mesh::Mesh;
use crate::scene::{LightingSetup, Projection};

/// Render target dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, 1.0 for a degenerate viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Per-frame setup: viewport, clear color and projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSetup {
    pub viewport: Viewport,
    pub clear_color: Color,
    pub projection: Projection,
}

/// Fixed-function state toggled around draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Lighting,
    DepthTest,
    CullFace,
    Blend,
}

/// Blend equations used by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Destination multiplied by source color (zero, source color)
    Modulate,
}

/// Screen-space quad darkening the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeQuad {
    /// Multiplier applied to the frame, 0.0 is black
    pub color: Color,
}

impl FadeQuad {
    /// Two triangles covering normalized device coordinates
    #[rustfmt::skip]
    pub const VERTICES: [Fixed; 12] = [
        -FIXED_ONE, -FIXED_ONE,
        FIXED_ONE, -FIXED_ONE,
        -FIXED_ONE, FIXED_ONE,
        FIXED_ONE, -FIXED_ONE,
        FIXED_ONE, FIXED_ONE,
        -FIXED_ONE, FIXED_ONE,
    ];
}

/// Immediate-mode rasterizer the frame driver submits to
pub trait RenderBackend {
    /// Set the viewport, clear the frame and load the projection
    fn prepare_frame(&mut self, setup: &FrameSetup);

    /// Load the view matrix for the frame
    fn set_view(&mut self, view: &Mat4);

    /// Apply the static light and material configuration
    fn configure_lighting(&mut self, lighting: &LightingSetup);

    /// Enable or disable a fixed-function capability
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Select the blend equation used while blending is enabled
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Draw a mesh as a triangle list under the given model transform
    fn draw_mesh(&mut self, mesh: &Mesh, model: &Mat4);

    /// Composite the fade overlay over the whole frame
    fn draw_fade(&mut self, quad: &FadeQuad);
}

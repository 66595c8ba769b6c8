//! In-memory backend that records every submitted command
//!
//! Used by the headless host and by tests to inspect what a frame draws
//! without any graphics API present.

use glam::Mat4;

use crate::backend::{BlendMode, Capability, FadeQuad, FrameSetup, RenderBackend};
use crate::mesh::{Mesh, VertexComponents};
use crate::scene::LightingSetup;

/// A single recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    PrepareFrame(FrameSetup),
    SetView(Mat4),
    ConfigureLighting,
    SetCapability(Capability, bool),
    SetBlendMode(BlendMode),
    DrawMesh {
        vertex_count: usize,
        components: VertexComponents,
        lit: bool,
        model: Mat4,
    },
    DrawFade(FadeQuad),
}

/// Backend that stores commands instead of drawing
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RenderCommand>,
    frames: u64,
    vertices_submitted: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last [`clear`](Self::clear)
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Forget recorded commands, keeping the running totals
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of `prepare_frame` calls seen
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total vertices submitted through `draw_mesh`
    pub fn vertices_submitted(&self) -> u64 {
        self.vertices_submitted
    }

    /// Number of recorded mesh draws
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawMesh { .. }))
            .count()
    }

    /// The most recent view matrix, if any
    pub fn last_view(&self) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SetView(view) => Some(*view),
            _ => None,
        })
    }

    /// The fade quad recorded for the current frame, if any
    pub fn fade(&self) -> Option<FadeQuad> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::DrawFade(quad) => Some(*quad),
            _ => None,
        })
    }
}

impl RenderBackend for RecordingBackend {
    fn prepare_frame(&mut self, setup: &FrameSetup) {
        self.frames += 1;
        self.commands.push(RenderCommand::PrepareFrame(*setup));
    }

    fn set_view(&mut self, view: &Mat4) {
        self.commands.push(RenderCommand::SetView(*view));
    }

    fn configure_lighting(&mut self, _lighting: &LightingSetup) {
        self.commands.push(RenderCommand::ConfigureLighting);
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.commands.push(RenderCommand::SetCapability(capability, enabled));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(RenderCommand::SetBlendMode(mode));
    }

    fn draw_mesh(&mut self, mesh: &Mesh, model: &Mat4) {
        self.vertices_submitted += mesh.count() as u64;
        self.commands.push(RenderCommand::DrawMesh {
            vertex_count: mesh.count(),
            components: mesh.components(),
            lit: mesh.has_normals(),
            model: *model,
        });
    }

    fn draw_fade(&mut self, quad: &FadeQuad) {
        self.commands.push(RenderCommand::DrawFade(*quad));
    }
}

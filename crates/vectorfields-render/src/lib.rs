//! Vectorfields Render - Mesh objects and the rendering backend contract
//!
//! Meshes hold flat fixed-point vertex, color and normal buffers ready for
//! an immediate-mode rasterizer. Actual draw submission happens behind the
//! [`RenderBackend`] trait, implemented by the host.

pub mod backend;
pub mod error;
pub mod mesh;
pub mod recording;
pub mod scene;

pub use backend::{BlendMode, Capability, FadeQuad, FrameSetup, RenderBackend, Viewport};
pub use error::MeshError;
pub use mesh::{Mesh, MeshBuilder, VertexComponents};
pub use recording::{RecordingBackend, RenderCommand};
pub use scene::{look_at, DirectionalLight, Frustum, LightingSetup, Projection, CLEAR_COLOR};

/// Errors that can occur while building a mesh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("failed to allocate buffers for {requested_vertices} vertices")]
    Allocation { requested_vertices: usize },
}

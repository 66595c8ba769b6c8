//! Vectorfields World - Procedural scene geometry
//!
//! Generators run once at startup and each produce one fixed-point mesh:
//! the perturbed ground plane, superformula "supershape" structures and
//! simple boxes. Placements describe where the supershapes stand.

pub mod boxes;
pub mod ground;
pub mod placement;
pub mod supershape;

pub use boxes::{create_box, face_normal, BoxSpec, BOX_VERTICES};
pub use ground::{create_ground_plane, GroundPlaneConfig, Winding};
pub use placement::{building_placements, ship_placements, Placement, PlacementConfig};
pub use supershape::{
    create_supershape, create_supershapes, superformula, SuperShapeParams, SuperformulaParams,
    SUPERSHAPES,
};

//! Frame driver
//!
//! A [`Session`] owns everything generated at startup and turns one host tick
//! into one frame worth of backend calls. It ends itself once the clock has
//! covered the run length; frames after that are no-ops.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vectorfields_core::{AnimationClock, ClockConfig, ClockStatus, RandomStream};
use vectorfields_render::{
    BlendMode, Capability, FadeQuad, FrameSetup, LightingSetup, Mesh, MeshError, Projection,
    RenderBackend, Viewport, CLEAR_COLOR,
};
use vectorfields_world::{
    building_placements, create_box, create_ground_plane, create_supershapes, ship_placements,
    BoxSpec, GroundPlaneConfig, Placement, PlacementConfig, SUPERSHAPES,
};

use crate::camera::{CameraConfig, CameraPlayer};
use crate::fade::{fade_overlay, FADE_THRESHOLD};

/// Seed of the color stream shared by all generators
pub const DEFAULT_SEED: u32 = 15;

/// Everything that shapes a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed of the generator color stream
    pub seed: u32,
    pub ground: GroundPlaneConfig,
    /// Boxes, generated in order after the ground plane
    pub boxes: Vec<BoxSpec>,
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    pub clock: ClockConfig,
    /// Ticks from a track transition at which the fade disappears
    pub fade_threshold: i64,
    /// Draw the supershape city and ships
    pub draw_supershapes: bool,
    /// Draw the mirrored city below the ground plane
    pub draw_reflection: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ground: GroundPlaneConfig::city(),
            boxes: vec![BoxSpec::default()],
            placement: PlacementConfig::default(),
            camera: CameraConfig::default(),
            clock: ClockConfig::default(),
            fade_threshold: FADE_THRESHOLD,
            draw_supershapes: true,
            draw_reflection: true,
        }
    }
}

/// Errors raised while setting up a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to generate {what}: {source}")]
    Generation {
        what: &'static str,
        #[source]
        source: MeshError,
    },
}

fn generation(what: &'static str) -> impl FnOnce(MeshError) -> SessionError {
    move |source| SessionError::Generation { what, source }
}

/// What a call to [`Session::render_frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The session had already ended
    Skipped,
    /// The run length was reached on this frame; nothing was drawn
    Finished,
    /// A frame was submitted to the backend
    Rendered,
}

/// A running demonstration
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    clock: AnimationClock,
    camera: CameraPlayer,
    lighting: LightingSetup,
    ground: Mesh,
    supershapes: Vec<Mesh>,
    boxes: Vec<Mesh>,
    buildings: Vec<Placement>,
    alive: bool,
}

impl Session {
    /// Generate every mesh and lay out the city.
    ///
    /// Generators share one random stream in a fixed order (supershapes,
    /// ground plane, boxes), so the same seed always yields the same colors.
    pub fn init(config: SessionConfig) -> Result<Self, SessionError> {
        let mut random = RandomStream::new(config.seed);

        let supershapes =
            create_supershapes(&SUPERSHAPES, &mut random).map_err(generation("supershapes"))?;
        let ground =
            create_ground_plane(&config.ground, &mut random).map_err(generation("ground plane"))?;
        let boxes = config
            .boxes
            .iter()
            .map(|spec| create_box(spec, &mut random))
            .collect::<Result<Vec<_>, _>>()
            .map_err(generation("boxes"))?;
        let buildings = building_placements(&config.placement, &SUPERSHAPES);

        let vertices: usize = supershapes.iter().chain(&boxes).map(Mesh::count).sum::<usize>()
            + ground.count();
        info!(
            "Session initialized: {} supershapes, {} boxes, {} buildings, {} vertices",
            supershapes.len(),
            boxes.len(),
            buildings.len(),
            vertices
        );

        Ok(Self {
            clock: AnimationClock::new(config.clock.clone()),
            camera: CameraPlayer::new(config.camera.clone(), config.clock.unit_length),
            lighting: LightingSetup::default(),
            config,
            ground,
            supershapes,
            boxes,
            buildings,
            alive: true,
        })
    }

    /// Release every mesh
    pub fn deinit(self) {
        let frames = self.clock.frame_count();
        self.ground.destroy();
        self.supershapes.into_iter().chain(self.boxes).for_each(Mesh::destroy);
        info!("Session released after {} frames", frames);
    }

    /// Whether the host should keep calling [`render_frame`](Self::render_frame)
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn camera(&self) -> &CameraPlayer {
        &self.camera
    }

    pub fn ground_plane(&self) -> &Mesh {
        &self.ground
    }

    pub fn supershapes(&self) -> &[Mesh] {
        &self.supershapes
    }

    pub fn boxes(&self) -> &[Mesh] {
        &self.boxes
    }

    pub fn buildings(&self) -> &[Placement] {
        &self.buildings
    }

    /// Advance to the host tick `tick` (milliseconds) and draw one frame.
    pub fn render_frame<B: RenderBackend>(
        &mut self,
        tick: i64,
        width: u32,
        height: u32,
        backend: &mut B,
    ) -> FrameOutcome {
        self.clock.capture_start(tick);
        if !self.alive {
            return FrameOutcome::Skipped;
        }

        if self.clock.update(tick) == ClockStatus::Expired {
            self.alive = false;
            info!(
                "Run finished at tick {} after {} frames",
                self.clock.tick(),
                self.clock.frame_count()
            );
            return FrameOutcome::Finished;
        }
        let tick = self.clock.tick();

        let viewport = Viewport::new(width, height);
        backend.prepare_frame(&FrameSetup {
            viewport,
            clear_color: CLEAR_COLOR,
            projection: Projection::demo(viewport.aspect_ratio()),
        });

        let pose = self.camera.update(tick);
        backend.set_view(&pose.view_matrix());
        backend.configure_lighting(&self.lighting);

        if self.config.draw_supershapes && self.config.draw_reflection {
            self.draw_models(backend, tick, Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0)));
        }
        self.draw_ground_plane(backend);
        if self.config.draw_supershapes {
            self.draw_models(backend, tick, Mat4::IDENTITY);
        }
        for mesh in &self.boxes {
            backend.draw_mesh(mesh, &Mat4::IDENTITY);
        }

        let overlay = fade_overlay(
            tick,
            self.camera.track_start(),
            self.camera.next_track_start(),
            self.config.fade_threshold,
        );
        if let Some(quad) = overlay {
            draw_fade_quad(backend, &quad);
        }

        FrameOutcome::Rendered
    }

    /// Buildings and ships, each transformed by `base` first
    fn draw_models<B: RenderBackend>(&self, backend: &mut B, tick: i64, base: Mat4) {
        let ships = ship_placements(&self.config.placement, tick, &SUPERSHAPES);
        for placement in self.buildings.iter().chain(&ships) {
            if let Some(mesh) = self.supershapes.get(placement.shape) {
                backend.draw_mesh(mesh, &(base * placement.model));
            }
        }
    }

    /// Multiply the unlit ground over the reflection
    fn draw_ground_plane<B: RenderBackend>(&self, backend: &mut B) {
        backend.set_capability(Capability::CullFace, false);
        backend.set_capability(Capability::DepthTest, false);
        backend.set_capability(Capability::Blend, true);
        backend.set_blend_mode(BlendMode::Modulate);
        backend.set_capability(Capability::Lighting, false);

        backend.draw_mesh(&self.ground, &Mat4::IDENTITY);

        backend.set_capability(Capability::Lighting, true);
        backend.set_capability(Capability::Blend, false);
        backend.set_capability(Capability::DepthTest, true);
    }
}

fn draw_fade_quad<B: RenderBackend>(backend: &mut B, quad: &FadeQuad) {
    debug!("Fade level {:.3}", quad.color.r);
    backend.set_capability(Capability::DepthTest, false);
    backend.set_capability(Capability::Blend, true);
    backend.set_blend_mode(BlendMode::Modulate);
    backend.set_capability(Capability::Lighting, false);

    backend.draw_fade(quad);

    backend.set_capability(Capability::Lighting, true);
    backend.set_capability(Capability::Blend, false);
    backend.set_capability(Capability::DepthTest, true);
}

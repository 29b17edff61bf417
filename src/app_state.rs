use instant::Instant;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::FieldConfig;
use crate::host::{DrawSurface, FrameScheduler, FrameToken};
use crate::models::Edge;
use crate::renderer::render_field;
use crate::scene::field::Field;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimationState {
    Stopped,
    Running,
}

/// Snapshot handed to the host on request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub fps: u32,
    pub running: bool,
    pub frames_rendered: u64,
}

/// The particle field plus everything needed to drive it from host events.
///
/// Exactly one animation frame may be pending at a time; it is requested only
/// on entering `Running` or at the end of a rendered frame, and cancelled
/// synchronously on entering `Stopped`.
pub struct State<S, F> {
    pub config: FieldConfig,
    pub(crate) field: Field,
    pub(crate) edges: Vec<Edge>,
    surface: S,
    scheduler: F,
    pub(crate) rng: StdRng,

    animation: AnimationState,
    pub(crate) intersecting: bool,
    pub(crate) document_active: bool,
    pending_frame: Option<FrameToken>,

    frames_rendered: u64,
    last_frame_instant: Instant,
    frame_count_in_second: u32,
    current_fps: u32,
}

impl<S: DrawSurface, F: FrameScheduler> State<S, F> {
    pub fn new(surface: S, scheduler: F, viewport: Viewport, config: FieldConfig) -> Self {
        Self::with_rng(surface, scheduler, viewport, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        surface: S,
        scheduler: F,
        viewport: Viewport,
        config: FieldConfig,
        mut rng: StdRng,
    ) -> Self {
        let field = Field::generate(viewport, &config, &mut rng);
        log::info!(
            "Particle field created: {} nodes on {}x{}",
            field.len(),
            viewport.width(),
            viewport.height()
        );
        Self {
            config,
            field,
            edges: Vec::new(),
            surface,
            scheduler,
            rng,
            animation: AnimationState::Stopped,
            intersecting: false,
            document_active: true,
            pending_frame: None,
            frames_rendered: 0,
            last_frame_instant: Instant::now(),
            frame_count_in_second: 0,
            current_fps: 0,
        }
    }

    /// Host animation-frame callback. Advances, renders and, if still
    /// running, requests the next frame.
    pub fn on_animation_frame(&mut self) {
        self.pending_frame = None;
        if self.animation != AnimationState::Running {
            log::trace!("Stale animation frame ignored while stopped.");
            return;
        }

        self.field.step(&self.config);
        self.field.proximity_edges(&self.config, &mut self.edges);
        render_field(&mut self.surface, &self.field, &self.edges, &self.config);
        self.frames_rendered += 1;
        self.update_fps();

        self.schedule_frame();
    }

    /// Re-evaluates the gating condition and performs the resulting
    /// transition, if any.
    pub(crate) fn sync_animation(&mut self) {
        let should_run = self.intersecting && self.document_active;
        match (self.animation, should_run) {
            (AnimationState::Stopped, true) => {
                log::debug!("Particle field: Stopped -> Running");
                self.animation = AnimationState::Running;
                self.schedule_frame();
            }
            (AnimationState::Running, false) => {
                log::debug!(
                    "Particle field: Running -> Stopped (intersecting: {}, document active: {})",
                    self.intersecting,
                    self.document_active
                );
                self.animation = AnimationState::Stopped;
                if let Some(token) = self.pending_frame.take() {
                    self.scheduler.cancel_frame(token);
                }
            }
            _ => {}
        }
    }

    fn schedule_frame(&mut self) {
        if self.pending_frame.is_some() {
            return;
        }
        self.pending_frame = self.scheduler.request_frame();
        if self.pending_frame.is_none() {
            log::warn!("Host refused an animation frame request; field will idle until the next visibility change.");
        }
    }

    fn update_fps(&mut self) {
        self.frame_count_in_second += 1;
        let now = Instant::now();
        let elapsed = (now - self.last_frame_instant).as_secs_f32();

        if elapsed >= 1.0 {
            self.current_fps = self.frame_count_in_second;
            self.frame_count_in_second = 0;
            self.last_frame_instant = now;
            log::trace!("FPS: {}, edges: {}", self.current_fps, self.edges.len());
        }
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            node_count: self.field.len(),
            edge_count: self.edges.len(),
            fps: self.current_fps,
            running: self.is_running(),
            frames_rendered: self.frames_rendered,
        }
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation
    }

    pub fn is_running(&self) -> bool {
        self.animation == AnimationState::Running
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

use crate::app_state::State;
use crate::host::{DrawSurface, FrameScheduler};
use crate::viewport::Viewport;

/// Notifications the host forwards to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldCommand {
    IntersectionChanged { is_intersecting: bool, ratio: f64 },
    DocumentVisibilityChanged { hidden: bool },
    /// Already debounced by the host.
    Resized { width: f32, height: f32 },
}

impl<S: DrawSurface, F: FrameScheduler> State<S, F> {
    pub fn process_command(&mut self, command: FieldCommand) {
        match command {
            FieldCommand::IntersectionChanged { is_intersecting, ratio } => {
                self.intersecting = is_intersecting && ratio >= self.config.visibility_threshold;
                log::debug!(
                    "Canvas intersection ratio {:.2} -> intersecting: {}",
                    ratio,
                    self.intersecting
                );
                self.sync_animation();
            }
            FieldCommand::DocumentVisibilityChanged { hidden } => {
                self.document_active = !hidden;
                log::debug!("Document hidden: {}", hidden);
                self.sync_animation();
            }
            FieldCommand::Resized { width, height } => {
                let viewport = Viewport::new(width, height);
                self.field.regenerate(viewport, &self.config, &mut self.rng);
                self.edges.clear();
                log::info!(
                    "Resize {}, {}: regenerated {} nodes",
                    width,
                    height,
                    self.field.len()
                );
            }
        }
    }
}

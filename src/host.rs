// src/host.rs
// Seams between the simulator and whatever environment drives it.
use bevy_color::Srgba;
use glam::Vec2;

/// A 2D drawing target sized to the viewport.
pub trait DrawSurface {
    fn clear(&mut self, width: f32, height: f32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Srgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Srgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Srgba, width: f32);
}

/// Handle of a requested animation frame, as returned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub i32);

/// "Call me back before the next repaint", cancellable.
pub trait FrameScheduler {
    /// Returns `None` if the host refused the request.
    fn request_frame(&mut self) -> Option<FrameToken>;
    fn cancel_frame(&mut self, token: FrameToken);
}

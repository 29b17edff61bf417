// src/models.rs
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::viewport::Viewport;

/// A drifting, pulsing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// Grows without bound; only ever read through `sin`.
    pub pulse_phase: f32,
}

impl Node {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, config: &FieldConfig) -> Self {
        let [radius_low, radius_high] = config.radius_range;
        let [opacity_low, opacity_high] = config.opacity_range;
        Self {
            position: Vec2::new(
                rng.r#gen::<f32>() * viewport.width(),
                rng.r#gen::<f32>() * viewport.height(),
            ),
            velocity: Vec2::new(
                (rng.r#gen::<f32>() - 0.5) * 2.0 * config.max_speed,
                (rng.r#gen::<f32>() - 0.5) * 2.0 * config.max_speed,
            ),
            radius: radius_low + rng.r#gen::<f32>() * (radius_high - radius_low),
            opacity: opacity_low + rng.r#gen::<f32>() * (opacity_high - opacity_low),
            pulse_phase: rng.r#gen::<f32>() * TAU,
        }
    }

    /// One tick: integrate, reflect each axis at most once, clamp, pulse.
    pub fn advance(&mut self, viewport: &Viewport, pulse_step: f32) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > viewport.width() {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > viewport.height() {
            self.velocity.y = -self.velocity.y;
        }
        self.position = viewport.clamp(self.position);

        self.pulse_phase += pulse_step;
    }

    pub fn pulse_radius(&self, amplitude: f32) -> f32 {
        self.radius * (1.0 + self.pulse_phase.sin() * amplitude)
    }
}

/// A link between two nodes for the current frame only. `from < to` always.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn node_at(position: Vec2, velocity: Vec2) -> Node {
        Node { position, velocity, radius: 2.0, opacity: 0.5, pulse_phase: 0.0 }
    }

    #[test]
    fn random_nodes_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::new(640.0, 480.0);
        let config = FieldConfig::default();
        for _ in 0..500 {
            let node = Node::random(&mut rng, &viewport, &config);
            assert!(viewport.contains(node.position));
            assert!((-0.25..0.25).contains(&node.velocity.x));
            assert!((-0.25..0.25).contains(&node.velocity.y));
            assert!((1.0..4.0).contains(&node.radius));
            assert!((0.3..0.8).contains(&node.opacity));
            assert!((0.0..TAU).contains(&node.pulse_phase));
        }
    }

    #[test]
    fn reflects_and_clamps_past_right_edge() {
        let viewport = Viewport::new(200.0, 100.0);
        let mut node = node_at(Vec2::new(205.0, 50.0), Vec2::new(0.2, 0.1));
        node.advance(&viewport, 0.02);
        assert_eq!(node.velocity.x, -0.2);
        assert_eq!(node.position.x, 200.0);
        assert_eq!(node.velocity.y, 0.1);
    }

    #[test]
    fn reflects_each_axis_independently() {
        let viewport = Viewport::new(200.0, 100.0);
        let mut node = node_at(Vec2::new(0.1, 99.9), Vec2::new(-0.2, 0.2));
        node.advance(&viewport, 0.02);
        assert_eq!(node.velocity, Vec2::new(0.2, -0.2));
        assert_eq!(node.position, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn boundary_node_moving_out_reflects_without_losing_speed() {
        let viewport = Viewport::new(200.0, 100.0);
        let mut node = node_at(Vec2::new(200.0, 0.0), Vec2::new(0.25, -0.25));
        let speed = node.velocity.length();
        node.advance(&viewport, 0.02);
        assert_eq!(node.velocity, Vec2::new(-0.25, 0.25));
        assert_eq!(node.velocity.length(), speed);
        assert!(viewport.contains(node.position));
    }

    #[test]
    fn interior_node_keeps_velocity() {
        let viewport = Viewport::new(200.0, 100.0);
        let mut node = node_at(Vec2::new(50.0, 50.0), Vec2::new(0.25, -0.125));
        node.advance(&viewport, 0.02);
        assert_eq!(node.position, Vec2::new(50.25, 49.875));
        assert_eq!(node.velocity, Vec2::new(0.25, -0.125));
        assert_eq!(node.pulse_phase, 0.02);
    }

    #[test]
    fn pulse_radius_oscillates_around_base() {
        let mut node = node_at(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(node.pulse_radius(0.2), 2.0);
        node.pulse_phase = std::f32::consts::FRAC_PI_2;
        assert!((node.pulse_radius(0.2) - 2.4).abs() < 1e-6);
    }
}

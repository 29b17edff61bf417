// src/viewport.rs
use glam::Vec2;

use crate::config::FieldConfig;

/// Pixel rectangle `[0, width] x [0, height]` the field lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// `min(max_nodes, floor(width / node_spacing))`
    pub fn node_count(&self, config: &FieldConfig) -> usize {
        let by_width = (self.size.x / config.node_spacing).floor();
        if by_width.is_finite() && by_width > 0.0 {
            (by_width as usize).min(config.max_nodes)
        } else {
            0
        }
    }

    /// Distance below which two nodes are linked: `min(cap, width / divisor)`.
    pub fn link_distance(&self, config: &FieldConfig) -> f32 {
        config
            .link_distance_cap
            .min(self.size.x / config.link_distance_divisor)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.size.x && point.y >= 0.0 && point.y <= self.size.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_follows_width() {
        let config = FieldConfig::default();
        assert_eq!(Viewport::new(0.0, 800.0).node_count(&config), 0);
        assert_eq!(Viewport::new(29.9, 800.0).node_count(&config), 0);
        assert_eq!(Viewport::new(30.0, 800.0).node_count(&config), 1);
        assert_eq!(Viewport::new(375.0, 800.0).node_count(&config), 12);
        assert_eq!(Viewport::new(1499.0, 800.0).node_count(&config), 49);
        assert_eq!(Viewport::new(1500.0, 800.0).node_count(&config), 50);
        assert_eq!(Viewport::new(3840.0, 2160.0).node_count(&config), 50);
    }

    #[test]
    fn link_distance_is_capped() {
        let config = FieldConfig::default();
        assert_eq!(Viewport::new(800.0, 600.0).link_distance(&config), 100.0);
        assert_eq!(Viewport::new(1920.0, 1080.0).link_distance(&config), 150.0);
    }

    #[test]
    fn clamp_pulls_points_inside() {
        let viewport = Viewport::new(100.0, 50.0);
        assert_eq!(viewport.clamp(Vec2::new(-3.0, 70.0)), Vec2::new(0.0, 50.0));
        assert!(viewport.contains(Vec2::new(100.0, 0.0)));
        assert!(!viewport.contains(Vec2::new(100.1, 0.0)));
    }

    #[test]
    fn negative_dimensions_collapse_to_zero() {
        let viewport = Viewport::new(-10.0, -5.0);
        assert_eq!(viewport.size, Vec2::ZERO);
    }
}

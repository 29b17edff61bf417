// src/scene/field.rs
use rand::Rng;

use crate::config::FieldConfig;
use crate::models::{Edge, Node};
use crate::scene::proximity::collect_edges;
use crate::viewport::Viewport;

/// Owns every node plus the viewport they are confined to.
#[derive(Debug, Clone)]
pub struct Field {
    nodes: Vec<Node>,
    viewport: Viewport,
}

impl Field {
    pub fn generate<R: Rng + ?Sized>(viewport: Viewport, config: &FieldConfig, rng: &mut R) -> Self {
        let count = viewport.node_count(config);
        let nodes = (0..count)
            .map(|_| Node::random(rng, &viewport, config))
            .collect();
        Self { nodes, viewport }
    }

    /// Wraps an explicit node set, clamping every node into the viewport.
    pub fn from_nodes(viewport: Viewport, mut nodes: Vec<Node>) -> Self {
        for node in nodes.iter_mut() {
            node.position = viewport.clamp(node.position);
        }
        Self { nodes, viewport }
    }

    /// Full reset: prior positions are discarded, not rescaled.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, viewport: Viewport, config: &FieldConfig, rng: &mut R) {
        *self = Self::generate(viewport, config, rng);
    }

    pub fn step(&mut self, config: &FieldConfig) {
        let viewport = self.viewport;
        for node in self.nodes.iter_mut() {
            node.advance(&viewport, config.pulse_step);
        }
    }

    pub fn proximity_edges(&self, config: &FieldConfig, out: &mut Vec<Edge>) {
        collect_edges(
            &self.nodes,
            self.viewport.link_distance(config),
            config.link_opacity,
            out,
        );
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

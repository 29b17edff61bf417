// src/scene/proximity.rs
// O(n^2) over every unordered pair. Bounded by `FieldConfig::max_nodes`; needs a
// spatial grid if that cap is raised much past 50.
use crate::models::{Edge, Node};

/// Refills `out` with an edge for every pair `i < j` strictly closer than
/// `max_distance`. Opacity falls linearly from `max_opacity` at distance 0 to
/// 0 at `max_distance`.
pub fn collect_edges(nodes: &[Node], max_distance: f32, max_opacity: f32, out: &mut Vec<Edge>) {
    out.clear();
    if max_distance <= 0.0 {
        return;
    }

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            let distance = a.position.distance(b.position);
            if distance < max_distance {
                out.push(Edge {
                    from: i,
                    to: j,
                    opacity: (max_distance - distance) / max_distance * max_opacity,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::collections::HashSet;

    fn node(x: f32, y: f32) -> Node {
        Node {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.5,
            pulse_phase: 0.0,
        }
    }

    #[test]
    fn exact_threshold_produces_no_edge() {
        let nodes = [node(0.0, 0.0), node(150.0, 0.0)];
        let mut edges = Vec::new();
        collect_edges(&nodes, 150.0, 0.3, &mut edges);
        assert!(edges.is_empty());

        let nodes = [node(0.0, 0.0), node(149.0, 0.0)];
        collect_edges(&nodes, 150.0, 0.3, &mut edges);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn opacity_falls_off_with_distance() {
        let nodes = [node(0.0, 0.0), node(30.0, 40.0), node(0.0, 0.0)];
        let mut edges = Vec::new();
        collect_edges(&nodes, 100.0, 0.3, &mut edges);

        assert_eq!(edges.len(), 3);
        let near = edges.iter().find(|e| (e.from, e.to) == (0, 2)).unwrap();
        assert!((near.opacity - 0.3).abs() < 1e-6);
        let mid = edges.iter().find(|e| (e.from, e.to) == (0, 1)).unwrap();
        assert!((mid.opacity - 0.15).abs() < 1e-6);
    }

    #[test]
    fn pairs_are_unordered_and_unique() {
        let nodes: Vec<Node> = (0..12).map(|i| node((i % 4) as f32 * 10.0, (i / 4) as f32 * 10.0)).collect();
        let mut edges = Vec::new();
        collect_edges(&nodes, 1000.0, 0.3, &mut edges);

        assert_eq!(edges.len(), 12 * 11 / 2);
        let mut seen = HashSet::new();
        for edge in &edges {
            assert!(edge.from < edge.to);
            assert!(seen.insert((edge.from, edge.to)));
            assert!(!seen.contains(&(edge.to, edge.from)));
        }
    }

    #[test]
    fn buffer_is_reused_between_frames() {
        let mut edges = vec![Edge { from: 0, to: 9, opacity: 1.0 }];
        collect_edges(&[node(0.0, 0.0)], 100.0, 0.3, &mut edges);
        assert!(edges.is_empty());
    }
}

// src/renderer.rs
use crate::color::Accent;
use crate::config::FieldConfig;
use crate::host::DrawSurface;
use crate::models::Edge;
use crate::scene::field::Field;

/// Draws one frame: clear, edges underneath, then nodes with their halos.
pub fn render_field<S: DrawSurface + ?Sized>(
    surface: &mut S,
    field: &Field,
    edges: &[Edge],
    config: &FieldConfig,
) {
    let viewport = field.viewport();
    let nodes = field.nodes();
    let accent = Accent::from_rgb(config.accent_color);

    surface.clear(viewport.width(), viewport.height());

    for edge in edges {
        let (Some(from), Some(to)) = (nodes.get(edge.from), nodes.get(edge.to)) else {
            log::warn!("Edge references missing node: {} -> {}", edge.from, edge.to);
            continue;
        };
        surface.draw_line(
            from.position,
            to.position,
            accent.with_opacity(edge.opacity),
            config.line_width,
        );
    }

    for node in nodes {
        let radius = node.pulse_radius(config.pulse_amplitude);
        surface.fill_circle(node.position, radius, accent.with_opacity(node.opacity));
        surface.stroke_circle(
            node.position,
            radius + config.halo_offset,
            accent.with_opacity(node.opacity * config.halo_opacity),
            config.line_width,
        );
    }
}

// src/color.rs
use bevy_color::{Alpha, ColorToPacked, Srgba};

/// The single hue every edge, node and halo is drawn in; only alpha varies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accent(Srgba);

impl Accent {
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        Self(Srgba::rgb_u8(r, g, b))
    }

    pub fn with_opacity(&self, opacity: f32) -> Srgba {
        self.0.with_alpha(opacity.clamp(0.0, 1.0))
    }
}

/// Formats a colour as a CSS `rgba()` string for the 2D canvas API.
pub fn to_css_rgba(color: Srgba) -> String {
    let [r, g, b, _] = color.to_u8_array();
    format!("rgba({}, {}, {}, {})", r, g, b, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_keeps_channels_and_alpha() {
        let accent = Accent::from_rgb([231, 183, 70]);
        assert_eq!(to_css_rgba(accent.with_opacity(0.5)), "rgba(231, 183, 70, 0.5)");
    }

    #[test]
    fn opacity_is_clamped() {
        let accent = Accent::from_rgb([0, 0, 0]);
        assert_eq!(accent.with_opacity(1.7).alpha, 1.0);
        assert_eq!(accent.with_opacity(-0.2).alpha, 0.0);
    }
}

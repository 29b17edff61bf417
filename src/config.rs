// src/config.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse field config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid field config: {0}")]
    Invalid(String),
}

/// Tuning knobs for the particle field. Every field has a default, so a host
/// may supply any subset as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Upper bound on the node count regardless of viewport width.
    pub max_nodes: usize,
    /// Horizontal pixels per node; node count is `floor(width / node_spacing)`.
    pub node_spacing: f32,
    /// Per-axis velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub radius_range: [f32; 2],
    pub opacity_range: [f32; 2],
    /// Radians added to each node's pulse phase per frame.
    pub pulse_step: f32,
    pub pulse_amplitude: f32,
    pub link_distance_cap: f32,
    pub link_distance_divisor: f32,
    /// Opacity of an edge between two coincident nodes.
    pub link_opacity: f32,
    pub halo_offset: f32,
    pub halo_opacity: f32,
    pub line_width: f32,
    pub visibility_threshold: f64,
    pub resize_debounce_ms: u32,
    pub accent_color: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_nodes: 50,
            node_spacing: 30.0,
            max_speed: 0.25,
            radius_range: [1.0, 4.0],
            opacity_range: [0.3, 0.8],
            pulse_step: 0.02,
            pulse_amplitude: 0.2,
            link_distance_cap: 150.0,
            link_distance_divisor: 8.0,
            link_opacity: 0.3,
            halo_offset: 2.0,
            halo_opacity: 0.3,
            line_width: 1.0,
            visibility_threshold: 0.1,
            resize_debounce_ms: 250,
            accent_color: [231, 183, 70],
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.node_spacing > 0.0) {
            return Err(ConfigError::Invalid(
                "node_spacing must be greater than 0".to_string(),
            ));
        }
        if !(self.link_distance_divisor > 0.0) {
            return Err(ConfigError::Invalid(
                "link_distance_divisor must be greater than 0".to_string(),
            ));
        }
        if !(self.max_speed >= 0.0) {
            return Err(ConfigError::Invalid(
                "max_speed must not be negative".to_string(),
            ));
        }
        for (name, [low, high]) in [
            ("radius_range", self.radius_range),
            ("opacity_range", self.opacity_range),
        ] {
            if !(low < high) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-empty [low, high) interval, got [{low}, {high})"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::Invalid(
                "visibility_threshold must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

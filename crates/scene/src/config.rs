//! Engine tunables.
//!
//! Every constant the point-cloud engine uses lives here with its default.
//! Hosts may override any subset from JSON (missing fields keep their
//! defaults) or tweak single keys at runtime through [`EngineConfig::set_key`].

use serde::{Deserialize, Serialize};

use crate::selection::SelectionPolicy;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is outside its accepted range.
    OutOfRange { field: &'static str, value: f64 },
    /// The JSON override could not be parsed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::OutOfRange { field, value } => {
                write!(f, "config field `{field}` out of range: {value}")
            }
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Point-cloud engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // ── Scene ────────────────────────────────────────────────
    /// Number of points seeded on the sphere.
    pub point_count: usize,
    /// Sphere radius as a fraction of `min(width, height)`.
    pub radius_fraction: f64,
    /// Perspective focal length in pixels.
    pub focal_length: f64,

    // ── Physics ──────────────────────────────────────────────
    /// Ambient yaw velocity (radians per frame) the scene settles to.
    pub base_rotation_speed: f64,
    /// Radians of velocity per pixel of drag.
    pub drag_sensitivity: f64,
    /// Per-frame velocity multiplier while not dragging. Must be in (0, 1).
    pub friction: f64,
    /// Fraction of the gap to the ambient speed closed per idle frame.
    pub idle_convergence: f64,

    // ── Input ────────────────────────────────────────────────
    /// Movement (per axis, pixels) that turns a click into a drag.
    pub click_threshold_px: f64,
    /// Maximum screen distance between a click and a point it can select.
    pub hit_radius_px: f64,
    /// Yaw velocity added when a click selects a point.
    pub click_impulse_yaw: f64,
    /// Pitch velocity added when a click selects a point.
    pub click_impulse_pitch: f64,

    // ── Rendering ────────────────────────────────────────────
    /// 3D distance under which two points are joined by a line.
    pub connection_distance: f64,
    /// Global opacity multiplier for connection lines.
    pub line_weight: f64,
    /// Stroke width of connection lines in pixels.
    pub line_width: f64,
    /// Point disc radius at `scale == 1`.
    pub base_radius: f64,
    /// Chance per frame of drawing a synapse pulse.
    pub pulse_probability: f64,
    /// Pulses are only drawn on points nearer than this scale.
    pub pulse_min_scale: f64,

    // ── Annotation ───────────────────────────────────────────
    /// Below this projected scale the overlay is dimmed.
    pub overlay_dim_scale: f64,
    /// Overlay opacity used while dimmed.
    pub overlay_dim_opacity: f64,
    /// Fraction of the remaining opacity gap closed per frame.
    pub overlay_fade_rate: f64,
    /// What happens to the selection when the viewport is resized.
    pub selection_policy: SelectionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_count: 300,
            radius_fraction: 0.35,
            focal_length: 500.0,

            base_rotation_speed: 0.001,
            drag_sensitivity: 0.004,
            friction: 0.95,
            idle_convergence: 0.05,

            click_threshold_px: 5.0,
            hit_radius_px: 30.0,
            click_impulse_yaw: 0.002,
            click_impulse_pitch: 0.001,

            connection_distance: 110.0,
            line_weight: 0.5,
            line_width: 0.8,
            base_radius: 2.0,
            pulse_probability: 0.05,
            pulse_min_scale: 0.5,

            overlay_dim_scale: 0.5,
            overlay_dim_opacity: 0.2,
            overlay_fade_rate: 0.2,
            selection_policy: SelectionPolicy::Reset,
        }
    }
}

impl EngineConfig {
    /// Parses a (partial) JSON override and validates the result.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(field: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange { field, value })
            }
        }

        check("friction", self.friction, self.friction > 0.0 && self.friction < 1.0)?;
        check("focal_length", self.focal_length, self.focal_length > 0.0)?;
        check("radius_fraction", self.radius_fraction, self.radius_fraction > 0.0)?;
        check(
            "base_rotation_speed",
            self.base_rotation_speed,
            self.base_rotation_speed >= 0.0,
        )?;
        check(
            "idle_convergence",
            self.idle_convergence,
            self.idle_convergence > 0.0 && self.idle_convergence <= 1.0,
        )?;
        check("click_threshold_px", self.click_threshold_px, self.click_threshold_px > 0.0)?;
        check("hit_radius_px", self.hit_radius_px, self.hit_radius_px > 0.0)?;
        check(
            "connection_distance",
            self.connection_distance,
            self.connection_distance > 0.0,
        )?;
        check("base_radius", self.base_radius, self.base_radius > 0.0)?;
        check(
            "pulse_probability",
            self.pulse_probability,
            (0.0..=1.0).contains(&self.pulse_probability),
        )?;
        check(
            "overlay_dim_opacity",
            self.overlay_dim_opacity,
            (0.0..=1.0).contains(&self.overlay_dim_opacity),
        )?;
        check(
            "overlay_fade_rate",
            self.overlay_fade_rate,
            self.overlay_fade_rate > 0.0 && self.overlay_fade_rate <= 1.0,
        )?;
        Ok(())
    }

    /// Applies one live-tunable value, clamped to a safe range.
    ///
    /// Returns `false` for unknown keys and non-finite values. Scene-shaping
    /// keys (point count, radius) take effect on the next reseed.
    pub fn set_key(&mut self, key: &str, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match key {
            "point_count" => self.point_count = value.clamp(1.0, 2000.0) as usize,
            "radius_fraction" => self.radius_fraction = value.clamp(0.05, 1.0),
            "focal_length" => self.focal_length = value.clamp(50.0, 5000.0),
            "base_rotation_speed" => self.base_rotation_speed = value.clamp(0.0, 0.05),
            "drag_sensitivity" => self.drag_sensitivity = value.clamp(0.0001, 0.05),
            "friction" => self.friction = value.clamp(0.5, 0.999),
            "hit_radius_px" => self.hit_radius_px = value.clamp(1.0, 200.0),
            "connection_distance" => self.connection_distance = value.clamp(1.0, 1000.0),
            "pulse_probability" => self.pulse_probability = value.clamp(0.0, 1.0),
            "preserve_selection" => {
                self.selection_policy = if value > 0.5 {
                    SelectionPolicy::Preserve
                } else {
                    SelectionPolicy::Reset
                }
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig};
    use crate::selection::SelectionPolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_stable() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.point_count, 300);
        assert_eq!(cfg.connection_distance, 110.0);
        assert_eq!(cfg.focal_length, 500.0);
        assert_eq!(cfg.friction, 0.95);
        assert_eq!(cfg.hit_radius_px, 30.0);
        assert_eq!(cfg.click_threshold_px, 5.0);
        assert_eq!(cfg.selection_policy, SelectionPolicy::Reset);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "point_count": 120, "selection_policy": "preserve" }"#)
            .expect("valid override");
        assert_eq!(
            cfg,
            EngineConfig {
                point_count: 120,
                selection_policy: SelectionPolicy::Preserve,
                ..EngineConfig::default()
            }
        );
    }

    #[test]
    fn rejects_friction_that_would_not_decay() {
        let err = EngineConfig::from_json(r#"{ "friction": 1.0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                field: "friction",
                value: 1.0
            }
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn set_key_clamps_and_reports_unknown_keys() {
        let mut cfg = EngineConfig::default();
        assert!(cfg.set_key("friction", 2.0));
        assert_eq!(cfg.friction, 0.999);
        assert!(cfg.set_key("preserve_selection", 1.0));
        assert_eq!(cfg.selection_policy, SelectionPolicy::Preserve);
        assert!(!cfg.set_key("warp_speed", 9.0));
        assert!(cfg.validate().is_ok());
    }
}

//! Surface tuning and detail presets
//!
//! Loaded from JSON so the feel of the disk can be tuned without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Mesh detail levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DetailPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl DetailPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailPreset::Low => "Low",
            DetailPreset::Medium => "Medium",
            DetailPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(DetailPreset::Low),
            "medium" | "med" => Some(DetailPreset::Medium),
            "high" => Some(DetailPreset::High),
            _ => None,
        }
    }

    /// Requested vertex count (excluding the center)
    pub fn vertex_count(&self) -> u32 {
        match self {
            DetailPreset::Low => 120,
            DetailPreset::Medium => 400,
            DetailPreset::High => VERTEX_COUNT,
        }
    }

    /// Number of concentric rings
    pub fn row_count(&self) -> u32 {
        match self {
            DetailPreset::Low => 4,
            DetailPreset::Medium => 8,
            DetailPreset::High => ROW_COUNT,
        }
    }
}

/// Tuning for one deformable disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Detail preset the vertex/row counts were derived from
    pub detail: DetailPreset,

    // === Topology ===
    /// Disk radius in local units
    pub radius: f32,
    /// Requested vertex count (bumped until divisible by `row_count`)
    pub vertex_count: u32,
    /// Number of concentric rings
    pub row_count: u32,

    // === Relaxation ===
    /// Scale applied to the summed spring force
    pub stiffness: f32,
    /// Weight of the pull toward rest position
    pub rest_pull: f32,

    // === Stretch ===
    /// Displacement per correction iteration
    pub stretch_step: f32,
    /// Easing decay along the selection ordering
    pub stretch_decay: f32,
    /// Easing offset gain per unit of raw pointer delta
    pub contact_gain: f32,
    /// Lead vertex distance at which stretching stops
    pub stretch_tolerance: f32,
    /// Iteration cap for the correction loop
    pub max_correction_steps: u32,

    // === Launch ===
    /// Translation speed multiplier after release
    pub launch_speed: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::from_preset(DetailPreset::default())
    }
}

impl SurfaceConfig {
    /// Create a config from a detail preset (applies preset counts)
    pub fn from_preset(preset: DetailPreset) -> Self {
        Self {
            detail: preset,
            radius: DISK_RADIUS,
            vertex_count: preset.vertex_count(),
            row_count: preset.row_count(),
            stiffness: STIFFNESS,
            rest_pull: REST_PULL,
            stretch_step: STRETCH_STEP,
            stretch_decay: STRETCH_DECAY,
            contact_gain: CONTACT_GAIN,
            stretch_tolerance: STRETCH_TOLERANCE,
            max_correction_steps: MAX_CORRECTION_STEPS,
            launch_speed: LAUNCH_SPEED,
        }
    }

    /// Apply a detail preset (updates the vertex and row counts)
    pub fn apply_preset(&mut self, preset: DetailPreset) {
        self.detail = preset;
        self.vertex_count = preset.vertex_count();
        self.row_count = preset.row_count();
    }

    /// Parse and validate a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded surface config from {}", path.display());
        Ok(config)
    }

    /// Replace values the simulation cannot run with by their defaults.
    ///
    /// For configs built in code, which never pass through [`Self::load`].
    pub fn sanitized(mut self) -> Self {
        fn positive_or(field: &str, value: &mut f32, default: f32) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Surface config `{field}` = {value} is invalid, using {default}");
                *value = default;
            }
        }

        positive_or("radius", &mut self.radius, DISK_RADIUS);
        positive_or("stiffness", &mut self.stiffness, STIFFNESS);
        positive_or("stretch_step", &mut self.stretch_step, STRETCH_STEP);
        positive_or("stretch_tolerance", &mut self.stretch_tolerance, STRETCH_TOLERANCE);
        if !self.rest_pull.is_finite() || self.rest_pull < 0.0 {
            log::warn!(
                "Surface config `rest_pull` = {} is invalid, using {REST_PULL}",
                self.rest_pull
            );
            self.rest_pull = REST_PULL;
        }
        if self.vertex_count > MAX_VERTEX_COUNT || self.row_count > MAX_VERTEX_COUNT {
            log::warn!("Surface config mesh size clamped to {MAX_VERTEX_COUNT}");
            self.vertex_count = self.vertex_count.min(MAX_VERTEX_COUNT);
            self.row_count = self.row_count.min(MAX_VERTEX_COUNT);
        }
        self
    }

    /// Reject values the simulation cannot silently correct
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive finite number, got {value}"),
                })
            }
        }

        positive("radius", self.radius)?;
        positive("stiffness", self.stiffness)?;
        positive("stretch_step", self.stretch_step)?;
        positive("stretch_tolerance", self.stretch_tolerance)?;
        if self.row_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "row_count",
                reason: "at least one ring is required".to_string(),
            });
        }
        if self.vertex_count > MAX_VERTEX_COUNT || self.row_count > MAX_VERTEX_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "vertex_count",
                reason: format!("vertex and ring counts are limited to {MAX_VERTEX_COUNT}"),
            });
        }
        if !self.rest_pull.is_finite() || self.rest_pull < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "rest_pull",
                reason: format!("must be non-negative, got {}", self.rest_pull),
            });
        }
        Ok(())
    }
}

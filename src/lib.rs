//! Stretchy Disk - a pointer-deformable radial spring mesh
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (topology, contact, stretch, relaxation, orientation)
//! - `render`: Render sink trait and GPU-ready vertex packing
//! - `config`: Data-driven surface tuning

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::{DetailPreset, SurfaceConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep used by the demo loop (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the integrator; the undamped springs go unstable above this
    pub const MAX_FRAME_DT: f32 = 1.0 / 60.0;

    /// Default disk radius in local units
    pub const DISK_RADIUS: f32 = 1.0;
    /// Default vertex count (excluding the center)
    pub const VERTEX_COUNT: u32 = 1000;
    /// Default number of concentric rings
    pub const ROW_COUNT: u32 = 10;
    /// Largest vertex or ring count a config may request
    pub const MAX_VERTEX_COUNT: u32 = 1 << 20;

    /// Spring stiffness applied to the summed force
    pub const STIFFNESS: f32 = 1000.0;
    /// Weight of the pull back toward each vertex's rest position
    pub const REST_PULL: f32 = 0.5;

    /// Displacement per correction iteration
    pub const STRETCH_STEP: f32 = 0.1;
    /// Easing decay along the selection ordering
    pub const STRETCH_DECAY: f32 = 0.25;
    /// Easing offset gain per unit of raw pointer delta
    pub const CONTACT_GAIN: f32 = 15.0;
    /// Lead vertex distance at which the correction loop stops
    pub const STRETCH_TOLERANCE: f32 = 0.10001;
    /// Hard cap on correction iterations per pointer sample
    pub const MAX_CORRECTION_STEPS: u32 = 256;

    /// Translation speed multiplier for a released slingshot
    pub const LAUNCH_SPEED: f32 = 1.0;
}

/// Wrap a ring-relative index into `[0, ring_size)`.
///
/// Every ring-boundary lookup goes through this so slot `-1` is the last
/// vertex of the ring and slot `ring_size` is the first.
#[inline]
pub fn wrap(index: i64, ring_size: u32) -> u32 {
    index.rem_euclid(ring_size as i64) as u32
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

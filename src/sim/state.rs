//! Surface state: everything one deformable disk carries between frames

use glam::Vec2;
use serde::Serialize;

use super::contact::ContactState;
use super::launch::Launcher;
use super::relax::displacement_energy;
use super::topology::RingTopology;
use super::view::Placement;
use crate::config::SurfaceConfig;

/// One deformable disk
#[derive(Debug, Clone, Serialize)]
pub struct Surface {
    pub config: SurfaceConfig,
    pub(crate) topology: RingTopology,
    /// Current vertex positions in local space, index 0 is the center
    pub(crate) positions: Vec<Vec2>,
    pub(crate) velocities: Vec<Vec2>,
    pub(crate) accelerations: Vec<Vec2>,
    pub(crate) contact: ContactState,
    /// Rim vertices currently driven by the pointer, lead first
    pub(crate) selection: Vec<u32>,
    /// `pinned[i]` mirrors `selection.contains(i)` for the relaxation loop
    pub(crate) pinned: Vec<bool>,
    pub(crate) placement: Placement,
    pub(crate) launcher: Launcher,
    /// Frames simulated so far
    pub frame: u64,
}

impl Surface {
    /// Generate a disk at rest from `config`; invalid values fall back to defaults
    pub fn new(config: SurfaceConfig) -> Self {
        let config = config.sanitized();
        let topology = RingTopology::generate(config.radius, config.vertex_count, config.row_count);
        let n = topology.len();
        Self {
            config,
            positions: topology.rest.clone(),
            velocities: vec![Vec2::ZERO; n],
            accelerations: vec![Vec2::ZERO; n],
            topology,
            contact: ContactState::Idle,
            selection: Vec::new(),
            pinned: vec![false; n],
            placement: Placement::default(),
            launcher: Launcher::default(),
            frame: 0,
        }
    }

    /// Place the disk in the world
    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.placement.translation = translation;
        self
    }

    #[inline]
    pub fn topology(&self) -> &RingTopology {
        &self.topology
    }

    /// Vertex positions for the render sink
    #[inline]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    #[inline]
    pub fn triangles(&self) -> &[u32] {
        &self.topology.triangles
    }

    #[inline]
    pub fn rest(&self) -> &[Vec2] {
        &self.topology.rest
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.placement.rotation
    }

    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.placement.translation
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[inline]
    pub fn contact(&self) -> ContactState {
        self.contact
    }

    #[inline]
    pub fn selection(&self) -> &[u32] {
        &self.selection
    }

    /// Current launch aim (zero when at rest)
    #[inline]
    pub fn launch_velocity(&self) -> Vec2 {
        self.launcher.velocity
    }

    /// Halt any slingshot motion
    pub fn stop_motion(&mut self) {
        self.launcher.stop();
    }

    /// Suppress (or re-enable) launching on release
    pub fn pause_controls(&mut self, paused: bool) {
        self.launcher.set_paused(paused);
    }

    /// Displace one vertex directly (e.g. an impact nudge); it springs back
    pub fn nudge(&mut self, index: u32, offset: Vec2) {
        if let Some(p) = self.positions.get_mut(index as usize) {
            if offset.is_finite() {
                *p += offset;
            }
        }
    }

    /// Sum of squared distances from the rest shape
    pub fn displacement_energy(&self) -> f32 {
        displacement_energy(&self.positions, &self.topology.rest)
    }

    pub(crate) fn set_selection_pins(&mut self) {
        self.pinned.fill(false);
        for &i in &self.selection {
            self.pinned[i as usize] = true;
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.pinned.fill(false);
        }
    }
}

//! Spring relaxation toward the rest shape
//!
//! Each free vertex is pushed by its springs (rest length minus current
//! length, along the edge) and pulled toward its own rest position. There is
//! no explicit damping: the rest pull and the discrete step are what settle the
//! wobble.
//!
//! Integration is loose: position advances by `½·a·dt²` using the
//! acceleration from the previous frame, and velocity is overwritten with
//! `a·dt` rather than accumulated.

use glam::Vec2;

use super::topology::{Adjacency, CENTER};

/// Per-vertex buffers the relaxation writes
pub struct Dynamics<'a> {
    pub positions: &'a mut [Vec2],
    pub velocities: &'a mut [Vec2],
    pub accelerations: &'a mut [Vec2],
}

/// Spring constants for one relaxation pass
#[derive(Debug, Clone, Copy)]
pub struct SpringParams {
    pub stiffness: f32,
    pub rest_pull: f32,
}

/// Net spring force on `index` at the current positions
pub fn spring_force(
    index: usize,
    positions: &[Vec2],
    rest: &[Vec2],
    adjacency: &Adjacency,
    rest_pull: f32,
) -> Vec2 {
    let here = positions[index];
    let mut force = Vec2::ZERO;
    for edge in adjacency.edges() {
        let offset = here - positions[edge.neighbor as usize];
        // Coincident vertices have no direction: contributes nothing
        force += (edge.rest_length - offset.length()) * offset.normalize_or_zero();
    }
    force + rest_pull * (rest[index] - here)
}

/// Relax every vertex except the center and the `pinned` ones, in index order.
///
/// Vertices are updated in place, so later vertices see the positions their
/// lower-indexed neighbours already moved to this frame.
pub fn relax(
    dynamics: Dynamics<'_>,
    rest: &[Vec2],
    adjacency: &[Adjacency],
    pinned: &[bool],
    params: SpringParams,
    dt: f32,
) {
    let Dynamics {
        positions,
        velocities,
        accelerations,
    } = dynamics;

    for index in 0..positions.len() {
        if index == CENTER as usize || pinned[index] {
            continue;
        }

        let acc = accelerations[index];
        positions[index] += 0.5 * acc * dt * dt;
        velocities[index] = acc * dt;

        let force = spring_force(index, positions, rest, &adjacency[index], params.rest_pull);
        accelerations[index] = params.stiffness * force;
    }
}

/// Sum of squared distances from rest, a convergence measure
pub fn displacement_energy(positions: &[Vec2], rest: &[Vec2]) -> f32 {
    positions
        .iter()
        .zip(rest)
        .map(|(p, r)| p.distance_squared(*r))
        .sum()
}

//! Pointer contact tracking
//!
//! One contact at a time drives the disk. The contact is an explicit state
//! machine so stray samples (a move or release with no matching press) have a
//! defined meaning: they are ignored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::topology::RingTopology;
use crate::wrap;

/// Phase of a raw pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One pointer sample in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub screen: Vec2,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, screen: Vec2) -> Self {
        Self { phase, screen }
    }
}

/// Lifecycle of the single contact
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ContactState {
    /// No contact owns the mesh
    #[default]
    Idle,
    /// A contact that began inside the disk is being dragged
    Dragging {
        /// Previous pointer sample in local space
        anchor: Vec2,
        /// Pointer has been outside the bounding shape during this drag
        has_left: bool,
    },
}

impl ContactState {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, ContactState::Dragging { .. })
    }
}

/// What the tracker decided for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactAction {
    /// Nothing to do
    None,
    /// A new contact began; the selection must be rebuilt around `at`
    Begin { at: Vec2 },
    /// The pointer moved outside the disk from `from` to `to`
    Stretch { from: Vec2, to: Vec2 },
    /// The pointer lifted while dragging
    Release,
    /// The pointer came back inside the disk; the drag ends early
    Reenter,
}

/// Local-space hit test against the bounding circle
#[inline]
pub fn hit_test(local: Vec2, bounding_radius: f32) -> bool {
    local.length() <= bounding_radius
}

/// Advance the contact state machine for one local-space sample.
pub fn advance(
    state: &mut ContactState,
    phase: PointerPhase,
    local: Vec2,
    bounding_radius: f32,
) -> ContactAction {
    if !local.is_finite() {
        return ContactAction::None;
    }
    let inside = hit_test(local, bounding_radius);

    match (phase, *state) {
        (PointerPhase::Began, _) => {
            if inside {
                *state = ContactState::Dragging {
                    anchor: local,
                    has_left: false,
                };
                log::debug!("Contact began at {local}");
                ContactAction::Begin { at: local }
            } else {
                *state = ContactState::Idle;
                ContactAction::None
            }
        }
        (PointerPhase::Moved, ContactState::Dragging { anchor, has_left }) => {
            if inside {
                if has_left {
                    *state = ContactState::Idle;
                    log::debug!("Contact re-entered disk at {local}");
                    ContactAction::Reenter
                } else {
                    *state = ContactState::Dragging {
                        anchor: local,
                        has_left,
                    };
                    ContactAction::None
                }
            } else {
                *state = ContactState::Dragging {
                    anchor: local,
                    has_left: true,
                };
                ContactAction::Stretch {
                    from: anchor,
                    to: local,
                }
            }
        }
        (PointerPhase::Ended | PointerPhase::Cancelled, ContactState::Dragging { .. }) => {
            *state = ContactState::Idle;
            log::debug!("Contact released at {local}");
            ContactAction::Release
        }
        (_, ContactState::Idle) => ContactAction::None,
    }
}

/// Outer-ring vertex nearest to `local`, judged by current positions
pub fn nearest_outer_vertex(topology: &RingTopology, positions: &[Vec2], local: Vec2) -> u32 {
    topology
        .outer_ring()
        .min_by(|&a, &b| {
            let da = positions[a as usize].distance_squared(local);
            let db = positions[b as usize].distance_squared(local);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(1)
}

/// Build the stretch selection around outer-ring vertex `lead`.
///
/// Order: `lead`, then pairs `(lead+1, lead-1)`, `(lead+2, lead-2)`, ... around
/// the rim, each rim vertex exactly once. With an even ring the vertex opposite
/// `lead` closes the list on its own.
pub fn build_selection(topology: &RingTopology, lead: u32, selection: &mut Vec<u32>) {
    let vpr = topology.verts_per_row;
    let (_, slot) = topology.ring_of(lead);
    let slot = slot as i64;

    selection.clear();
    selection.push(lead);
    for j in 1..=(vpr / 2) as i64 {
        let right = 1 + wrap(slot + j, vpr);
        let left = 1 + wrap(slot - j, vpr);
        selection.push(right);
        if left != right {
            selection.push(left);
        }
    }
}

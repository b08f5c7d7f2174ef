//! Frame-stepped disk simulation
//!
//! Everything here is pure and single-threaded:
//! - Explicit inputs only (pointer, view, bounding radius, dt)
//! - Stable iteration order (by vertex index)
//! - No rendering or platform dependencies

pub mod contact;
pub mod launch;
pub mod orient;
pub mod relax;
pub mod state;
pub mod stretch;
pub mod tick;
pub mod topology;
pub mod view;

pub use contact::{ContactState, PointerPhase, PointerSample};
pub use launch::Launcher;
pub use state::Surface;
pub use stretch::{StretchCurve, StretchReport};
pub use tick::{FrameInput, tick};
pub use topology::{Adjacency, CENTER, Edge, MAX_DEGREE, RingTopology};
pub use view::{Placement, ViewTransform};

//! Ring topology generation for the disk mesh
//!
//! The disk is a center vertex plus `rows` concentric rings of `verts_per_row`
//! vertices. Ring 0 is the outer rim at full radius; each ring inward shrinks by
//! `radius / rows` and is rotated half an angular step so neighbouring rings
//! interleave and the strip between them zig-zags cleanly.
//!
//! Vertex `1 + r * verts_per_row + k` is slot `k` of ring `r`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::{polar_to_cartesian, wrap};

/// Index of the center vertex
pub const CENTER: u32 = 0;

/// Max edges per vertex (center excepted)
pub const MAX_DEGREE: usize = 5;

/// Fewest vertices any ring may have
pub const MIN_VERTS_PER_ROW: u32 = 3;

/// Fraction of the `1 / rows` gap kept clear between the ring radius ratio
/// and `cos(PI / vpr)`
const WINDING_MARGIN: f64 = 1e-4;

/// One spring to a neighbouring vertex
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    pub neighbor: u32,
    /// Distance between the two endpoints at generation time
    pub rest_length: f32,
}

/// Fixed-capacity neighbour list for one vertex
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Adjacency {
    edges: [Edge; MAX_DEGREE],
    len: u8,
}

impl Adjacency {
    fn push(&mut self, edge: Edge) {
        debug_assert!((self.len as usize) < MAX_DEGREE, "vertex degree exceeds MAX_DEGREE");
        self.edges[self.len as usize] = edge;
        self.len += 1;
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, neighbor: u32) -> bool {
        self.edges().iter().any(|e| e.neighbor == neighbor)
    }
}

/// Generated disk topology (immutable after creation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingTopology {
    /// Disk radius the rings were generated at
    pub radius: f32,
    /// Vertex count after adjustment, excluding the center
    pub vertex_count: u32,
    pub row_count: u32,
    pub verts_per_row: u32,
    /// Rest positions, index 0 is the center
    pub rest: Vec<Vec2>,
    /// Triangle list, 3 indices per face, clockwise
    pub triangles: Vec<u32>,
    /// Per-vertex springs; the center entry is always empty
    pub adjacency: Vec<Adjacency>,
}

impl RingTopology {
    /// Generate the disk for a requested vertex and ring count.
    ///
    /// `vertex_count` is bumped until it divides evenly into `row_count` rings
    /// of at least [`min_verts_per_row`] vertices. `row_count` of zero is
    /// treated as one ring.
    ///
    /// The ring-size floor can raise small requests well past the next
    /// multiple of `row_count` (20 vertices over 10 rings becomes 70): with
    /// fewer vertices per ring the outer strip folds over itself and its faces
    /// lose their clockwise winding.
    pub fn generate(radius: f32, vertex_count: u32, row_count: u32) -> Self {
        let rows = row_count.max(1);
        let vpr = vertex_count.div_ceil(rows).max(min_verts_per_row(rows));
        let count = vpr.saturating_mul(rows);
        if count != vertex_count {
            log::warn!(
                "Adjusted vertex count {} -> {} for {} rings",
                vertex_count,
                count,
                rows
            );
        }

        let rest = generate_positions(radius, rows, vpr);
        let triangles = generate_triangles(rows, vpr);
        let adjacency = generate_adjacency(&rest, rows, vpr);

        log::info!(
            "Generated disk: {} vertices, {} rings of {}, {} triangles",
            rest.len(),
            rows,
            vpr,
            triangles.len() / 3
        );

        Self {
            radius,
            vertex_count: count,
            row_count: rows,
            verts_per_row: vpr,
            rest,
            triangles,
            adjacency,
        }
    }

    /// Vertex index of ring `ring`, slot `slot` (slot wraps around the ring)
    #[inline]
    pub fn index(&self, ring: u32, slot: i64) -> u32 {
        ring_index(self.verts_per_row, ring, slot)
    }

    /// Ring and slot of a non-center vertex
    #[inline]
    pub fn ring_of(&self, index: u32) -> (u32, u32) {
        debug_assert!(index != CENTER);
        ((index - 1) / self.verts_per_row, (index - 1) % self.verts_per_row)
    }

    /// Indices of the outer rim, in slot order
    pub fn outer_ring(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.verts_per_row
    }

    /// Total number of positions including the center
    #[inline]
    pub fn len(&self) -> usize {
        self.rest.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Smallest ring size whose zig-zag strip keeps every face clockwise.
///
/// The face `(r,k), (r+1,k), (r,k+1)` flips once the inner ring radius reaches
/// `cos(PI / vpr)` of the outer one; the outermost pair of rings has the
/// largest ratio, `(rows - 1) / rows`. Solved directly for the smallest `vpr`
/// with `PI / vpr < acos(ratio)`.
pub fn min_verts_per_row(rows: u32) -> u32 {
    let rows = f64::from(rows.max(1));
    let ratio = 1.0 - (1.0 - WINDING_MARGIN) / rows;
    let vpr = (std::f64::consts::PI / ratio.acos()).floor() + 1.0;
    // `as` saturates; the ratio never reaches 1.0 for a u32 row count
    (vpr as u32).max(MIN_VERTS_PER_ROW)
}

#[inline]
fn ring_index(vpr: u32, ring: u32, slot: i64) -> u32 {
    1 + ring * vpr + wrap(slot, vpr)
}

fn generate_positions(radius: f32, rows: u32, vpr: u32) -> Vec<Vec2> {
    let step = TAU / vpr as f32;
    let mut rest = Vec::with_capacity(rows as usize * vpr as usize + 1);
    rest.push(Vec2::ZERO);
    for r in 0..rows {
        let ring_radius = radius * (1.0 - r as f32 / rows as f32);
        let offset = r as f32 * (PI / vpr as f32);
        for k in 0..vpr {
            rest.push(polar_to_cartesian(ring_radius, k as f32 * step + offset));
        }
    }
    rest
}

fn generate_triangles(rows: u32, vpr: u32) -> Vec<u32> {
    let mut tris = Vec::with_capacity(3 * vpr as usize * (2 * rows as usize - 1));
    for r in 0..rows - 1 {
        for k in 0..vpr as i64 {
            let here = ring_index(vpr, r, k);
            let inner_left = ring_index(vpr, r + 1, k - 1);
            let inner = ring_index(vpr, r + 1, k);
            let right = ring_index(vpr, r, k + 1);
            tris.extend_from_slice(&[here, inner_left, inner]);
            tris.extend_from_slice(&[here, inner, right]);
        }
    }
    let innermost = rows - 1;
    for k in 0..vpr as i64 {
        tris.extend_from_slice(&[
            ring_index(vpr, innermost, k),
            ring_index(vpr, innermost, k - 1),
            CENTER,
        ]);
    }
    tris
}

fn generate_adjacency(rest: &[Vec2], rows: u32, vpr: u32) -> Vec<Adjacency> {
    let edge = |from: u32, to: u32| Edge {
        neighbor: to,
        rest_length: (rest[to as usize] - rest[from as usize]).length(),
    };

    let mut adjacency = vec![Adjacency::default(); rest.len()];
    for r in 0..rows {
        for k in 0..vpr as i64 {
            let i = ring_index(vpr, r, k);
            let adj = &mut adjacency[i as usize];
            adj.push(edge(i, ring_index(vpr, r, k - 1)));
            adj.push(edge(i, ring_index(vpr, r, k + 1)));
            if r > 0 {
                adj.push(edge(i, ring_index(vpr, r - 1, k)));
            }
            if r + 1 < rows {
                adj.push(edge(i, ring_index(vpr, r + 1, k)));
            } else {
                adj.push(edge(i, CENTER));
            }
        }
    }
    adjacency
}

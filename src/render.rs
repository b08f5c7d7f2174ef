//! Render output for the disk
//!
//! The renderer is owned elsewhere; it receives the vertex positions, the
//! static triangle list and the rigid placement through [`RenderSink`].

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::{Placement, Surface};

/// Everything a renderer needs for one frame of the disk
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// Local-space positions, index 0 is the center
    pub positions: &'a [Vec2],
    /// Fixed triangle list (clockwise)
    pub triangles: &'a [u32],
    pub placement: Placement,
}

/// Consumer of per-frame disk geometry
pub trait RenderSink {
    fn submit(&mut self, frame: FrameData<'_>);
}

/// Hand the current surface state to a sink
pub fn submit_frame<S: RenderSink + ?Sized>(surface: &Surface, sink: &mut S) {
    sink.submit(FrameData {
        positions: surface.positions(),
        triangles: surface.triangles(),
        placement: surface.placement(),
    });
}

/// GPU vertex: local position plus a stretch-tinted color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DiskVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl DiskVertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for the disk
pub mod colors {
    pub const REST: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const STRETCHED: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
}

/// Tint by how far a vertex is from rest, relative to the disk radius
fn stretch_color(displacement: f32, radius: f32) -> [f32; 4] {
    let t = (displacement / (radius * 0.5)).clamp(0.0, 1.0);
    let mut color = [0.0; 4];
    for (c, (a, b)) in color
        .iter_mut()
        .zip(colors::REST.iter().zip(colors::STRETCHED.iter()))
    {
        *c = a * (1.0 - t) + b * t;
    }
    color
}

/// Build the vertex buffer for the current frame
pub fn pack_vertices(surface: &Surface) -> Vec<DiskVertex> {
    let radius = surface.topology().radius;
    surface
        .positions()
        .iter()
        .zip(surface.rest())
        .map(|(p, r)| DiskVertex::new(p.x, p.y, stretch_color(p.distance(*r), radius)))
        .collect()
}

/// Raw bytes for GPU upload
pub fn vertex_bytes(vertices: &[DiskVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Raw bytes of the index buffer
pub fn index_bytes(triangles: &[u32]) -> &[u8] {
    bytemuck::cast_slice(triangles)
}

/// Sink that keeps the latest frame, for headless runs and tests
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: u64,
    pub positions: Vec<Vec2>,
    pub triangles: Vec<u32>,
    pub placement: Placement,
}

impl RenderSink for FrameRecorder {
    fn submit(&mut self, frame: FrameData<'_>) {
        self.frames += 1;
        self.positions.clear();
        self.positions.extend_from_slice(frame.positions);
        // Triangle list never changes after generation
        if self.triangles.is_empty() {
            self.triangles.extend_from_slice(frame.triangles);
        }
        self.placement = frame.placement;
    }
}

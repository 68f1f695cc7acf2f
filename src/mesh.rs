//! Interleaved vertex records and GPU-resident triangle-strip meshes.
//!
//! # Vertex Layout
//!
//! [`Vertex`] uses the following GPU layout (32 bytes per vertex):
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | color     | Float32x3 | 12     | 1               |
//! | tex_coord | Float32x2 | 24     | 2               |
//!
//! The layout is exposed via [`Vertex::LAYOUT`] for pipeline creation.

use crate::gpu::GpuContext;

/// A vertex carrying position, per-vertex color, and texture coordinates.
///
/// `#[repr(C)]` plus the bytemuck derives guarantee the exact interleaved
/// layout the vertex buffers are uploaded with.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Per-vertex color, multiplied into the fragment output.
    pub color: [f32; 3],
    /// Texture coordinates; the house runs U well past 1 and relies on the
    /// sampler's wrap mode.
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            color,
            tex_coord,
        }
    }

    /// The wgpu vertex buffer layout descriptor for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // tex_coord
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

/// One triangle-strip segment: (first vertex, vertex count).
pub type StripSegment = (u32, u32);

/// Returns true when every strip segment lies within a buffer of
/// `vertex_count` vertices.
pub fn strips_in_bounds(vertex_count: usize, strips: &[StripSegment]) -> bool {
    strips
        .iter()
        .all(|&(first, count)| (first as usize + count as usize) <= vertex_count)
}

/// GPU-resident mesh: one static vertex buffer plus its draw partitioning.
///
/// Each segment is issued as its own triangle-strip draw call, in order.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) strips: Vec<StripSegment>,
}

impl Mesh {
    /// Uploads the vertices and records the strip partitioning.
    ///
    /// # Panics
    ///
    /// Panics if any strip segment reaches past the end of `vertices`; the
    /// geometry tables are compile-time constants, so this is a programmer
    /// error rather than a runtime condition.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex], strips: Vec<StripSegment>) -> Self {
        use wgpu::util::DeviceExt;

        assert!(
            strips_in_bounds(vertices.len(), &strips),
            "strip segment out of bounds for {} vertices",
            vertices.len()
        );

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            vertex_buffer,
            strips,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(size_of::<Vertex>(), 32);
    }

    #[test]
    fn vertex_field_offsets() {
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, color), 12);
        assert_eq!(offset_of!(Vertex, tex_coord), 24);
    }

    #[test]
    fn layout_matches_struct() {
        assert_eq!(Vertex::LAYOUT.array_stride, 32);
        let offsets: Vec<u64> = Vertex::LAYOUT.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }

    #[test]
    fn strip_bounds_checking() {
        assert!(strips_in_bounds(18, &[(0, 10), (10, 8)]));
        assert!(strips_in_bounds(12, &[(0, 12)]));
        assert!(!strips_in_bounds(18, &[(10, 9)]));
        assert!(!strips_in_bounds(0, &[(0, 1)]));
    }
}

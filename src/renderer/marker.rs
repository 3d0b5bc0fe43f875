//! Instance types for marker rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::GeoPoint;

/// One sphere marker: world position, radius and RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl MarkerInstance {
    pub fn new(position: GeoPoint, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            size,
            color,
        }
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.color[3]
    }

    /// Per-instance buffer layout (locations 1-3; location 0 is the mesh vertex)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() + std::mem::size_of::<f32>())
                        as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

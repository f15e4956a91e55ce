//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::BlockColor;

    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PADDLE: [f32; 4] = [0.96, 0.96, 0.86, 1.0]; // Beige
    pub const BALL: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // Yellow
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub fn block(color: BlockColor) -> [f32; 4] {
        match color {
            BlockColor::Blue => [0.0, 0.0, 1.0, 1.0],
            BlockColor::Red => [1.0, 0.0, 0.0, 1.0],
            BlockColor::Gold => [1.0, 0.84, 0.0, 1.0],
            BlockColor::Purple => [0.5, 0.0, 0.5, 1.0],
            BlockColor::Pink => [1.0, 0.75, 0.8, 1.0],
            BlockColor::Lime => [0.0, 1.0, 0.0, 1.0],
            BlockColor::Green => [0.0, 0.5, 0.0, 1.0],
            BlockColor::Orange => [1.0, 0.65, 0.0, 1.0],
        }
    }
}

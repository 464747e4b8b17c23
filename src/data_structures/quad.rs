//! The four quads of the scene.
//!
//! Every quad is four vertices with an interleaved position, colour and
//! texture coordinate, drawn as two triangles through [`QUAD_INDICES`]. The
//! quads are deliberately stretched along the depth axis so that a single
//! surface covers several mip levels at once.

use wgpu::util::DeviceExt;

use crate::data_structures::Vertex;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
}

impl Vertex for QuadVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub type QuadVertices = [QuadVertex; 4];

/// Two triangles sharing the v1-v3 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

const fn quad(positions: [[f32; 3]; 4]) -> QuadVertices {
    [
        QuadVertex {
            position: positions[0],
            color: RED,
            tex_coords: [1.0, 1.0],
        },
        QuadVertex {
            position: positions[1],
            color: GREEN,
            tex_coords: [1.0, 0.0],
        },
        QuadVertex {
            position: positions[2],
            color: BLUE,
            tex_coords: [0.0, 0.0],
        },
        QuadVertex {
            position: positions[3],
            color: YELLOW,
            tex_coords: [0.0, 1.0],
        },
    ]
}

#[rustfmt::skip]
pub const QUADS: [QuadVertices; 4] = [
    // a strip running from right in front of the camera far into the distance
    quad([[ 0.5,  0.5,   2.0], [ 0.5, -0.5, -10.0], [-0.5, -0.5, -10.0], [-0.5,  0.5,   2.0]]),
    // small and close, facing the camera
    quad([[ 0.7,  0.3,   2.0], [ 0.7, -0.3,   2.0], [ 0.4, -0.3,   2.0], [ 0.4,  0.3,   2.0]]),
    // a wall far off to the left
    quad([[-11.0, 3.3, -15.0], [-11.0, -3.3, -13.0], [-5.0, -3.3, -13.0], [-5.0,  3.3, -15.0]]),
    // a floor seen at a grazing angle
    quad([[ 0.5, -0.8, -15.0], [ 0.5, -1.0,   1.0], [-0.5, -1.0,   1.0], [-0.5, -0.8, -15.0]]),
];

/// GPU buffers of a single quad. Released when dropped.
#[derive(Debug)]
pub struct QuadMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl QuadMesh {
    pub fn new(device: &wgpu::Device, name: &str, vertices: &QuadVertices) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: QUAD_INDICES.len() as u32,
        }
    }

    /// Upload every quad in `quads` into its own set of buffers.
    pub fn upload_all(device: &wgpu::Device, quads: &[QuadVertices]) -> Vec<QuadMesh> {
        quads
            .iter()
            .enumerate()
            .map(|(idx, vertices)| QuadMesh::new(device, &format!("Quad {idx}"), vertices))
            .collect()
    }
}

pub trait DrawQuad {
    fn draw_quad(&mut self, quad: &QuadMesh);
}

impl DrawQuad for wgpu::RenderPass<'_> {
    fn draw_quad(&mut self, quad: &QuadMesh) {
        self.set_vertex_buffer(0, quad.vertex_buffer.slice(..));
        self.set_index_buffer(quad.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..quad.num_elements, 0, 0..1);
    }
}

//! GPU-side copy of a procedural mesh.

use crate::context::Context;
use crate::procedural::RenderMesh;
use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout shared by the mesh and point pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout matching `MeshVertex`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Vertex and index buffers uploaded from a [`RenderMesh`].
///
/// Point clouds have no index buffer and are drawn vertex by vertex.
pub struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
    num_vertices: u32,
    num_indices: u32,
}

impl GpuMesh {
    /// Uploads `mesh` to the GPU.
    pub fn upload(label: &str, mesh: &RenderMesh) -> GpuMesh {
        let ctxt = Context::get();
        let vertices: Vec<MeshVertex> = mesh
            .coords
            .iter()
            .zip(&mesh.normals)
            .map(|(c, n)| MeshVertex {
                position: c.to_array(),
                normal: n.to_array(),
            })
            .collect();

        let vertex_buffer = ctxt.create_buffer_init(
            Some(label),
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        );

        let indices = (!mesh.is_point_cloud()).then(|| {
            ctxt.create_buffer_init(
                Some(label),
                bytemuck::cast_slice(&mesh.indices),
                wgpu::BufferUsages::INDEX,
            )
        });

        GpuMesh {
            vertices: vertex_buffer,
            indices,
            num_vertices: vertices.len() as u32,
            num_indices: mesh.indices.len() as u32 * 3,
        }
    }

    /// Records the draw call of this mesh into `pass`.
    ///
    /// The pipeline and bind groups must already be set.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));

        match &self.indices {
            Some(indices) => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.num_indices, 0, 0..1);
            }
            None => pass.draw(0..self.num_vertices, 0..1),
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    #[inline]
    pub fn is_point_cloud(&self) -> bool {
        self.indices.is_none()
    }
}

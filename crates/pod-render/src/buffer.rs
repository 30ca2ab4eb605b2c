//! Vertex and index buffers for the scene meshes.

use std::collections::HashMap;

use pod_scene::{MeshData, MeshId, Vertex};
use wgpu::util::DeviceExt;

/// One mesh uploaded to the GPU with 32-bit indices.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Vertex buffer layout matching [`Vertex`]: position, normal, uv at locations 0..=2.
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// The shared startup meshes, keyed by [`MeshId`].
#[derive(Default)]
pub struct MeshLibrary {
    meshes: HashMap<MeshId, MeshBuffer>,
}

impl MeshLibrary {
    /// Generate and upload every [`MeshId`].
    pub fn upload_all(device: &wgpu::Device) -> Self {
        let mut library = Self::default();
        for id in MeshId::ALL {
            let data = id.build();
            log::debug!(
                "Uploading mesh '{}' ({} vertices, {} triangles)",
                id.label(),
                data.vertices.len(),
                data.triangle_count()
            );
            library.insert(id, MeshBuffer::upload(device, id.label(), &data));
        }
        library
    }

    pub fn insert(&mut self, id: MeshId, mesh: MeshBuffer) {
        self.meshes.insert(id, mesh);
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshBuffer> {
        self.meshes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::create_test_device;

    #[test]
    fn test_vertex_layout_matches_vertex() {
        let layout = vertex_layout();
        // position (3) + normal (3) + uv (2) floats
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[2].shader_location, 2);
    }

    #[test]
    fn test_upload_keeps_index_count() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let cube = pod_scene::geometry::cube();
        let mesh = MeshBuffer::upload(&device, "cube", &cube);
        assert_eq!(mesh.index_count, 36);
        assert_eq!(mesh.vertex_buffer.size(), 24 * 32);
    }

    #[test]
    fn test_library_holds_every_mesh() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let library = MeshLibrary::upload_all(&device);
        assert_eq!(library.len(), MeshId::ALL.len());
        assert_eq!(
            library.get(MeshId::Planet).map(|m| m.index_count),
            Some(64 * 32 * 6)
        );
    }

    #[test]
    fn test_empty_library_misses() {
        let library = MeshLibrary::default();
        assert!(library.is_empty());
        assert!(library.get(MeshId::Moon).is_none());
    }
}

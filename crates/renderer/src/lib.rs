//! Renderer: headless wgpu device used to upload loaded meshes.
//! wgpu = 0.26.x

use anyhow::{Context, Result};
use asset::{MeshData, MeshDevice, MeshVertex};
use wgpu::{
    util::DeviceExt, AdapterInfo, Backends, Buffer, BufferUsages, Device, DeviceDescriptor,
    Features, IndexFormat, Instance, InstanceDescriptor, Limits, PowerPreference,
    VertexBufferLayout, VertexStepMode,
};

/// Vertex buffer layout matching [`MeshVertex`]: position, normal, uv.
pub const MESH_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<MeshVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
};

/// Index format produced by the OBJ loader.
pub const MESH_INDEX_FORMAT: IndexFormat = IndexFormat::Uint32;

/// GPU buffers created for one mesh.
#[derive(Debug)]
pub struct GpuMeshBuffers {
    pub vertex_buf: Buffer,
    pub index_buf: Buffer,
    pub index_count: u32,
    pub index_format: IndexFormat,
}

/// Device without a surface; only used to create buffers.
pub struct GpuContext {
    device: Device,
    adapter_info: AdapterInfo,
}

impl GpuContext {
    /// Request an adapter and device on one of `backends`.
    pub async fn new(backends: Backends) -> Result<Self> {
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        let adapter_info = adapter.get_info();

        let (device, _queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Svarog3D Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        log::info!(
            "GPU device ready: {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        Ok(Self {
            device,
            adapter_info,
        })
    }

    /// Blocking wrapper around [`GpuContext::new`].
    pub fn new_blocking(backends: Backends) -> Result<Self> {
        pollster::block_on(Self::new(backends))
    }

    #[inline]
    pub fn adapter_info(&self) -> &AdapterInfo {
        &self.adapter_info
    }
}

impl MeshDevice for GpuContext {
    type Buffers = GpuMeshBuffers;

    fn create_buffers(&self, data: &MeshData) -> GpuMeshBuffers {
        let vertex_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh VB"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: BufferUsages::VERTEX,
            });
        let index_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh IB"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: BufferUsages::INDEX,
            });
        log::debug!(
            "Uploaded mesh: {} vertices, {} indices",
            data.vertices.len(),
            data.indices.len()
        );

        GpuMeshBuffers {
            vertex_buf,
            index_buf,
            index_count: data.indices.len() as u32,
            index_format: MESH_INDEX_FORMAT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_mesh_vertex() {
        assert_eq!(MESH_VERTEX_LAYOUT.array_stride, 32);
        let offsets: Vec<u64> = MESH_VERTEX_LAYOUT.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
        let locations: Vec<u32> = MESH_VERTEX_LAYOUT
            .attributes
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn index_format_matches_loader_indices() {
        assert_eq!(MESH_INDEX_FORMAT.byte_size(), std::mem::size_of::<u32>());
    }
}

//! CPU-side mesh representation used by loaders, and the device seam that
//! turns it into renderable buffers.

use bytemuck::{Pod, Zeroable};

/// Vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Resource-creation context a [`Mesh`] is built against.
///
/// The loader only forwards the device; what the buffers are is up to the
/// implementation (GPU buffers, nothing at all for CPU-only use, ...).
pub trait MeshDevice {
    type Buffers;

    fn create_buffers(&self, data: &MeshData) -> Self::Buffers;
}

/// Device that keeps geometry on the CPU only.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuDevice;

impl MeshDevice for CpuDevice {
    type Buffers = ();

    fn create_buffers(&self, _data: &MeshData) -> Self::Buffers {}
}

/// Renderable geometry: the CPU copy plus whatever the device created.
/// Loaders hand it out as `Arc<Mesh<_>>`.
#[derive(Debug)]
pub struct Mesh<B = ()> {
    data: MeshData,
    buffers: B,
}

impl<B> Mesh<B> {
    pub fn new<D>(device: &D, data: MeshData) -> Self
    where
        D: MeshDevice<Buffers = B> + ?Sized,
    {
        let buffers = device.create_buffers(&data);
        Self { data, buffers }
    }

    #[inline]
    pub fn data(&self) -> &MeshData {
        &self.data
    }

    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.data.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.data.indices
    }

    #[inline]
    pub fn buffers(&self) -> &B {
        &self.buffers
    }
}

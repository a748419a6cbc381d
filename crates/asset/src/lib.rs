//! Asset loading/parsers.
//! Wavefront OBJ meshes into CPU-side vertex/index data, handed to a
//! [`mesh::MeshDevice`] for upload.

pub mod mesh;
pub mod obj;

pub use mesh::{CpuDevice, Mesh, MeshData, MeshDevice, MeshVertex};
pub use obj::{ObjError, load_obj_from_path, load_obj_from_reader, load_obj_from_str, load_obj_mesh};

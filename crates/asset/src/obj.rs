//! OBJ parser for triangulated meshes with positions, normals and texture
//! coordinates.
//!
//! Supported directives: `v`, `vt`, `vn` and `f` with exactly three
//! `position/uv/normal` corners. Everything else is skipped. Lines may be of
//! any length. Each face corner becomes its own vertex (no welding), so the
//! index buffer is always `0, 1, 2, ...`.
//!
//! A malformed `v`/`vt`/`vn`/`f` line fails the whole load.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    str::SplitWhitespace,
    sync::Arc,
};

use thiserror::Error;

use crate::mesh::{Mesh, MeshData, MeshDevice, MeshVertex};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to open OBJ file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read OBJ line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("malformed OBJ line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("too many vertices in OBJ (>{})", u32::MAX)]
    TooManyVertices,
}

impl ObjError {
    fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Load an OBJ file and build a shared mesh against `device`.
///
/// Returns `Ok(None)` when the file cannot be opened, `Err` when it opens
/// but does not parse.
pub fn load_obj_mesh<D>(
    path: impl AsRef<Path>,
    device: &D,
) -> Result<Option<Arc<Mesh<D::Buffers>>>, ObjError>
where
    D: MeshDevice + ?Sized,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Cannot open OBJ file {}: {}", path.display(), err);
            return Ok(None);
        }
    };

    let data = load_obj_from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded OBJ {}: {} vertices, {} triangles",
        path.display(),
        data.vertices.len(),
        data.triangle_count()
    );
    Ok(Some(Arc::new(Mesh::new(device, data))))
}

/// Load OBJ mesh data from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData, ObjError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load OBJ mesh data from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData, ObjError> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData, ObjError> {
    parse_obj(io::Cursor::new(contents))
}

#[derive(Default)]
struct Pools {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
}

fn parse_obj<R: BufRead>(reader: R) -> Result<MeshData, ObjError> {
    let mut pools = Pools::default();
    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| ObjError::Read {
            line: line_no,
            source,
        })?;

        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "vn" => {
                let n = parse_floats::<3>(&mut parts, line_no, "normal")?;
                pools.normals.push(n);
            }
            "vt" => {
                let uv = parse_floats::<2>(&mut parts, line_no, "texture coordinate")?;
                pools.texcoords.push(uv);
            }
            "v" => {
                let p = parse_floats::<3>(&mut parts, line_no, "position")?;
                pools.positions.push(p);
            }
            "f" => {
                let corners = parse_triangle(&mut parts, line_no, &pools)?;
                for [pi, ti, ni] in corners {
                    let index =
                        u32::try_from(vertices.len()).map_err(|_| ObjError::TooManyVertices)?;
                    vertices.push(MeshVertex::new(
                        pools.positions[pi],
                        pools.normals[ni],
                        pools.texcoords[ti],
                    ));
                    indices.push(index);
                }
            }
            other => {
                log::trace!("Ignoring OBJ directive '{}' on line {}", other, line_no);
            }
        }
    }

    Ok(MeshData::new(vertices, indices))
}

/// Read `N` floats; extra trailing values (e.g. `w`) are ignored.
fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    line_no: usize,
    what: &str,
) -> Result<[f32; N], ObjError> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = parts.next().ok_or_else(|| {
            ObjError::parse(line_no, format!("{} needs {} values, found {}", what, N, i))
        })?;
        *slot = token.parse::<f32>().map_err(|_| {
            ObjError::parse(line_no, format!("invalid {} value '{}'", what, token))
        })?;
    }
    Ok(out)
}

/// Resolve the three `p/t/n` corners of a face to 0-based pool indices.
fn parse_triangle(
    parts: &mut SplitWhitespace<'_>,
    line_no: usize,
    pools: &Pools,
) -> Result<[[usize; 3]; 3], ObjError> {
    let tokens: Vec<&str> = parts.collect();
    if tokens.len() != 3 {
        return Err(ObjError::parse(
            line_no,
            format!("faces must be triangles, found {} corners", tokens.len()),
        ));
    }

    let mut corners = [[0usize; 3]; 3];
    for (corner, token) in corners.iter_mut().zip(tokens) {
        let mut split = token.split('/');
        let (Some(p), Some(t), Some(n), None) = (split.next(), split.next(), split.next(), split.next())
        else {
            return Err(ObjError::parse(
                line_no,
                format!("face corner '{}' must be position/uv/normal", token),
            ));
        };
        *corner = [
            resolve_index(p, pools.positions.len(), line_no, "position")?,
            resolve_index(t, pools.texcoords.len(), line_no, "texture coordinate")?,
            resolve_index(n, pools.normals.len(), line_no, "normal")?,
        ];
    }
    Ok(corners)
}

/// 1-based OBJ index to a checked 0-based index into a pool of `len` items.
fn resolve_index(token: &str, len: usize, line_no: usize, what: &str) -> Result<usize, ObjError> {
    let raw = token.parse::<i64>().map_err(|_| {
        ObjError::parse(line_no, format!("invalid {} index '{}'", what, token))
    })?;
    if raw == 0 {
        return Err(ObjError::parse(line_no, "OBJ indices are 1-based; found 0"));
    }
    if raw < 0 {
        return Err(ObjError::parse(
            line_no,
            format!("relative {} index {} is not supported", what, raw),
        ));
    }

    let idx = usize::try_from(raw - 1).map_err(|_| {
        ObjError::parse(line_no, format!("{} index {} does not fit in memory", what, raw))
    })?;
    if idx >= len {
        return Err(ObjError::parse(
            line_no,
            format!("{} index {} out of bounds (have {})", what, raw, len),
        ));
    }
    Ok(idx)
}

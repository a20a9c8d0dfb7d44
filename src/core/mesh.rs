// CPU-side model and texture decoding.
//
// The whole model shares one baked material, so every triangle primitive of
// the scene graph is flattened into a single world-space vertex/index pair.

use crate::core::error::AssetError;
use glam::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of all vertices, `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

#[derive(Clone, Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode a JPEG/PNG into tightly packed RGBA8. Rows stay top-down, which is
/// what glTF texture coordinates expect.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureData, AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(TextureData {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// Parse a glTF/GLB document and bake every triangle primitive reachable from
/// the default scene (or from every scene when none is marked default).
pub fn flatten_gltf(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;

    let scenes: Vec<gltf::Scene> = match document.default_scene() {
        Some(s) => vec![s],
        None => document.scenes().collect(),
    };

    let mut out = MeshData::default();
    for scene in scenes {
        for node in scene.nodes() {
            visit_node(&node, Mat4::IDENTITY, &buffers, &mut out);
        }
    }

    if out.indices.is_empty() {
        return Err(AssetError::EmptyModel);
    }
    Ok(out)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            append_primitive(&prim, world, buffers, out);
        }
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out);
    }
}

fn append_primitive(
    prim: &gltf::Primitive,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) {
    if prim.mode() != gltf::mesh::Mode::Triangles {
        log::debug!("[mesh] skipping primitive with mode {:?}", prim.mode());
        return;
    }
    let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
    let Some(positions) = reader.read_positions() else {
        return;
    };
    let positions: Vec<Vec3> = positions
        .map(|p| world.transform_point3(Vec3::from_array(p)))
        .collect();
    if positions.is_empty() {
        return;
    }

    let indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let n = positions.len() as u32;
    let indices: Vec<u32> = indices
        .chunks_exact(3)
        .filter(|tri| tri.iter().all(|&i| i < n))
        .flatten()
        .copied()
        .collect();

    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(ns) => ns
            .map(|v| (normal_matrix * Vec3::from_array(v)).normalize_or_zero())
            .collect(),
        None => face_normals(&positions, &indices),
    };
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|t| t.into_f32().collect())
        .unwrap_or_default();

    let base = out.vertices.len() as u32;
    out.vertices.extend(positions.iter().enumerate().map(|(i, p)| SceneVertex {
        position: p.to_array(),
        normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
        uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
    }));
    out.indices.extend(indices.into_iter().map(|i| base + i));
}

/// Area-weighted vertex normals for primitives that ship without them.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

// Host-side tests for glTF flattening and texture decoding.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod mesh {
        include!("../src/core/mesh.rs");
    }
}

use crate::core::error::AssetError;
use crate::core::mesh::*;
use glam::Vec3;

// One triangle under a translated parent and a scaled child, with normals,
// uvs and u16 indices.
const NESTED_TRIANGLE: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"translation":[1,2,3],"children":[1]},{"mesh":0,"scale":[2,2,2]}],"meshes":[{"primitives":[{"attributes":{"POSITION":0,"NORMAL":1,"TEXCOORD_0":2},"indices":3}]}],"buffers":[{"byteLength":104,"uri":"data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAABAAIAAAA="}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36},{"buffer":0,"byteOffset":36,"byteLength":36},{"buffer":0,"byteOffset":72,"byteLength":24},{"buffer":0,"byteOffset":96,"byteLength":6}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]},{"bufferView":1,"componentType":5126,"count":3,"type":"VEC3"},{"bufferView":2,"componentType":5126,"count":3,"type":"VEC2"},{"bufferView":3,"componentType":5123,"count":3,"type":"SCALAR"}]}"#;

// Same triangle, but the third index points past the vertex list.
const BROKEN_INDICES: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"translation":[1,2,3],"children":[1]},{"mesh":0,"scale":[2,2,2]}],"meshes":[{"primitives":[{"attributes":{"POSITION":0,"NORMAL":1,"TEXCOORD_0":2},"indices":3}]}],"buffers":[{"byteLength":104,"uri":"data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAABAAUAAAA="}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36},{"buffer":0,"byteOffset":36,"byteLength":36},{"buffer":0,"byteOffset":72,"byteLength":24},{"buffer":0,"byteOffset":96,"byteLength":6}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]},{"bufferView":1,"componentType":5126,"count":3,"type":"VEC3"},{"bufferView":2,"componentType":5126,"count":3,"type":"VEC2"},{"bufferView":3,"componentType":5123,"count":3,"type":"SCALAR"}]}"#;

// Positions only, no indices, instanced by two nodes; no default scene.
const BARE_INSTANCED: &str = r#"{"asset":{"version":"2.0"},"scenes":[{"nodes":[0,1]}],"nodes":[{"mesh":0},{"mesh":0,"translation":[0,0,-4]}],"meshes":[{"primitives":[{"attributes":{"POSITION":0}}]}],"buffers":[{"byteLength":36,"uri":"data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"}],"bufferViews":[{"buffer":0,"byteLength":36}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}]}"#;

const NO_MESHES: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[]}]}"#;

#[test]
fn nested_transforms_are_baked() {
    let mesh = flatten_gltf(NESTED_TRIANGLE.as_bytes()).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    let positions: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        vec![[1.0, 2.0, 3.0], [3.0, 2.0, 3.0], [1.0, 4.0, 3.0]]
    );
    for v in &mesh.vertices {
        assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-6);
    }
    let uvs: Vec<[f32; 2]> = mesh.vertices.iter().map(|v| v.uv).collect();
    assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
}

#[test]
fn bounds_cover_baked_vertices() {
    let mesh = flatten_gltf(NESTED_TRIANGLE.as_bytes()).unwrap();
    let (lo, hi) = mesh.bounds().unwrap();
    assert_eq!(lo, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(hi, Vec3::new(3.0, 4.0, 3.0));
    assert_eq!(MeshData::default().bounds(), None);
}

#[test]
fn missing_indices_and_normals_are_synthesised() {
    let mesh = flatten_gltf(BARE_INSTANCED.as_bytes()).unwrap();
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(mesh.vertices[3].position, [0.0, 0.0, -4.0]);
    for v in &mesh.vertices {
        assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-6);
        assert_eq!(v.uv, [0.0, 0.0]);
    }
}

#[test]
fn out_of_range_triangles_are_dropped() {
    let err = flatten_gltf(BROKEN_INDICES.as_bytes()).unwrap_err();
    assert!(matches!(err, AssetError::EmptyModel));
}

#[test]
fn model_without_triangles_is_rejected() {
    let err = flatten_gltf(NO_MESHES.as_bytes()).unwrap_err();
    assert!(matches!(err, AssetError::EmptyModel));
    assert_eq!(err.to_string(), "model contains no triangles");
}

#[test]
fn garbage_model_reports_decode_error() {
    let err = flatten_gltf(b"definitely not a model").unwrap_err();
    assert!(matches!(err, AssetError::Model(_)));
}

#[test]
fn texture_decodes_to_rgba8() {
    let img = image::RgbaImage::from_fn(2, 3, |x, y| image::Rgba([x as u8 * 100, y as u8 * 50, 7, 255]));
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let tex = decode_texture(&png).unwrap();
    assert_eq!((tex.width, tex.height), (2, 3));
    assert_eq!(tex.rgba.len(), 2 * 3 * 4);
    // Rows stay top-down.
    assert_eq!(&tex.rgba[0..4], &[0, 0, 7, 255]);
    assert_eq!(&tex.rgba[4..8], &[100, 0, 7, 255]);
    assert_eq!(&tex.rgba[8..12], &[0, 50, 7, 255]);
}

#[test]
fn bad_texture_reports_decode_error() {
    let err = decode_texture(&[0u8, 1, 2, 3]).unwrap_err();
    assert!(matches!(err, AssetError::Texture(_)));
}

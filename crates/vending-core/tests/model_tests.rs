// glTF import. Assets are assembled in memory so the tests do not depend on
// files shipped with the page.

use glam::{Mat4, Vec3};
use vending_core::*;

/// One right triangle in the XY plane plus `u16` indices.
fn triangle_bin() -> Vec<u8> {
    let mut bin = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin.extend_from_slice(&[0, 0]);
    bin
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let total = 12 + 8 + json.len() + 8 + bin.len();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x004E_4942u32.to_le_bytes());
    out.extend_from_slice(bin);
    out
}

fn triangle_json(nodes: &str, material: &str, materials: &str) -> String {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": {nodes},
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1{material} }}] }}],
  {materials}
  "buffers": [{{ "byteLength": 44 }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
    )
}

#[test]
fn imports_glb_and_bakes_node_transform() {
    let json = triangle_json(r#"[{ "mesh": 0, "translation": [0.0, 0.0, -2.0] }]"#, "", "");
    let model = ModelData::from_glb(&glb(&json, &triangle_bin())).expect("valid glb");

    assert_eq!(model.triangle_count(), 1);
    assert_eq!(model.vertices.len(), 3);
    assert_eq!(model.indices, vec![0, 1, 2]);
    assert!(model.vertices.iter().all(|v| v.position[2] == -2.0));

    // No normals in the file: derived from the winding
    for v in &model.vertices {
        assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-5);
    }

    // Primitive without a material gets the implicit default one
    assert_eq!(model.materials, vec![Material::default()]);
    assert_eq!(
        model.submeshes,
        vec![Submesh {
            index_start: 0,
            index_count: 3,
            material: 0
        }]
    );

    let bounds = model.bounds().expect("bounds");
    assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(bounds.max, Vec3::new(1.0, 1.0, -2.0));

    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
    let t = model.raycast(&ray, Mat4::IDENTITY).expect("hit");
    assert!((t - 7.0).abs() < 1e-5);
}

#[test]
fn child_nodes_inherit_parent_transform() {
    let nodes = r#"[
    { "children": [1], "translation": [0.0, 0.0, -2.0] },
    { "mesh": 0, "scale": [2.0, 2.0, 2.0] }
  ]"#;
    let model = ModelData::from_glb(&glb(&triangle_json(nodes, "", ""), &triangle_bin()))
        .expect("valid glb");
    let bounds = model.bounds().unwrap();
    assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(bounds.max, Vec3::new(2.0, 2.0, -2.0));
}

#[test]
fn materials_carry_pbr_factors() {
    let materials = r#""materials": [{
    "pbrMetallicRoughness": {
      "baseColorFactor": [0.8, 0.1, 0.1, 1.0],
      "metallicFactor": 0.0,
      "roughnessFactor": 0.7
    }
  }],"#;
    let json = triangle_json(r#"[{ "mesh": 0 }]"#, r#", "material": 0"#, materials);
    let mut model = ModelData::from_glb(&glb(&json, &triangle_bin())).expect("valid glb");

    assert_eq!(model.materials.len(), 1);
    let m = &model.materials[0];
    assert_eq!(m.base_color, [0.8, 0.1, 0.1, 1.0]);
    assert_eq!(m.metallic, 0.0);
    assert_eq!(m.roughness, 0.7);
    assert_eq!(m.base_color_texture, None);
    assert_eq!(model.submeshes[0].material, 0);

    model.set_surface(0.5, 0.2);
    assert_eq!(model.materials[0].metallic, 0.5);
    assert_eq!(model.materials[0].roughness, 0.2);
    assert_eq!(model.materials[0].base_color, [0.8, 0.1, 0.1, 1.0]);
}

#[test]
fn garbage_bytes_fail_to_import() {
    let err = ModelData::from_glb(b"definitely not a model").unwrap_err();
    assert!(matches!(err, ModelError::Import(_)), "{err}");
}

#[test]
fn empty_scene_has_no_geometry() {
    let json = r#"{ "asset": { "version": "2.0" }, "scene": 0, "scenes": [{ "nodes": [] }] }"#;
    let err = ModelData::from_glb(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ModelError::NoGeometry));
}

#[test]
fn models_built_from_triangles_are_pickable() {
    let v = |p: [f32; 3]| Vertex {
        position: p,
        normal: [0.0, 0.0, 1.0],
        uv: [0.0, 0.0],
    };
    let model = ModelData::from_triangles(
        vec![v([0.0, 0.0, 0.0]), v([1.0, 0.0, 0.0]), v([0.0, 1.0, 0.0])],
        vec![0, 1, 2],
    );
    assert_eq!(model.triangle_count(), 1);
    assert_eq!(model.submeshes.len(), 1);

    let empty = ModelData::from_triangles(Vec::new(), Vec::new());
    assert!(empty.bounds().is_none());
    assert!(empty.submeshes.is_empty());
    let ray = Ray::new(Vec3::Z, Vec3::NEG_Z);
    assert!(empty.raycast(&ray, Mat4::IDENTITY).is_none());
}

//! CPU-side model data imported from glTF/GLB assets.
//!
//! A model is flattened into one vertex/index buffer. Every triangle
//! primitive becomes a submesh that references a material. Node transforms
//! are baked into the vertices, so a model only needs its instance transform
//! at draw and pick time.

use crate::picking::{nearest_triangle_hit, ray_aabb, Aabb, Ray};
use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to import glTF: {0}")]
    Import(#[from] gltf::Error),
    #[error("model has no triangle geometry")]
    NoGeometry,
    #[error("primitive {primitive} of mesh {mesh} has no positions")]
    MissingPositions { mesh: usize, primitive: usize },
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    /// Index into `ModelData::textures`.
    pub base_color_texture: Option<usize>,
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            base_color_texture: None,
            metallic: 1.0,
            roughness: 1.0,
        }
    }
}

/// Texture pixels in RGBA8 (sRGB encoded, as stored in glTF).
#[derive(Clone, Debug)]
pub struct TextureRgba {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submesh {
    pub index_start: u32,
    pub index_count: u32,
    pub material: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub submeshes: Vec<Submesh>,
    pub materials: Vec<Material>,
    pub textures: Vec<TextureRgba>,
    positions: Vec<Vec3>,
    bounds: Option<Aabb>,
}

impl ModelData {
    /// Import a binary glTF (or self-contained glTF JSON) from memory.
    pub fn from_glb(bytes: &[u8]) -> Result<Self, ModelError> {
        let (document, buffers, images) = gltf::import_slice(bytes)?;

        let mut model = ModelData {
            materials: document.materials().map(convert_material).collect(),
            textures: images.iter().map(convert_image).collect(),
            ..Default::default()
        };

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                model.append_node(&node, &buffers, Mat4::IDENTITY)?;
            }
        }

        if model.indices.is_empty() {
            return Err(ModelError::NoGeometry);
        }
        model.refresh_bounds();
        log::info!(
            "[model] imported vertices={} triangles={} submeshes={} materials={} textures={}",
            model.vertices.len(),
            model.indices.len() / 3,
            model.submeshes.len(),
            model.materials.len(),
            model.textures.len()
        );
        Ok(model)
    }

    /// Build a model from raw geometry with a single default material.
    pub fn from_triangles(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        let mut model = ModelData {
            vertices,
            indices,
            materials: vec![Material::default()],
            ..Default::default()
        };
        if index_count > 0 {
            model.submeshes.push(Submesh {
                index_start: 0,
                index_count,
                material: 0,
            });
        }
        model.refresh_bounds();
        model
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Override the PBR parameters of every material.
    pub fn set_surface(&mut self, metallic: f32, roughness: f32) {
        for m in &mut self.materials {
            m.metallic = metallic;
            m.roughness = roughness;
        }
    }

    /// Nearest hit distance along `ray` for this model placed with `model`.
    ///
    /// The ray is mapped into model space, so `t` is measured in the units
    /// of the incoming world ray.
    pub fn raycast(&self, ray: &Ray, model: Mat4) -> Option<f32> {
        let bounds = self.bounds?;
        if model.determinant().abs() < f32::EPSILON {
            return None;
        }
        let local = ray.transformed(&model.inverse());
        ray_aabb(&local, &bounds)?;
        nearest_triangle_hit(&local, &self.positions, &self.indices)
    }

    fn refresh_bounds(&mut self) {
        self.positions = self
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect();
        let b = Aabb::from_points(self.positions.iter().copied());
        self.bounds = (!b.is_empty()).then_some(b);
    }

    fn default_material(&mut self) -> usize {
        // glTF primitives without a material use an implicit default one
        self.materials.push(Material::default());
        self.materials.len() - 1
    }

    fn append_node(
        &mut self,
        node: &gltf::Node,
        buffers: &[gltf::buffer::Data],
        parent: Mat4,
    ) -> Result<(), ModelError> {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            self.append_mesh(&mesh, buffers, world)?;
        }
        for child in node.children() {
            self.append_node(&child, buffers, world)?;
        }
        Ok(())
    }

    fn append_mesh(
        &mut self,
        mesh: &gltf::Mesh,
        buffers: &[gltf::buffer::Data],
        transform: Mat4,
    ) -> Result<(), ModelError> {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        let mut default_material = None;

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!(
                    "[model] skipping {:?} primitive in mesh {:?}",
                    primitive.mode(),
                    mesh.name()
                );
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or(ModelError::MissingPositions {
                    mesh: mesh.index(),
                    primitive: primitive.index(),
                })?
                .map(|p| transform.transform_point3(Vec3::from_array(p)))
                .collect();
            if positions.is_empty() {
                continue;
            }
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ix) => ix.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(ns) => ns
                    .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                    .collect(),
                None => smooth_normals(&positions, &indices),
            };
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|t| t.into_f32().collect())
                .unwrap_or_default();

            let base = self.vertices.len() as u32;
            self.vertices
                .extend(positions.iter().enumerate().map(|(i, p)| Vertex {
                    position: p.to_array(),
                    normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                    uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                }));

            let index_start = self.indices.len() as u32;
            let vertex_count = positions.len() as u32;
            self.indices.extend(
                indices
                    .chunks_exact(3)
                    .filter(|tri| tri.iter().all(|&i| i < vertex_count))
                    .flatten()
                    .map(|i| base + i),
            );
            let index_count = self.indices.len() as u32 - index_start;
            if index_count == 0 {
                continue;
            }

            let material = match primitive.material().index() {
                Some(i) => i,
                None => *default_material.get_or_insert_with(|| self.default_material()),
            };
            self.submeshes.push(Submesh {
                index_start,
                index_count,
                material,
            });
        }
        Ok(())
    }
}

fn convert_material(material: gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    Material {
        base_color: pbr.base_color_factor(),
        base_color_texture: pbr
            .base_color_texture()
            .map(|info| info.texture().source().index()),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
    }
}

fn convert_image(image: &gltf::image::Data) -> TextureRgba {
    use gltf::image::Format;
    let pixels = match image.format {
        Format::R8G8B8A8 => image.pixels.clone(),
        Format::R8G8B8 => image
            .pixels
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Format::R8G8 => image
            .pixels
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[1], 0, 255])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|&l| [l, l, l, 255]).collect(),
        other => {
            log::warn!("[model] unsupported texture format {:?}, using white", other);
            vec![255; (image.width * image.height * 4) as usize]
        }
    };
    TextureRgba {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Area-weighted vertex normals for primitives that ship without them.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

use super::helpers;
use crate::core::{Material, ModelData, Vertex};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    base_color: [f32; 4],
    params: [f32; 4],
}

impl From<&Material> for MaterialUniforms {
    fn from(m: &Material) -> Self {
        Self {
            base_color: m.base_color,
            params: [m.metallic, m.roughness, 0.0, 0.0],
        }
    }
}

/// Shared objects every material bind group is built from.
pub(crate) struct MaterialResources<'r> {
    pub layout: &'r wgpu::BindGroupLayout,
    pub sampler: &'r wgpu::Sampler,
    /// 1x1 white texture for materials without a base color map.
    pub white: &'r wgpu::TextureView,
}

struct GpuSubmesh {
    index_start: u32,
    index_count: u32,
    bind_group: usize,
}

/// A model resident on the GPU: one vertex/index buffer pair and one bind
/// group per material.
pub(crate) struct GpuModel {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    submeshes: Vec<GpuSubmesh>,
    bind_groups: Vec<wgpu::BindGroup>,
    _textures: Vec<wgpu::Texture>,
}

impl GpuModel {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        model: &ModelData,
        res: &MaterialResources,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(&model.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(&model.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (textures, views): (Vec<_>, Vec<_>) = model
            .textures
            .iter()
            .enumerate()
            .map(|(i, t)| {
                helpers::upload_rgba8(
                    device,
                    queue,
                    &format!("{label}_texture_{i}"),
                    t.width,
                    t.height,
                    &t.pixels,
                )
            })
            .unzip();

        // Trailing default material for submeshes whose index is out of range
        let fallback = Material::default();
        let bind_groups: Vec<wgpu::BindGroup> = model
            .materials
            .iter()
            .chain(std::iter::once(&fallback))
            .enumerate()
            .map(|(i, m)| {
                let view = m
                    .base_color_texture
                    .and_then(|t| views.get(t))
                    .unwrap_or(res.white);
                material_bind_group(device, &format!("{label}_material_{i}"), m, view, res)
            })
            .collect();
        let fallback_index = bind_groups.len() - 1;

        let submeshes = model
            .submeshes
            .iter()
            .map(|s| GpuSubmesh {
                index_start: s.index_start,
                index_count: s.index_count,
                bind_group: if s.material < fallback_index {
                    s.material
                } else {
                    fallback_index
                },
            })
            .collect();

        log::info!(
            "[gpu] uploaded {} ({} vertices, {} materials, {} textures)",
            label,
            model.vertices.len(),
            model.materials.len(),
            textures.len()
        );
        Self {
            vertex_buffer,
            index_buffer,
            submeshes,
            bind_groups,
            _textures: textures,
        }
    }

    /// Draw every submesh once per instance. Material bind groups go to
    /// group 1 when `with_materials` is set; depth-only and ground passes
    /// leave it unbound.
    pub(crate) fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        instances: &InstanceBuffer,
        with_materials: bool,
    ) {
        if instances.is_empty() {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, instances.slice());
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for s in &self.submeshes {
            if with_materials {
                pass.set_bind_group(1, &self.bind_groups[s.bind_group], &[]);
            }
            pass.draw_indexed(
                s.index_start..s.index_start + s.index_count,
                0,
                0..instances.len(),
            );
        }
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    label: &str,
    material: &Material,
    view: &wgpu::TextureView,
    res: &MaterialResources,
) -> wgpu::BindGroup {
    let uniforms = MaterialUniforms::from(material);
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&uniforms),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: res.layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(res.sampler),
            },
        ],
    })
}

/// Per-instance model matrices, grown on demand.
pub(crate) struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    pub(crate) fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            label,
            buffer: create_instance_buffer(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    pub(crate) fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, matrices: &[Mat4]) {
        if matrices.len() > self.capacity {
            self.capacity = matrices.len().next_power_of_two();
            self.buffer = create_instance_buffer(device, self.label, self.capacity);
            log::debug!("[gpu] {} grown to {}", self.label, self.capacity);
        }
        if !matrices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(matrices));
        }
        self.len = matrices.len() as u32;
    }

    pub(crate) fn len(&self) -> u32 {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer
            .slice(..(self.len as u64 * std::mem::size_of::<Mat4>() as u64))
    }
}

fn create_instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * std::mem::size_of::<Mat4>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Flat square at height `y`, facing up.
pub(crate) fn ground_quad(size: f32, y: f32) -> ModelData {
    let h = size * 0.5;
    let v = |x: f32, z: f32, u: f32, w: f32| Vertex {
        position: [x, y, z],
        normal: [0.0, 1.0, 0.0],
        uv: [u, w],
    };
    ModelData::from_triangles(
        vec![
            v(-h, -h, 0.0, 0.0),
            v(h, -h, 1.0, 0.0),
            v(h, h, 1.0, 1.0),
            v(-h, h, 0.0, 1.0),
        ],
        vec![0, 2, 1, 0, 3, 2],
    )
}

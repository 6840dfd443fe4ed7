use crate::constants::{
    INITIAL_INSTANCE_CAPACITY, SHADOW_DEPTH_BIAS, SHADOW_PCF_RADIUS, SHADOW_SLOPE_BIAS,
};
use crate::core::constants::{GROUND_HEIGHT, GROUND_SHADOW_OPACITY, GROUND_SIZE, SHADOW_MAP_SIZE};
use crate::core::{hex_to_linear_rgb, Lighting, ModelData, ObjectKind, SceneHost, ThemePalette};
use glam::Mat4;
use web_sys as web;
use wgpu;

mod helpers;
mod mesh;
mod targets;

use mesh::{GpuModel, InstanceBuffer, MaterialResources};
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    dir_to_light: [f32; 4],
    dir_color: [f32; 4],
    ambient: [f32; 4],
    spot_pos: [f32; 4],
    spot_dir: [f32; 4],
    spot_color: [f32; 4],
    shadow: [f32; 4],
}

impl SceneUniforms {
    fn from_scene(scene: &SceneHost, shadow_size: u32) -> Self {
        let camera = scene.camera();
        let Lighting {
            directional,
            ambient,
            spot,
        } = scene.lighting();
        let rgb = |hex: u32, scale: f32| {
            let [r, g, b] = hex_to_linear_rgb(hex);
            [r * scale, g * scale, b * scale, 1.0]
        };
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light_view_proj: directional.shadow_view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            dir_to_light: directional.to_light().extend(directional.intensity).to_array(),
            dir_color: rgb(directional.color, 1.0),
            ambient: rgb(ambient.color, ambient.intensity),
            spot_pos: spot.position.extend(spot.angle.cos()).to_array(),
            spot_dir: spot.direction().extend(spot.intensity).to_array(),
            spot_color: rgb(spot.color, 1.0),
            shadow: [
                1.0 / shadow_size.max(1) as f32,
                SHADOW_PCF_RADIUS,
                GROUND_SHADOW_OPACITY,
                0.0,
            ],
        }
    }
}

fn clear_color(palette: &ThemePalette) -> wgpu::Color {
    let [r, g, b] = hex_to_linear_rgb(palette.clear_color);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    uniform_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,
    material_bgl: wgpu::BindGroupLayout,
    material_sampler: wgpu::Sampler,
    _white_tex: wgpu::Texture,
    white_view: wgpu::TextureView,

    shadow_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    ground_pipeline: wgpu::RenderPipeline,

    ground: GpuModel,
    ground_instances: InstanceBuffer,
    machine: Option<GpuModel>,
    machine_instances: InstanceBuffer,
    can: Option<GpuModel>,
    can_instances: InstanceBuffer,
    // Reused per frame to collect can matrices
    can_matrices: Vec<Mat4>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height, SHADOW_MAP_SIZE);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });

        // Group 0: scene uniforms + shadow map. The shadow pass only sees the
        // uniforms since it writes the map.
        let uniform_entry = |visibility: wgpu::ShaderStages| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[
                uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX)],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                uniform_entry(wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bg"),
            layout: &shadow_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let material_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (white_tex, white_view) =
            helpers::upload_rgba8(&device, &queue, "white_texture", 1, 1, &[255, 255, 255, 255]);

        let shadow_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pl"),
            bind_group_layouts: &[&shadow_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&globals_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let ground_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ground_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let shadow_pipeline = helpers::make_mesh_pipeline(
            &device,
            helpers::MeshPipelineDesc {
                label: "shadow_pipeline",
                layout: &shadow_pl,
                shader: &shader,
                vs_entry: "vs_shadow",
                fs_entry: None,
                color: None,
                depth_write: true,
                depth_bias: wgpu::DepthBiasState {
                    constant: SHADOW_DEPTH_BIAS,
                    slope_scale: SHADOW_SLOPE_BIAS,
                    clamp: 0.0,
                },
            },
        );
        let mesh_pipeline = helpers::make_mesh_pipeline(
            &device,
            helpers::MeshPipelineDesc {
                label: "mesh_pipeline",
                layout: &mesh_pl,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: Some("fs_main"),
                color: Some((format, None)),
                depth_write: true,
                depth_bias: wgpu::DepthBiasState::default(),
            },
        );
        let ground_pipeline = helpers::make_mesh_pipeline(
            &device,
            helpers::MeshPipelineDesc {
                label: "ground_pipeline",
                layout: &ground_pl,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: Some("fs_ground"),
                color: Some((format, Some(wgpu::BlendState::ALPHA_BLENDING))),
                depth_write: false,
                depth_bias: wgpu::DepthBiasState::default(),
            },
        );

        let ground = GpuModel::upload(
            &device,
            &queue,
            "ground",
            &mesh::ground_quad(GROUND_SIZE, GROUND_HEIGHT),
            &MaterialResources {
                layout: &material_bgl,
                sampler: &material_sampler,
                white: &white_view,
            },
        );
        let mut ground_instances = InstanceBuffer::new(&device, "ground_instances", 1);
        ground_instances.write(&device, &queue, &[Mat4::IDENTITY]);
        let machine_instances = InstanceBuffer::new(&device, "machine_instances", 1);
        let can_instances =
            InstanceBuffer::new(&device, "can_instances", INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            uniform_buffer,
            globals_bind_group,
            shadow_bind_group,
            material_bgl,
            material_sampler,
            _white_tex: white_tex,
            white_view,
            shadow_pipeline,
            mesh_pipeline,
            ground_pipeline,
            ground,
            ground_instances,
            machine: None,
            machine_instances,
            can: None,
            can_instances,
            can_matrices: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
            width,
            height,
        })
    }

    fn upload_model(&self, label: &str, model: &ModelData) -> GpuModel {
        GpuModel::upload(
            &self.device,
            &self.queue,
            label,
            model,
            &MaterialResources {
                layout: &self.material_bgl,
                sampler: &self.material_sampler,
                white: &self.white_view,
            },
        )
    }

    /// Upload models the scene host gained since the last call.
    pub fn sync_models(&mut self, scene: &SceneHost) {
        if self.machine.is_none() {
            if let Some(m) = scene.machine() {
                self.machine = Some(self.upload_model("vending_machine", m));
            }
        }
        if self.can.is_none() {
            if let Some(m) = scene.can_template() {
                self.can = Some(self.upload_model("soda_can", m));
            }
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, scene: &SceneHost) -> Result<(), wgpu::SurfaceError> {
        let uniforms = SceneUniforms::from_scene(scene, self.targets.shadow_size());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let machine_matrix = scene.machine_transform().matrix();
        self.machine_instances
            .write(&self.device, &self.queue, &[machine_matrix]);
        self.can_matrices.clear();
        self.can_matrices.extend(
            scene
                .world()
                .iter_kind(ObjectKind::SodaCan)
                .map(|o| o.transform.matrix()),
        );
        self.can_instances
            .write(&self.device, &self.queue, &self.can_matrices);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: light-space depth for the directional shadow
        {
            let mut spass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            spass.set_pipeline(&self.shadow_pipeline);
            spass.set_bind_group(0, &self.shadow_bind_group, &[]);
            self.draw_casters(&mut spass, false);
        }

        // Pass 2: lit meshes, then the shadow-catching ground on top
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(&scene.palette())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.draw_casters(&mut rpass, true);

            rpass.set_pipeline(&self.ground_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.ground.draw(&mut rpass, &self.ground_instances, false);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn draw_casters(&self, pass: &mut wgpu::RenderPass<'_>, with_materials: bool) {
        if let Some(machine) = &self.machine {
            machine.draw(pass, &self.machine_instances, with_materials);
        }
        if let Some(can) = &self.can {
            can.draw(pass, &self.can_instances, with_materials);
        }
    }
}

use crate::constants::{AXES_LENGTH, OUTLINE_COLOR, OUTLINE_THICKNESS};
use crate::core::mesh::{MeshData, TextureData};
use glam::Mat4;
use web_sys as web;

mod axes;
mod baked;
mod helpers;
mod targets;
use axes::{create_axes_resources, AxesResources, AxisVertex};
use baked::{create_model_resources, create_texture_bgl, mesh_layout, ModelResources};
use helpers::MeshPipelineDesc;
use targets::RenderTargets;

// ===================== WebGPU state =====================

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    outline_color: [f32; 4],
    outline_params: [f32; 4],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,

    baked_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    axes_pipeline: wgpu::RenderPipeline,

    axes: AxesResources,
    model: Option<ModelResources>,
    model_matrix: Mat4,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
        // Transparent canvas so the page shows through around the room
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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
        log::info!("[gpu] surface {}x{} {:?} {:?}", width, height, format, alpha_mode);

        let targets = RenderTargets::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let texture_bgl = create_texture_bgl(&device);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pl_mesh = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_mesh"),
            bind_group_layouts: &[&globals_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let pl_globals = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_globals"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        // Double-sided unlit bake
        let baked_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl_mesh,
            &shader,
            format,
            MeshPipelineDesc {
                label: "baked_pipeline",
                vs_entry: "vs_baked",
                fs_entry: "fs_baked",
                vertex_layout: mesh_layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        // Inverted hull: only the back faces of the inflated mesh survive
        let outline_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl_globals,
            &shader,
            format,
            MeshPipelineDesc {
                label: "outline_pipeline",
                vs_entry: "vs_outline",
                fs_entry: "fs_outline",
                vertex_layout: mesh_layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Front),
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );
        let axes_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl_globals,
            &shader,
            format,
            MeshPipelineDesc {
                label: "axes_pipeline",
                vs_entry: "vs_axes",
                fs_entry: "fs_axes",
                vertex_layout: AxisVertex::layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let axes = create_axes_resources(&device, AXES_LENGTH);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            globals_buffer,
            globals_bg,
            texture_bgl,
            linear_sampler,
            baked_pipeline,
            outline_pipeline,
            axes_pipeline,
            axes,
            model: None,
            model_matrix: Mat4::IDENTITY,
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Hand the decoded room to the GPU and place the scene.
    pub fn upload_model(&mut self, mesh: &MeshData, texture: &TextureData, model_matrix: Mat4) {
        self.model = Some(create_model_resources(
            &self.device,
            &self.queue,
            &self.texture_bgl,
            &self.linear_sampler,
            mesh,
            texture,
        ));
        self.model_matrix = model_matrix;
        if let Some((lo, hi)) = mesh.bounds() {
            log::info!("[gpu] model bounds {:?} .. {:?}", lo, hi);
        }
        log::info!(
            "[gpu] model uploaded: {} vertices, {} triangles, texture {}x{}",
            mesh.vertices.len(),
            mesh.triangle_count(),
            texture.width,
            texture.height
        );
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
        }
    }

    /// Reconfigure after the surface reports `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, view_proj: Mat4) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            model: self.model_matrix.to_cols_array_2d(),
            outline_color: OUTLINE_COLOR,
            outline_params: [OUTLINE_THICKNESS, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);

            if let Some(m) = &self.model {
                rpass.set_vertex_buffer(0, m.vertex_buffer.slice(..));
                rpass.set_index_buffer(m.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                rpass.set_pipeline(&self.baked_pipeline);
                rpass.set_bind_group(1, &m.texture_bind_group, &[]);
                rpass.draw_indexed(0..m.index_count, 0, 0..1);

                rpass.set_pipeline(&self.outline_pipeline);
                rpass.draw_indexed(0..m.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.axes_pipeline);
            rpass.set_vertex_buffer(0, self.axes.vertex_buffer.slice(..));
            rpass.draw(0..self.axes.vertex_count, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

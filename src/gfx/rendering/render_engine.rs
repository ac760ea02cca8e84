//! WGPU-based render engine
//!
//! Compiles meshes into GPU buffers and executes the draw calls recorded in a
//! [`FrameCommands`], followed by an optional UI overlay.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use super::{DrawCommand, FrameCommands, MeshCompiler, MeshHandle};
use crate::error::{BoltError, Result};
use crate::gfx::{
    camera::OPENGL_TO_WGPU_MATRIX,
    geometry::{compile_vertices, CompileFlags, MeshData},
    resources::DepthTexture,
    scene::{LineVertex, Vertex3D},
    shading::PhongUniforms,
};
use crate::wgpu_utils::{dynamic_uniform_layout, DynamicUniformBuffer};

/// Uniform block of `lines.wgsl`
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineUniforms {
    transformation_projection: [[f32; 4]; 4],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
}

impl GpuMesh {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(indices) => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.count, 0, 0..1);
            }
            None => pass.draw(0..self.count, 0..1),
        }
    }
}

/// Owns the surface, device, pipelines and every compiled mesh
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    depth_texture: DepthTexture,
    clear_color: wgpu::Color,

    phong_pipeline: wgpu::RenderPipeline,
    phong_layout: wgpu::BindGroupLayout,
    phong_uniforms: DynamicUniformBuffer<PhongUniforms>,
    phong_bind_group: wgpu::BindGroup,

    line_pipeline: wgpu::RenderPipeline,
    line_layout: wgpu::BindGroupLayout,
    line_uniforms: DynamicUniformBuffer<LineUniforms>,
    line_bind_group: wgpu::BindGroup,

    meshes: Vec<GpuMesh>,
    phong_scratch: Vec<PhongUniforms>,
    line_scratch: Vec<LineUniforms>,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `clear_color` - Background colour
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 3],
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| BoltError::Graphics(format!("Cannot create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BoltError::Graphics(format!("No suitable adapter: {}", e)))?;

        let info = adapter.get_info();
        log::info!("Using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| BoltError::Graphics(format!("Cannot create device: {}", e)))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| BoltError::Graphics("Surface has no supported format".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = DepthTexture::new(&device, &config, "depth_texture");

        let phong_layout = dynamic_uniform_layout(
            &device,
            "Phong Uniform Layout",
            std::mem::size_of::<PhongUniforms>() as u64,
        );
        let line_layout = dynamic_uniform_layout(
            &device,
            "Line Uniform Layout",
            std::mem::size_of::<LineUniforms>() as u64,
        );

        let phong_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("phong.wgsl").into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("lines.wgsl").into()),
        });

        let phong_pipeline = create_pipeline(
            &device,
            &PipelineDesc {
                label: "Phong",
                shader: &phong_shader,
                layout: &phong_layout,
                vertex_layout: Vertex3D::desc(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                format,
            },
        );
        let line_pipeline = create_pipeline(
            &device,
            &PipelineDesc {
                label: "Lines",
                shader: &line_shader,
                layout: &line_layout,
                vertex_layout: LineVertex::desc(),
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                format,
            },
        );

        let phong_uniforms = DynamicUniformBuffer::new(&device, 4);
        let phong_bind_group =
            uniform_bind_group(&device, "Phong Bind Group", &phong_layout, &phong_uniforms);
        let line_uniforms = DynamicUniformBuffer::new(&device, 4);
        let line_bind_group =
            uniform_bind_group(&device, "Line Bind Group", &line_layout, &line_uniforms);

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            format,
            depth_texture,
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: 1.0,
            },
            phong_pipeline,
            phong_layout,
            phong_uniforms,
            phong_bind_group,
            line_pipeline,
            line_layout,
            line_uniforms,
            line_bind_group,
            meshes: Vec::new(),
            phong_scratch: Vec::new(),
            line_scratch: Vec::new(),
        })
    }

    /// Executes `frame` and presents it, drawing the UI on top
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(&mut self, frame: &FrameCommands, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {}, reconfiguring", e);
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };

        self.upload_uniforms(frame);

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let (mut phong_slot, mut line_slot) = (0, 0);
            for command in frame.commands() {
                match command {
                    DrawCommand::Phong { mesh, .. } => {
                        let offset = self.phong_uniforms.offset(phong_slot);
                        phong_slot += 1;
                        let Some(gpu_mesh) = self.meshes.get(mesh.index()) else {
                            log::warn!("Skipping draw of unknown mesh {:?}", mesh);
                            continue;
                        };
                        render_pass.set_pipeline(&self.phong_pipeline);
                        render_pass.set_bind_group(0, &self.phong_bind_group, &[offset]);
                        gpu_mesh.draw(&mut render_pass);
                    }
                    DrawCommand::Lines { mesh, .. } => {
                        let offset = self.line_uniforms.offset(line_slot);
                        line_slot += 1;
                        let Some(gpu_mesh) = self.meshes.get(mesh.index()) else {
                            log::warn!("Skipping draw of unknown mesh {:?}", mesh);
                            continue;
                        };
                        render_pass.set_pipeline(&self.line_pipeline);
                        render_pass.set_bind_group(0, &self.line_bind_group, &[offset]);
                        gpu_mesh.draw(&mut render_pass);
                    }
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Writes one uniform slot per recorded draw, in clip space of wgpu
    fn upload_uniforms(&mut self, frame: &FrameCommands) {
        self.phong_scratch.clear();
        self.line_scratch.clear();

        for command in frame.commands() {
            match command {
                DrawCommand::Phong { uniforms, .. } => {
                    let mut uniforms = *uniforms;
                    let projection = Matrix4::from(uniforms.projection);
                    uniforms.projection = (OPENGL_TO_WGPU_MATRIX * projection).into();
                    self.phong_scratch.push(uniforms);
                }
                DrawCommand::Lines {
                    transformation_projection,
                    ..
                } => {
                    self.line_scratch.push(LineUniforms {
                        transformation_projection: (OPENGL_TO_WGPU_MATRIX
                            * *transformation_projection)
                            .into(),
                    });
                }
            }
        }

        if self
            .phong_uniforms
            .reserve(&self.device, self.phong_scratch.len())
        {
            self.phong_bind_group = uniform_bind_group(
                &self.device,
                "Phong Bind Group",
                &self.phong_layout,
                &self.phong_uniforms,
            );
        }
        if self
            .line_uniforms
            .reserve(&self.device, self.line_scratch.len())
        {
            self.line_bind_group = uniform_bind_group(
                &self.device,
                "Line Bind Group",
                &self.line_layout,
                &self.line_uniforms,
            );
        }

        self.phong_uniforms.write(&self.queue, &self.phong_scratch);
        self.line_uniforms.write(&self.queue, &self.line_scratch);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture = DepthTexture::new(&self.device, &self.config, "depth_texture");
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Number of meshes compiled so far
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    fn add_mesh(&mut self, mesh: GpuMesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }
}

impl MeshCompiler for RenderEngine {
    fn compile(&mut self, mesh: &MeshData, flags: CompileFlags) -> Result<MeshHandle> {
        let (vertices, indices) = compile_vertices(mesh, flags)?;
        if indices.is_empty() {
            return Err(BoltError::InvalidMesh {
                mesh: mesh.name().to_string(),
                message: "no triangles".to_string(),
            });
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", mesh.name())),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", mesh.name())),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "Compiled mesh '{}': {} vertices, {} triangles",
            mesh.name(),
            vertices.len(),
            indices.len() / 3
        );

        Ok(self.add_mesh(GpuMesh {
            vertex_buffer,
            index_buffer: Some(index_buffer),
            count: indices.len() as u32,
        }))
    }

    fn compile_lines(&mut self, vertices: &[LineVertex]) -> Result<MeshHandle> {
        if vertices.is_empty() || vertices.len() % 2 != 0 {
            return Err(BoltError::InvalidMesh {
                mesh: "lines".to_string(),
                message: format!("{} vertices is not a list of line segments", vertices.len()),
            });
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Line Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(self.add_mesh(GpuMesh {
            vertex_buffer,
            index_buffer: None,
            count: vertices.len() as u32,
        }))
    }
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    layout: &'a wgpu::BindGroupLayout,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    format: wgpu::TextureFormat,
}

fn create_pipeline(device: &wgpu::Device, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", desc.label)),
        bind_group_layouts: &[desc.layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: &[desc.vertex_layout.clone()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthTexture::depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn uniform_bind_group<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    uniforms: &DynamicUniformBuffer<T>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniforms.binding_resource(),
        }],
    })
}

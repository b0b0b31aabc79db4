use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tileworld_render::{ATLAS_TEXELS, RenderGridBuffer, TileRenderer, TileVertex, atlas_pixels};
use wgpu::util::DeviceExt;

use crate::canvas::GpuCanvas;
use crate::shaders;

const MIN_VERTEX_CAPACITY: u64 = 1024;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Vertex capacity to allocate when `needed` vertices no longer fit in
/// `current`.
fn grow_capacity(current: u64, needed: u64) -> u64 {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two().max(MIN_VERTEX_CAPACITY)
    }
}

struct GpuState {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: u64,
}

impl GpuState {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tile_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let atlas_size = wgpu::Extent3d {
            width: ATLAS_TEXELS,
            height: ATLAS_TEXELS,
            depth_or_array_layers: 1,
        };
        let atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tile_atlas"),
            size: atlas_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &atlas,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &atlas_pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(ATLAS_TEXELS * 4),
                rows_per_image: Some(ATLAS_TEXELS),
            },
            atlas_size,
        );
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tile_atlas_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tile_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tile_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tile_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tile_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TILE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tile_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TileVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                        2 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let vertex_capacity = MIN_VERTEX_CAPACITY;
        let vertex_buffer = create_vertex_buffer(device, vertex_capacity);

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            vertex_capacity,
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("tile_vertices"),
        size: capacity * std::mem::size_of::<TileVertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Draws the visible tiles as textured quads.
///
/// GPU resources are created in [`TileRenderer::open`]; uploads before then
/// are staged and written on the first draw.
pub struct WgpuTileRenderer {
    gpu: Option<GpuState>,
    staged: Vec<TileVertex>,
    dirty: bool,
    vertex_count: u32,
    clear_color: wgpu::Color,
}

impl Default for WgpuTileRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuTileRenderer {
    pub fn new() -> Self {
        Self {
            gpu: None,
            staged: Vec::new(),
            dirty: false,
            vertex_count: 0,
            clear_color: wgpu::Color {
                r: 0.45,
                g: 0.65,
                b: 0.9,
                a: 1.0,
            },
        }
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    fn flush_vertices(&mut self, canvas: &GpuCanvas) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if !self.dirty {
            return;
        }
        let needed = self.staged.len() as u64;
        let capacity = grow_capacity(gpu.vertex_capacity, needed);
        if capacity != gpu.vertex_capacity {
            tracing::debug!(
                from = gpu.vertex_capacity,
                to = capacity,
                "growing tile vertex buffer"
            );
            gpu.vertex_buffer = create_vertex_buffer(canvas.device(), capacity);
            gpu.vertex_capacity = capacity;
        }
        if !self.staged.is_empty() {
            canvas
                .queue()
                .write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(&self.staged));
        }
        self.vertex_count = self.staged.len() as u32;
        self.dirty = false;
    }
}

impl TileRenderer for WgpuTileRenderer {
    type Canvas = GpuCanvas;

    fn open(&mut self, canvas: &mut GpuCanvas) {
        self.gpu = Some(GpuState::new(canvas.device(), canvas.queue(), canvas.format()));
        self.dirty = true;
    }

    fn upload(&mut self, buffer: &RenderGridBuffer) {
        self.staged.clear();
        self.staged.extend_from_slice(buffer.vertices());
        self.dirty = true;
    }

    fn draw(&mut self, canvas: &mut GpuCanvas, view_proj: Mat4) {
        self.flush_vertices(canvas);
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let Some(view) = canvas.begin_frame() else {
            return;
        };

        canvas.queue().write_buffer(
            &gpu.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );

        let mut encoder = canvas
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tile_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tile_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if self.vertex_count > 0 {
                pass.set_pipeline(&gpu.pipeline);
                pass.set_bind_group(0, &gpu.bind_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                pass.draw(0..self.vertex_count, 0..1);
            }
        }
        canvas.queue().submit(std::iter::once(encoder.finish()));
    }
}

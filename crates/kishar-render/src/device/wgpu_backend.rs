use std::collections::HashMap;

use anyhow::{ensure, Result};
use bytemuck::{Pod, Zeroable};

use crate::batch::{TierTable, Vertex};

use super::{BatchDraw, GpuBackend, RenderTarget, ScratchInfo, TargetId, TextureFilter, TextureId};

const SHADER_SOURCE: &str = r#"
struct Uniforms {
    surface: vec2<f32>,
    _pad: vec2<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var tex: texture_2d<f32>;
@group(1) @binding(1)
var samp: sampler;

struct VertexInput {
    @location(0) pos: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(v: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // Pixel space to NDC against the bound target's dimensions.
    let ndc_x = (v.pos.x / uniforms.surface.x) * 2.0 - 1.0;
    let ndc_y = 1.0 - (v.pos.y / uniforms.surface.y) * 2.0;

    // Vertex color already carries tint and alpha; uniforms.tint exists for
    // custom materials that want the raw draw-state value.
    out.clip_position = vec4<f32>(ndc_x, ndc_y, 0.0, 1.0);
    out.color = v.color;
    out.uv = v.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(tex, samp, in.uv) * in.color;
}
"#;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    surface: [f32; 2],
    _pad: [f32; 2],
    tint: [f32; 4],
}

/// GPU buffers backing one upload tier. Created on first use.
struct TierSlot {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

/// A registered sampleable texture with one bind group per filter mode.
struct TextureEntry {
    _texture: wgpu::Texture,
    bind_nearest: wgpu::BindGroup,
    bind_linear: wgpu::BindGroup,
}

struct OffscreenEntry {
    texture_id: TextureId,
    view: wgpu::TextureView,
    size: (u32, u32),
}

/// The wgpu implementation of [`GpuBackend`].
///
/// One pipeline draws everything: batched vertices carry position, color, and
/// UV, and untextured primitives sample a 1x1 white texture. Render targets
/// (the attached screen view and offscreen textures) all share the surface
/// format, so the pipeline is created once.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,

    pipeline: wgpu::RenderPipeline,
    texture_bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    sampler_nearest: wgpu::Sampler,
    sampler_linear: wgpu::Sampler,

    tier_quads: Vec<u32>,
    tier_slots: Vec<Option<TierSlot>>,

    textures: HashMap<TextureId, TextureEntry>,
    offscreens: HashMap<TargetId, OffscreenEntry>,
    filter_overrides: HashMap<TextureId, TextureFilter>,

    white: TextureId,
    scratch: Option<(TextureId, ScratchInfo)>,

    screen_view: Option<wgpu::TextureView>,
    screen_size: (u32, u32),
    bound: RenderTarget,

    next_texture_id: u32,
    next_target_id: u32,

    warned_no_screen: bool,
}

impl WgpuBackend {
    /// Builds the backend over an existing device/queue.
    ///
    /// `format` must match the surface the screen view will come from;
    /// offscreen targets are created in the same format so one pipeline
    /// covers every target.
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        tiers: &TierTable,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kishar batch shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kishar uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        std::num::NonZeroU64::new(std::mem::size_of::<Uniforms>() as u64)
                            .expect("Uniforms has non-zero size by construction"),
                    ),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kishar texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kishar pipeline layout"),
            bind_group_layouts: &[&uniform_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kishar batch pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
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
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Winding is meaningless for 2D batches (filled triangles are
                // emitted in both windings); never cull.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kishar uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kishar uniform bind group"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler_nearest = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kishar nearest sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let sampler_linear = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kishar linear sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let tier_quads: Vec<u32> = tiers.tiers().iter().map(|t| t.quads).collect();
        let tier_slots = tier_quads.iter().map(|_| None).collect();

        let mut backend = Self {
            device,
            queue,
            format,
            pipeline,
            texture_bgl,
            uniform_buffer,
            uniform_bind_group,
            sampler_nearest,
            sampler_linear,
            tier_quads,
            tier_slots,
            textures: HashMap::new(),
            offscreens: HashMap::new(),
            filter_overrides: HashMap::new(),
            white: TextureId(0),
            scratch: None,
            screen_view: None,
            screen_size: (1, 1),
            bound: RenderTarget::Screen,
            next_texture_id: 0,
            next_target_id: 0,
            warned_no_screen: false,
        };

        backend.white = backend
            .register_texture(&[255, 255, 255, 255], 1, 1, wgpu::TextureUsages::TEXTURE_BINDING)
            .0;

        backend
    }

    /// Attaches the window surface view for the coming frame. Draws against
    /// [`RenderTarget::Screen`] land here.
    pub fn attach_screen(&mut self, view: wgpu::TextureView, width: u32, height: u32) {
        self.screen_view = Some(view);
        self.screen_size = (width, height);
    }

    /// Drops the screen attachment (the surface texture is about to be
    /// presented).
    pub fn detach_screen(&mut self) {
        self.screen_view = None;
    }

    fn alloc_texture_id(&mut self) -> TextureId {
        let id = TextureId(self.next_texture_id);
        self.next_texture_id += 1;
        id
    }

    fn make_bind_groups(&self, view: &wgpu::TextureView) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let make = |sampler: &wgpu::Sampler, label: &str| {
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.texture_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        (
            make(&self.sampler_nearest, "kishar texture bind (nearest)"),
            make(&self.sampler_linear, "kishar texture bind (linear)"),
        )
    }

    /// Format for sampled-only textures: RGBA byte order, sRGB-ness
    /// following the surface so colors round-trip through offscreen passes.
    fn sample_format(&self) -> wgpu::TextureFormat {
        if self.format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        }
    }

    /// Creates a texture, uploads `pixels` (RGBA8, rows top-down), and
    /// registers it under a fresh id. Returns the id and the view.
    ///
    /// Render attachments use the surface format (the pipeline targets it);
    /// sampled-only textures use the RGBA sample format.
    fn register_texture(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        extra_usage: wgpu::TextureUsages,
    ) -> (TextureId, wgpu::TextureView) {
        let format = if extra_usage.contains(wgpu::TextureUsages::RENDER_ATTACHMENT) {
            self.format
        } else {
            self.sample_format()
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kishar texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::COPY_DST | extra_usage,
            view_formats: &[],
        });

        if !pixels.is_empty() {
            self.write_pixels(&texture, pixels, width, height);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (bind_nearest, bind_linear) = self.make_bind_groups(&view);

        let id = self.alloc_texture_id();
        self.textures.insert(
            id,
            TextureEntry {
                _texture: texture,
                bind_nearest,
                bind_linear,
            },
        );
        (id, view)
    }

    fn write_pixels(&self, texture: &wgpu::Texture, pixels: &[u8], width: u32, height: u32) {
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
    }

    fn ensure_tier_slot(&mut self, tier: usize) {
        if self.tier_slots[tier].is_some() {
            return;
        }
        let quads = self.tier_quads[tier] as u64;
        let vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kishar tier vbo"),
            size: quads * 4 * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kishar tier ibo"),
            size: quads * 6 * std::mem::size_of::<u16>() as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.tier_slots[tier] = Some(TierSlot { vertex_buffer, index_buffer });
    }

    fn texture_bind_group(&self, texture: Option<TextureId>) -> Option<&wgpu::BindGroup> {
        let id = texture.unwrap_or(self.white);
        let entry = self.textures.get(&id)?;
        let filter = self
            .filter_overrides
            .get(&id)
            .copied()
            .unwrap_or(TextureFilter::Nearest);
        Some(match filter {
            TextureFilter::Nearest => &entry.bind_nearest,
            TextureFilter::Linear => &entry.bind_linear,
        })
    }
}

impl GpuBackend for WgpuBackend {
    fn upload_batch(&mut self, tier: usize, vertices: &[Vertex], indices: &[u16]) {
        self.ensure_tier_slot(tier);
        let slot = self.tier_slots[tier].as_ref().expect("tier slot just ensured");
        self.queue
            .write_buffer(&slot.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        self.queue
            .write_buffer(&slot.index_buffer, 0, bytemuck::cast_slice(indices));
    }

    fn draw_batch(&mut self, draw: &BatchDraw) {
        let target_size = self.target_size(draw.target);
        let Some((sx, sy, sw, sh)) = draw.clip.to_scissor(target_size.0, target_size.1) else {
            return;
        };

        let uniforms = Uniforms {
            surface: [target_size.0.max(1) as f32, target_size.1.max(1) as f32],
            _pad: [0.0; 2],
            tint: draw.tint.to_f32(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let Some(slot) = self.tier_slots.get(draw.tier).and_then(|s| s.as_ref()) else {
            log::error!("draw against an unuploaded tier {}", draw.tier);
            return;
        };

        // Resolve the attachment view. A missing screen attachment means the
        // integrator forgot attach_screen; drop the draw and say so once.
        let view = match draw.target {
            RenderTarget::Screen => match self.screen_view.as_ref() {
                Some(v) => v,
                None => {
                    if !self.warned_no_screen {
                        log::warn!("screen draw with no attached surface view; dropping");
                        self.warned_no_screen = true;
                    }
                    return;
                }
            },
            RenderTarget::Offscreen(id) => match self.offscreens.get(&id) {
                Some(entry) => &entry.view,
                None => {
                    log::warn!("draw against destroyed offscreen target {id:?}; dropping");
                    return;
                }
            },
        };

        let Some(texture_bind) = self.texture_bind_group(draw.texture) else {
            log::warn!("draw with unknown texture {:?}; dropping", draw.texture);
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kishar batch encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kishar batch pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            rpass.set_bind_group(1, texture_bind, &[]);
            rpass.set_vertex_buffer(0, slot.vertex_buffer.slice(..));
            rpass.set_index_buffer(slot.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn bind_target(&mut self, target: RenderTarget) {
        self.bound = target;
    }

    fn bound_target(&self) -> RenderTarget {
        self.bound
    }

    fn target_size(&self, target: RenderTarget) -> (u32, u32) {
        match target {
            RenderTarget::Screen => self.screen_size,
            RenderTarget::Offscreen(id) => {
                self.offscreens.get(&id).map(|e| e.size).unwrap_or((0, 0))
            }
        }
    }

    fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_size = (width.max(1), height.max(1));
    }

    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<TargetId> {
        let limit = self.device.limits().max_texture_dimension_2d;
        ensure!(
            width > 0 && height > 0 && width <= limit && height <= limit,
            "offscreen size {width}x{height} outside device limits"
        );

        let (texture_id, view) = self.register_texture(
            &[],
            width,
            height,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;
        self.offscreens.insert(
            id,
            OffscreenEntry { texture_id, view, size: (width, height) },
        );
        Ok(id)
    }

    fn destroy_offscreen(&mut self, id: TargetId) {
        if let Some(entry) = self.offscreens.remove(&id) {
            self.textures.remove(&entry.texture_id);
            self.filter_overrides.remove(&entry.texture_id);
        }
    }

    fn offscreen_texture(&self, id: TargetId) -> Option<TextureId> {
        self.offscreens.get(&id).map(|e| e.texture_id)
    }

    fn create_texture(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<TextureId> {
        let limit = self.device.limits().max_texture_dimension_2d;
        ensure!(
            width > 0 && height > 0 && width <= limit && height <= limit,
            "texture size {width}x{height} outside device limits"
        );
        ensure!(
            pixels.len() == (width * height * 4) as usize,
            "pixel buffer length {} does not match {width}x{height} RGBA8",
            pixels.len()
        );
        Ok(self
            .register_texture(pixels, width, height, wgpu::TextureUsages::TEXTURE_BINDING)
            .0)
    }

    fn upload_scratch(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<ScratchInfo> {
        let limit = self.device.limits().max_texture_dimension_2d;
        ensure!(
            width > 0 && height > 0 && width <= limit && height <= limit,
            "scratch size {width}x{height} outside device limits"
        );
        ensure!(
            pixels.len() >= (width * height * 4) as usize,
            "pixel buffer shorter than {width}x{height} RGBA8"
        );

        // Grow-only: reallocate when either dimension outgrows the current
        // allocation, otherwise reuse it and update the used region.
        let needs_alloc = match &self.scratch {
            Some((_, info)) => info.alloc.0 < width || info.alloc.1 < height,
            None => true,
        };

        if needs_alloc {
            let alloc = match &self.scratch {
                Some((old_id, info)) => {
                    self.textures.remove(old_id);
                    (info.alloc.0.max(width), info.alloc.1.max(height))
                }
                None => (width, height),
            };
            let (id, _) = self.register_texture(
                &[],
                alloc.0,
                alloc.1,
                wgpu::TextureUsages::TEXTURE_BINDING,
            );
            self.scratch = Some((
                id,
                ScratchInfo { texture: id, alloc, used: (width, height) },
            ));
        }

        let (id, mut info) = self.scratch.take().expect("scratch just ensured");
        info.used = (width, height);

        let entry = self.textures.get(&id).expect("scratch texture registered");
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &entry._texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels[..(width * height * 4) as usize],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );

        self.scratch = Some((id, info));
        Ok(info)
    }

    fn scratch_info(&self) -> Option<ScratchInfo> {
        self.scratch.as_ref().map(|(_, info)| *info)
    }

    fn set_filter_override(&mut self, target: TargetId, filter: TextureFilter) {
        if let Some(texture) = self.offscreen_texture(target) {
            self.filter_overrides.insert(texture, filter);
        }
    }

    fn reset_filter_override(&mut self, target: TargetId) {
        if let Some(texture) = self.offscreen_texture(target) {
            self.filter_overrides.remove(&texture);
        }
    }
}

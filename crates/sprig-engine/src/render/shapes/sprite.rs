use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::draw::{DrawCmd, DrawList};
use crate::drawable::{DrawableId, Drawables};
use crate::render::RenderCtx;

use super::common::{
    bind_quad_pipeline, create_viewport_ubo, logical_clip_to_scissor, push_batch, quad_pipeline,
    run_batches, viewport_layout_entry, Batch, InstanceBuffer, QuadBuffers, ViewportUniform,
};

/// Textured quad renderer for `DrawCmd::Sprite`.
///
/// Each drawable is uploaded once, on first use, into its own `Rgba8UnormSrgb`
/// texture and sampled with nearest filtering. Consecutive sprites sharing a
/// drawable and clip rect are drawn with a single instanced call.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    viewport: Option<ViewportBinding>,
    sampler: Option<wgpu::Sampler>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    textures: HashMap<DrawableId, GpuTexture>,
    batches: Vec<Batch<DrawableId>>,
}

struct ViewportBinding {
    bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

struct GpuTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawables currently resident on the GPU.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Uploads every `DrawCmd::Sprite` in `draw_list`, grouped by paint run,
    /// and the textures they sample.
    ///
    /// Commands referring to a drawable unknown to `drawables` are skipped.
    /// Returns `false` when there is nothing to draw this frame.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        draw_list: &mut DrawList,
        drawables: &Drawables,
    ) -> bool {
        self.batches.clear();
        let mut instances: Vec<SpriteInstance> = Vec::new();

        for (run, item) in draw_list.iter_runs_in_paint_order() {
            let DrawCmd::Sprite(cmd) = &item.cmd else { continue };
            let Some(drawable) = drawables.get(cmd.drawable) else {
                log::debug!("sprite references unknown drawable {:?}", cmd.drawable);
                continue;
            };
            let dest = cmd.dest().normalized();
            if dest.is_empty() || !dest.is_finite() || cmd.source.w <= 0 || cmd.source.h <= 0 {
                continue;
            }

            let (tw, th) = (drawable.width.max(1) as f32, drawable.height.max(1) as f32);
            let src = cmd.source;
            instances.push(SpriteInstance {
                dst_min: [dest.x, dest.y],
                dst_max: [dest.x + dest.w, dest.y + dest.h],
                uv_min: [src.x as f32 / tw, src.y as f32 / th],
                uv_max: [(src.x + src.w) as f32 / tw, (src.y + src.h) as f32 / th],
            });
            let end = instances.len() as u32;
            push_batch(&mut self.batches, run, cmd.drawable, item.clip_rect, end);
        }

        if instances.is_empty() {
            return false;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "sprig sprite quad"));
        }
        for i in 0..self.batches.len() {
            let id = self.batches[i].key;
            self.ensure_texture(ctx, drawables, id);
        }

        let uploaded = self.instances.upload(ctx, "sprig sprite instances", &instances).is_some();
        let Some(viewport) = self.viewport.as_ref().filter(|_| uploaded) else {
            self.batches.clear();
            return false;
        };

        ctx.queue.write_buffer(
            &viewport.ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform::of(ctx.viewport)),
        );
        true
    }

    /// Records the sprites of paint run `run`, one instanced call per
    /// drawable and clip rect.
    pub fn draw_run(&self, ctx: &RenderCtx<'_>, rpass: &mut wgpu::RenderPass<'_>, run: usize) {
        let (Some(pipeline), Some(viewport), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.viewport.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };

        let mut bound = false;
        for batch in run_batches(&self.batches, run) {
            let Some(texture) = self.textures.get(&batch.key) else { continue };
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            if !bound {
                bind_quad_pipeline(rpass, pipeline, &viewport.bind_group, quad, instance_vbo);
                bound = true;
            }
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.set_bind_group(1, &texture.bind_group, &[]);
            rpass.draw_indexed(0..6, 0, batch.start..batch.end);
        }
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, drawables: &Drawables, id: DrawableId) {
        if self.textures.contains_key(&id) {
            return;
        }
        let (Some(layout), Some(sampler), Some(image)) =
            (self.texture_layout.as_ref(), self.sampler.as_ref(), drawables.pixels(id))
        else {
            return;
        };

        let (width, height) = (image.width().max(1), image.height().max(1));
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprig drawable"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if image.width() > 0 && image.height() > 0 {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprig drawable bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!("uploaded drawable {:?} ({}x{})", id, width, height);
        self.textures.insert(id, GpuTexture { _texture: texture, bind_group });
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprig sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let viewport_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig sprite viewport bgl"),
            entries: &[viewport_layout_entry()],
        });

        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig sprite texture bgl"),
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

        let pipeline = quad_pipeline(
            ctx,
            "sprig sprite pipeline",
            &shader,
            &[&viewport_layout, &texture_layout],
            SpriteInstance::layout(),
        );

        let ubo = create_viewport_ubo(ctx, "sprig sprite viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprig sprite viewport bind group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        // Pixel art: no smoothing between texels.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprig sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.texture_layout = Some(texture_layout);
        self.viewport = Some(ViewportBinding { bind_group, ubo });
        self.sampler = Some(sampler);
        // Bind groups reference the old layout.
        self.textures.clear();
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2  // uv_max
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

use bytemuck::{Pod, Zeroable};

use crate::draw::{DrawCmd, DrawList};
use crate::render::RenderCtx;

use super::common::{
    bind_quad_pipeline, create_viewport_ubo, logical_clip_to_scissor, push_batch, quad_pipeline,
    run_batches, viewport_layout_entry, Batch, InstanceBuffer, QuadBuffers, ViewportUniform,
};

/// Solid rectangle renderer.
///
/// Geometry is provided as logical pixels, converted to NDC in the vertex shader using viewport.
/// Color is expected to be linear premultiplied RGBA (`paint::Color`).
#[derive(Default)]
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bindings: Option<Bindings>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    batches: Vec<Batch<()>>,
}

struct Bindings {
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads every `DrawCmd::Rect` in `draw_list`, grouped by paint run.
    ///
    /// Returns `false` when there is nothing to draw this frame.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) -> bool {
        self.batches.clear();
        let mut instances: Vec<RectInstance> = Vec::new();

        for (run, item) in draw_list.iter_runs_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };
            let r = cmd.rect.normalized();
            if r.is_empty() || !r.is_finite() {
                continue;
            }
            let c = cmd.color;
            instances.push(RectInstance {
                origin: [r.x, r.y],
                size: [r.w, r.h],
                color: [c.r, c.g, c.b, c.a],
            });
            push_batch(&mut self.batches, run, (), item.clip_rect, instances.len() as u32);
        }

        if instances.is_empty() {
            return false;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "sprig rect quad"));
        }
        let uploaded = self.instances.upload(ctx, "sprig rect instances", &instances).is_some();
        let Some(bindings) = self.bindings.as_ref().filter(|_| uploaded) else {
            self.batches.clear();
            return false;
        };

        ctx.queue.write_buffer(
            &bindings.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform::of(ctx.viewport)),
        );
        true
    }

    /// Records the rects of paint run `run`, one instanced call per clip rect.
    pub fn draw_run(&self, ctx: &RenderCtx<'_>, rpass: &mut wgpu::RenderPass<'_>, run: usize) {
        let (Some(pipeline), Some(bindings), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bindings.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };

        let mut bound = false;
        for batch in run_batches(&self.batches, run) {
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            if !bound {
                bind_quad_pipeline(rpass, pipeline, &bindings.bind_group, quad, instance_vbo);
                bound = true;
            }
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..6, 0, batch.start..batch.end);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprig rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig rect bgl"),
            entries: &[viewport_layout_entry()],
        });

        let pipeline =
            quad_pipeline(ctx, "sprig rect pipeline", &shader, &[&layout], RectInstance::layout());

        let viewport_ubo = create_viewport_ubo(ctx, "sprig rect viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprig rect bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bindings = Some(Bindings { bind_group, viewport_ubo });
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

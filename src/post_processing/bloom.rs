//! Glow around the bright parts of the scene.

use crate::context::Context;
use crate::post_processing::post_processing_effect::{PostProcessingContext, PostProcessingEffect};
use crate::resource::{RenderTarget, ResourceLedger};
use bytemuck::{Pod, Zeroable};

/// Tuning of the bloom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    /// Weight of the blurred highlights added back to the scene.
    pub strength: f32,
    /// Spread of the blur, in `[0, 1]`.
    pub radius: f32,
    /// Luminance above which a pixel contributes to the glow.
    pub threshold: f32,
    /// Exposure applied before tone mapping.
    pub exposure: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        BloomSettings {
            strength: 0.5,
            radius: 0.7,
            threshold: 0.85,
            exposure: 0.95,
        }
    }
}

/// Size of the blur targets for a `width` x `height` frame.
pub fn half_size(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct BloomUniforms {
    threshold: f32,
    strength: f32,
    radius: f32,
    exposure: f32,
    direction: [f32; 2],
    texel_size: [f32; 2],
}

impl BloomUniforms {
    fn new(settings: &BloomSettings, direction: [f32; 2], blur_size: (u32, u32)) -> Self {
        BloomUniforms {
            threshold: settings.threshold,
            strength: settings.strength,
            radius: settings.radius.clamp(0.0, 1.0),
            exposure: settings.exposure,
            direction,
            texel_size: [1.0 / blur_size.0 as f32, 1.0 / blur_size.1 as f32],
        }
    }
}

/// Bloom post processing effect.
///
/// Extracts the pixels brighter than the threshold, blurs them at half
/// resolution with a separable gaussian, then adds them back to the scene and
/// tone maps the result into the output view.
pub struct Bloom {
    settings: BloomSettings,
    bright: RenderTarget,
    blurred: RenderTarget,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    pass_layout: wgpu::BindGroupLayout,
    composite_layout: wgpu::BindGroupLayout,
    vertex_buffer: wgpu::Buffer,
    /// One uniform buffer per pass: bright, horizontal, vertical, composite.
    uniforms: [wgpu::Buffer; 4],
    dirty: bool,
}

impl Bloom {
    /// Creates the effect for a `width` x `height` frame.
    ///
    /// Its two blur targets are registered in `ledger`.
    pub fn new(ledger: &ResourceLedger, width: u32, height: u32, settings: BloomSettings) -> Bloom {
        let ctxt = Context::get();
        let (hw, hh) = half_size(width, height);
        let bright = RenderTarget::offscreen(ledger, "bloom_bright", hw, hh, Context::hdr_format(), false);
        let blurred = RenderTarget::offscreen(ledger, "bloom_blurred", hw, hh, Context::hdr_format(), false);

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let pass_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom_pass_bind_group_layout"),
            entries: &[texture_entry(0), sampler_entry, uniform_entry(2)],
        });
        let composite_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom_composite_bind_group_layout"),
            entries: &[texture_entry(0), sampler_entry, uniform_entry(2), texture_entry(3)],
        });

        let bright_pipeline = fullscreen_pipeline(
            "bloom_bright",
            include_str!("../builtin/bloom_bright.wgsl"),
            &pass_layout,
            Context::hdr_format(),
        );
        let blur_pipeline = fullscreen_pipeline(
            "bloom_blur",
            include_str!("../builtin/bloom_blur.wgsl"),
            &pass_layout,
            Context::hdr_format(),
        );
        let composite_pipeline = fullscreen_pipeline(
            "bloom_composite",
            include_str!("../builtin/bloom_composite.wgsl"),
            &composite_layout,
            ctxt.surface_format,
        );

        let vertices = [
            QuadVertex { position: [-1.0, -1.0] },
            QuadVertex { position: [1.0, -1.0] },
            QuadVertex { position: [-1.0, 1.0] },
            QuadVertex { position: [1.0, 1.0] },
        ];
        let vertex_buffer = ctxt.create_buffer_init(
            Some("bloom_vertex_buffer"),
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        );

        let uniform = |label| {
            ctxt.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<BloomUniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let uniforms = [
            uniform("bloom_bright_uniforms"),
            uniform("bloom_blur_h_uniforms"),
            uniform("bloom_blur_v_uniforms"),
            uniform("bloom_composite_uniforms"),
        ];

        Bloom {
            settings,
            bright,
            blurred,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            pass_layout,
            composite_layout,
            vertex_buffer,
            uniforms,
            dirty: true,
        }
    }

    #[inline]
    pub fn settings(&self) -> &BloomSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: BloomSettings) {
        self.settings = settings;
        self.dirty = true;
    }

    /// Resizes the blur targets for a `width` x `height` frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (hw, hh) = half_size(width, height);
        if self.bright.size() != Some((hw, hh)) {
            self.bright.resize(hw, hh);
            self.blurred.resize(hw, hh);
            self.dirty = true;
        }
    }

    /// Releases the blur targets' ledger entries.
    pub fn release(&mut self) {
        self.bright.release();
        self.blurred.release();
    }

    fn write_uniforms(&mut self) {
        let ctxt = Context::get();
        let blur_size = self.bright.size().unwrap_or((1, 1));
        let passes = [
            BloomUniforms::new(&self.settings, [0.0, 0.0], blur_size),
            BloomUniforms::new(&self.settings, [1.0, 0.0], blur_size),
            BloomUniforms::new(&self.settings, [0.0, 1.0], blur_size),
            BloomUniforms::new(&self.settings, [0.0, 0.0], blur_size),
        ];
        for (buffer, data) in self.uniforms.iter().zip(passes.iter()) {
            ctxt.write_buffer(buffer, 0, bytemuck::bytes_of(data));
        }
        self.dirty = false;
    }

    fn pass_bind_group(&self, source: &RenderTarget, uniforms: &wgpu::Buffer) -> Option<wgpu::BindGroup> {
        let ctxt = Context::get();
        let (view, sampler) = (source.color_view()?, source.sampler()?);

        Some(ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom_pass_bind_group"),
            layout: &self.pass_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        }))
    }

    fn run_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        pipeline: &wgpu::RenderPipeline,
        bind_group: &wgpu::BindGroup,
        output: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..4, 0..1);
    }
}

impl PostProcessingEffect for Bloom {
    fn update(&mut self, _: f32, width: u32, height: u32) {
        self.resize(width, height);
        if self.dirty {
            self.write_uniforms();
        }
    }

    fn draw(&mut self, source: &RenderTarget, context: &mut PostProcessingContext) {
        let ctxt = Context::get();

        let (Some(scene_view), Some(scene_sampler)) = (source.color_view(), source.sampler()) else {
            log::warn!("Bloom needs an offscreen source; skipping the frame.");
            return;
        };
        let (Some(bright_view), Some(blurred_view)) = (self.bright.color_view(), self.blurred.color_view())
        else {
            return;
        };

        let Some(bright_group) = self.pass_bind_group(source, &self.uniforms[0]) else {
            return;
        };
        let Some(horizontal_group) = self.pass_bind_group(&self.bright, &self.uniforms[1]) else {
            return;
        };
        let Some(vertical_group) = self.pass_bind_group(&self.blurred, &self.uniforms[2]) else {
            return;
        };

        self.run_pass(
            context.encoder,
            "bloom_bright_pass",
            &self.bright_pipeline,
            &bright_group,
            bright_view,
        );
        self.run_pass(
            context.encoder,
            "bloom_blur_h_pass",
            &self.blur_pipeline,
            &horizontal_group,
            blurred_view,
        );
        self.run_pass(
            context.encoder,
            "bloom_blur_v_pass",
            &self.blur_pipeline,
            &vertical_group,
            bright_view,
        );

        let composite_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom_composite_bind_group"),
            layout: &self.composite_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(scene_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniforms[3].as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(bright_view),
                },
            ],
        });

        self.run_pass(
            context.encoder,
            "bloom_composite_pass",
            &self.composite_pipeline,
            &composite_group,
            context.output_view,
        );
    }
}

fn fullscreen_pipeline(
    label: &str,
    source: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let ctxt = Context::get();

    let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = ctxt.create_shader_module(Some(label), source);

    let vertex_buffer_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        }],
    };

    ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_buffer_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_size_never_collapses() {
        assert_eq!(half_size(420, 380), (210, 190));
        assert_eq!(half_size(1, 1), (1, 1));
        assert_eq!(half_size(3, 0), (1, 1));
    }

    #[test]
    fn test_uniforms_match_shader_layout() {
        assert_eq!(std::mem::size_of::<BloomUniforms>(), 32);

        let u = BloomUniforms::new(&BloomSettings::default(), [1.0, 0.0], (200, 100));
        assert_eq!(u.threshold, 0.85);
        assert_eq!(u.texel_size, [0.005, 0.01]);
    }
}

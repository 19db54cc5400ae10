//! Blended rendering of the point clouds of the scene graph.

use crate::context::Context;
use crate::renderer::{RenderContext, Renderer3d};
use crate::scene::{ObjectKind, SceneGraph};
use bytemuck::{Pod, Zeroable};

/// World-space size of a rendered point.
pub const POINT_SIZE: f32 = 0.015;

/// Point data for the storage buffer.
/// Layout must match points.wgsl PointData struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct PointData {
    position: [f32; 3],
    size: f32,
    color: [f32; 4],
}

/// Layout must match points.wgsl FrameUniforms struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    viewport: [f32; 4],
}

/// Draws every visible point cloud as small camera-facing quads.
///
/// The material color gives the color of the points and its opacity fades
/// the whole cloud; this is what the starfield shimmer drives. Points are
/// depth tested against the scene but do not write depth.
pub struct PointRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    frame_uniform_buffer: wgpu::Buffer,
    point_storage_buffer: wgpu::Buffer,
    point_capacity: usize,
    points: Vec<PointData>,
}

impl PointRenderer {
    /// Creates the renderer, drawing into `color_format` with a depth buffer.
    pub fn new(color_format: wgpu::TextureFormat) -> PointRenderer {
        let ctxt = Context::get();

        let bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("point_renderer_bind_group_layout"),
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
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("point_renderer_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(
            Some("point_renderer_shader"),
            include_str!("../builtin/points.wgsl"),
        );

        // No vertex buffers: six vertices per point, read from the storage buffer.
        let pipeline = ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point_renderer_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Context::depth_format(),
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let frame_uniform_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point_renderer_frame_uniform_buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let point_capacity = 512;
        let point_storage_buffer = Self::create_storage_buffer(point_capacity);

        PointRenderer {
            pipeline,
            bind_group_layout,
            frame_uniform_buffer,
            point_storage_buffer,
            point_capacity,
            points: Vec::new(),
        }
    }

    fn create_storage_buffer(capacity: usize) -> wgpu::Buffer {
        Context::get().create_buffer(&wgpu::BufferDescriptor {
            label: Some("point_renderer_storage_buffer"),
            size: (std::mem::size_of::<PointData>() * capacity) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn ensure_storage_buffer_capacity(&mut self, needed: usize) {
        if needed > self.point_capacity {
            let new_capacity = needed.next_power_of_two();
            self.point_storage_buffer = Self::create_storage_buffer(new_capacity);
            self.point_capacity = new_capacity;
        }
    }

    fn collect(&mut self, scene: &SceneGraph) {
        self.points.clear();

        scene.walk_depth_first(|_, node, world| {
            let Some(object) = node.object() else {
                return;
            };
            if !object.is_visible() || object.kind() != ObjectKind::Points {
                return;
            }

            let m = object.material();
            let color = [m.color.r, m.color.g, m.color.b, m.color.a * m.opacity.clamp(0.0, 1.0)];

            self.points.extend(object.mesh().mesh().coords.iter().map(|p| PointData {
                position: world.transform_point3(*p).to_array(),
                size: POINT_SIZE,
                color,
            }));
        });
    }
}

impl Renderer3d for PointRenderer {
    fn render(
        &mut self,
        scene: &SceneGraph,
        render_pass: &mut wgpu::RenderPass<'_>,
        context: &RenderContext,
    ) {
        self.collect(scene);

        if self.points.is_empty() {
            return;
        }

        let ctxt = Context::get();

        let frame_uniforms = FrameUniforms {
            view: context.camera.view().to_cols_array_2d(),
            proj: context.camera.projection().to_cols_array_2d(),
            viewport: [
                0.0,
                0.0,
                context.viewport_width as f32,
                context.viewport_height as f32,
            ],
        };
        ctxt.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::bytes_of(&frame_uniforms),
        );

        self.ensure_storage_buffer_capacity(self.points.len());
        ctxt.write_buffer(
            &self.point_storage_buffer,
            0,
            bytemuck::cast_slice(&self.points),
        );

        let bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point_renderer_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.frame_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.point_storage_buffer.as_entire_binding(),
                },
            ],
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.draw(0..(self.points.len() * 6) as u32, 0..1);
    }
}

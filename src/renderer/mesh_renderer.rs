//! Lit rendering of the surface objects of the scene graph.

use crate::context::Context;
use crate::light::{Fog, LightCollection, LightType, MAX_LIGHTS};
use crate::renderer::{RenderContext, Renderer3d};
use crate::resource::{DynamicUniformBuffer, GpuMesh, MeshVertex, ResourceId};
use crate::scene::{Material, ObjectKind, SceneGraph};
use bytemuck::{Pod, Zeroable};
use glamx::{Mat4, Vec3};
use std::collections::{HashMap, HashSet};

/// A positional light as laid out in `mesh.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
struct GpuLight {
    /// Position with `w = 1` for point lights, direction towards the light
    /// with `w = 0` for directional ones.
    position: [f32; 4],
    /// Color premultiplied by the intensity.
    color: [f32; 4],
    /// Range and decay of point lights.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    /// Eye position, and the fog density in `w`.
    eye: [f32; 4],
    fog_color: [f32; 4],
    /// Ambient term, and the number of positional lights in `w`.
    ambient: [f32; 4],
    /// Hemisphere sky color, and its intensity in `w`.
    sky: [f32; 4],
    ground: [f32; 4],
    lights: [GpuLight; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    color: [f32; 4],
    /// Emissive color already scaled by the emissive intensity.
    emissive: [f32; 4],
    /// Roughness, metalness and opacity.
    params: [f32; 4],
}

impl FrameUniforms {
    fn new(view: Mat4, proj: Mat4, eye: Vec3, lights: &LightCollection, fog: &Fog) -> Self {
        let mut gpu_lights = [GpuLight::default(); MAX_LIGHTS];

        for (gpu, collected) in gpu_lights.iter_mut().zip(&lights.lights) {
            let light = &collected.light;
            let c = light.color;
            let pos = collected.world_position;

            *gpu = match light.light_type {
                LightType::Point { range, decay } => GpuLight {
                    position: [pos.x, pos.y, pos.z, 1.0],
                    color: [c.r * light.intensity, c.g * light.intensity, c.b * light.intensity, 1.0],
                    params: [range, decay, 0.0, 0.0],
                },
                _ => {
                    let dir = pos.normalize_or(Vec3::Y);
                    GpuLight {
                        position: [dir.x, dir.y, dir.z, 0.0],
                        color: [c.r * light.intensity, c.g * light.intensity, c.b * light.intensity, 1.0],
                        params: [0.0; 4],
                    }
                }
            };
        }

        let (sky, ground, hemi) = lights
            .hemisphere
            .unwrap_or((Vec3::ZERO, Vec3::ZERO, 0.0));

        FrameUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, fog.density],
            fog_color: [fog.color.r, fog.color.g, fog.color.b, 1.0],
            ambient: [
                lights.ambient.x,
                lights.ambient.y,
                lights.ambient.z,
                lights.len().min(MAX_LIGHTS) as f32,
            ],
            sky: [sky.x, sky.y, sky.z, hemi],
            ground: [ground.x, ground.y, ground.z, 0.0],
            lights: gpu_lights,
        }
    }
}

impl ObjectUniforms {
    fn new(world: &Mat4, material: &Material) -> Self {
        let e = material.emissive;
        let k = material.emissive_intensity.max(0.0);

        ObjectUniforms {
            model: world.to_cols_array_2d(),
            normal: world.inverse().transpose().to_cols_array_2d(),
            color: [material.color.r, material.color.g, material.color.b, material.color.a],
            emissive: [e.r * k, e.g * k, e.b * k, 0.0],
            params: [
                material.roughness.clamp(0.04, 1.0),
                material.metalness.clamp(0.0, 1.0),
                material.opacity.clamp(0.0, 1.0),
                0.0,
            ],
        }
    }
}

/// Draws every visible surface object with the standard lighting model:
/// ambient, hemisphere, directional and point lights, an emissive term and
/// exponential squared fog.
///
/// Geometries are uploaded the first time they are drawn and kept keyed by
/// their ledger id. Buffers of geometries that leave the scene are dropped at
/// the next frame.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    object_bind_group_layout: wgpu::BindGroupLayout,
    frame_uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_uniforms: DynamicUniformBuffer<ObjectUniforms>,
    object_bind_group: wgpu::BindGroup,
    meshes: HashMap<ResourceId, GpuMesh>,
}

impl MeshRenderer {
    /// Creates the renderer, drawing into `color_format` with a depth buffer.
    pub fn new(color_format: wgpu::TextureFormat) -> MeshRenderer {
        let ctxt = Context::get();

        let frame_bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_renderer_frame_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let object_bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_renderer_object_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(DynamicUniformBuffer::<ObjectUniforms>::binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_renderer_pipeline_layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(
            Some("mesh_renderer_shader"),
            include_str!("../builtin/mesh.wgsl"),
        );

        let pipeline = ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_renderer_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
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
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let frame_uniform_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_renderer_frame_uniform_buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_renderer_frame_bind_group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniform_buffer.as_entire_binding(),
            }],
        });

        let object_uniforms = DynamicUniformBuffer::new("mesh_renderer_object_uniforms", 128);
        let object_bind_group = Self::create_object_bind_group(&object_bind_group_layout, &object_uniforms);

        MeshRenderer {
            pipeline,
            object_bind_group_layout,
            frame_uniform_buffer,
            frame_bind_group,
            object_uniforms,
            object_bind_group,
            meshes: HashMap::new(),
        }
    }

    fn create_object_bind_group(
        layout: &wgpu::BindGroupLayout,
        uniforms: &DynamicUniformBuffer<ObjectUniforms>,
    ) -> wgpu::BindGroup {
        Context::get().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_renderer_object_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: uniforms.buffer(),
                    offset: 0,
                    size: Some(DynamicUniformBuffer::<ObjectUniforms>::binding_size()),
                }),
            }],
        })
    }
}

impl Renderer3d for MeshRenderer {
    fn render(
        &mut self,
        scene: &SceneGraph,
        render_pass: &mut wgpu::RenderPass<'_>,
        context: &RenderContext,
    ) {
        let ctxt = Context::get();
        let camera = context.camera;

        let frame = FrameUniforms::new(
            camera.view(),
            camera.projection(),
            camera.eye(),
            context.lights,
            context.fog,
        );
        ctxt.write_buffer(&self.frame_uniform_buffer, 0, bytemuck::bytes_of(&frame));

        let mut draws: Vec<(ResourceId, u32)> = Vec::new();
        let mut seen = HashSet::new();
        self.object_uniforms.clear();

        scene.walk_depth_first(|_, node, world| {
            let Some(object) = node.object() else {
                return;
            };
            if !object.is_visible() || object.kind() != ObjectKind::Surface {
                return;
            }

            let handle = object.mesh();
            let _ = seen.insert(handle.id());
            let _ = self
                .meshes
                .entry(handle.id())
                .or_insert_with(|| GpuMesh::upload(node.name, handle.mesh()));

            let offset = self
                .object_uniforms
                .push(&ObjectUniforms::new(world, object.material()));
            draws.push((handle.id(), offset));
        });

        // Geometries disposed since the previous frame.
        self.meshes.retain(|id, _| seen.contains(id));

        if self.object_uniforms.flush() {
            self.object_bind_group =
                Self::create_object_bind_group(&self.object_bind_group_layout, &self.object_uniforms);
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (id, offset) in draws {
            if let Some(mesh) = self.meshes.get(&id) {
                render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                mesh.draw(render_pass);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::light::{star_light, Light};

    #[test]
    fn test_emissive_is_scaled_by_intensity() {
        let material = Material::standard(color::TREE_GREEN, 0.5, 0.2).with_emissive(color::WHITE, 0.4);
        let uniforms = ObjectUniforms::new(&Mat4::IDENTITY, &material);

        assert_eq!(uniforms.emissive[0], 0.4);
        assert_eq!(uniforms.params, [0.5, 0.2, 1.0, 0.0]);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 176);
    }

    #[test]
    fn test_lights_are_packed_by_type() {
        let mut lights = LightCollection::new();
        let _ = lights.add(&Light::directional(), Vec3::new(0.0, 10.0, 0.0));
        let _ = lights.add(&star_light(), Vec3::new(0.0, 5.0, 0.0));

        let frame = FrameUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, &lights, &Fog::default());

        assert_eq!(frame.ambient[3], 2.0);
        assert_eq!(frame.lights[0].position, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(frame.lights[1].position, [0.0, 5.0, 0.0, 1.0]);
        assert_eq!(frame.lights[1].params[0], 6.0);
        assert_eq!(frame.eye[3], 0.012);
    }
}

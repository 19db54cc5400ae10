use crate::camera::Camera3d;
use crate::light::{Fog, LightCollection};
use crate::scene::SceneGraph;

/// Everything a renderer needs to know about the frame besides the scene.
pub struct RenderContext<'a> {
    pub camera: &'a dyn Camera3d,
    pub lights: &'a LightCollection,
    pub fog: &'a Fog,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// Trait implemented by the passes that draw the scene graph.
///
/// Renderers are invoked in order inside the same render pass, targeting the
/// HDR color buffer and its depth attachment.
pub trait Renderer3d {
    /// Draws the part of `scene` this renderer is responsible for.
    fn render(
        &mut self,
        scene: &SceneGraph,
        render_pass: &mut wgpu::RenderPass<'_>,
        context: &RenderContext,
    );
}

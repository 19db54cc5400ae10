//! Trait implemented by effects applied to the rendered scene.

use crate::resource::RenderTarget;

/// What an effect draws with: the frame's encoder and the view it writes to.
pub struct PostProcessingContext<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Final destination of the effect, usually the surface texture.
    pub output_view: &'a wgpu::TextureView,
}

/// Trait of post processing effects.
pub trait PostProcessingEffect {
    /// Updates the effect for the coming frame.
    fn update(&mut self, dt: f32, width: u32, height: u32);

    /// Reads `source` and writes the processed image to `context.output_view`.
    fn draw(&mut self, source: &RenderTarget, context: &mut PostProcessingContext);
}

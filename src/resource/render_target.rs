//! Offscreen color and depth attachments.

use super::{ResourceLedger, TargetSlot};
use crate::context::Context;

/// The target of a render pass.
pub enum RenderTarget {
    /// The presentation surface.
    Screen,
    /// An offscreen color texture, optionally with a depth attachment.
    Offscreen(Box<OffscreenBuffers>),
}

/// wgpu resources for an offscreen render target.
pub struct OffscreenBuffers {
    pub color_texture: wgpu::Texture,
    pub color_view: wgpu::TextureView,
    pub depth_view: Option<wgpu::TextureView>,
    /// Linear, clamped sampler reading `color_view`.
    pub sampler: wgpu::Sampler,
    pub format: wgpu::TextureFormat,
    slot: TargetSlot,
}

impl RenderTarget {
    /// Creates an offscreen target registered in `ledger`.
    pub fn offscreen(
        ledger: &ResourceLedger,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        with_depth: bool,
    ) -> RenderTarget {
        let slot = TargetSlot::new(ledger, width, height);
        RenderTarget::Offscreen(Box::new(OffscreenBuffers::new(label, slot, format, with_depth)))
    }

    pub fn color_view(&self) -> Option<&wgpu::TextureView> {
        match self {
            RenderTarget::Screen => None,
            RenderTarget::Offscreen(o) => Some(&o.color_view),
        }
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        match self {
            RenderTarget::Screen => None,
            RenderTarget::Offscreen(o) => o.depth_view.as_ref(),
        }
    }

    pub fn sampler(&self) -> Option<&wgpu::Sampler> {
        match self {
            RenderTarget::Screen => None,
            RenderTarget::Offscreen(o) => Some(&o.sampler),
        }
    }

    /// Size of the target, or `None` for the screen.
    pub fn size(&self) -> Option<(u32, u32)> {
        match self {
            RenderTarget::Screen => None,
            RenderTarget::Offscreen(o) => Some(o.slot.size()),
        }
    }

    /// Resizes this render target.
    ///
    /// Textures are only recreated when the size actually changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let RenderTarget::Offscreen(o) = self {
            if o.slot.resize(width, height) {
                let (w, h) = o.slot.size();
                let (color_texture, color_view) = create_color(w, h, o.format);
                o.color_texture = color_texture;
                o.color_view = color_view;
                o.depth_view = o.depth_view.is_some().then(|| create_depth(w, h));
            }
        }
    }

    /// Releases the target's ledger entry; its textures are dropped with it.
    pub fn release(&mut self) {
        if let RenderTarget::Offscreen(o) = self {
            o.slot.release();
        }
    }
}

impl OffscreenBuffers {
    fn new(label: &str, slot: TargetSlot, format: wgpu::TextureFormat, with_depth: bool) -> Self {
        let ctxt = Context::get();
        let (width, height) = slot.size();
        let (color_texture, color_view) = create_color(width, height, format);
        let depth_view = with_depth.then(|| create_depth(width, height));

        let sampler = ctxt.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        OffscreenBuffers {
            color_texture,
            color_view,
            depth_view,
            sampler,
            format,
            slot,
        }
    }
}

fn create_color(
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = Context::get().create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen_color_texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// Creates a depth attachment of the given size, floored at 1x1.
pub fn create_depth(width: u32, height: u32) -> wgpu::TextureView {
    let texture = Context::get().create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: Context::depth_format(),
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

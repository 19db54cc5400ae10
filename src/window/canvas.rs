//! The presentation surface of a window.

use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::resource::create_depth;
use winit::window::Window;

/// Canvas options.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSetup {
    /// Is vsync enabled?
    pub vsync: bool,
}

impl Default for CanvasSetup {
    fn default() -> Self {
        CanvasSetup { vsync: true }
    }
}

/// A window surface with its depth attachment.
///
/// The first canvas creates the global wgpu [`Context`]; the last one dropped
/// destroys it.
pub struct Canvas {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
}

impl Canvas {
    /// Creates a surface for `window`, initializing the wgpu context if needed.
    pub async fn open(window: Arc<Window>, setup: CanvasSetup) -> Result<Canvas> {
        let (surface, surface_format) = if Context::is_initialized() {
            let ctxt = Context::get();
            let surface = ctxt
                .instance
                .create_surface(window.clone())
                .map_err(|e| Error::Surface(e.to_string()))?;
            (surface, ctxt.surface_format)
        } else {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            let surface = instance
                .create_surface(window.clone())
                .map_err(|e| Error::Surface(e.to_string()))?;
            let ctxt = Context::create_for_surface(instance, &surface).await?;
            (surface, ctxt.surface_format)
        };

        let ctxt = Context::get();
        let surface_caps = surface.get_capabilities(&ctxt.adapter);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let present_mode = if setup.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctxt.device, &surface_config);
        Context::increment_canvas_count();

        Ok(Canvas {
            window,
            surface,
            surface_config,
            depth_view: create_depth(width, height),
        })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Size of the surface in physical pixels.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Depth attachment sized like the surface.
    #[inline]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Reconfigures the surface. Zero sizes (a minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return false;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface
            .configure(&Context::get().device, &self.surface_config);
        self.depth_view = create_depth(width, height);
        true
    }

    /// Gets the next surface texture to draw to.
    ///
    /// Returns `Ok(None)` when this frame must be skipped; a lost surface is
    /// reconfigured for the next one.
    pub fn get_current_texture(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(Some(texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring.");
                self.surface
                    .configure(&Context::get().device, &self.surface_config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the surface texture.");
                Ok(None)
            }
            Err(e) => Err(Error::Surface(e.to_string())),
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        if Context::decrement_canvas_count() {
            log::debug!("Last canvas closed, releasing the wgpu context.");
            Context::reset();
        }
    }
}

//! The native window showing the card.

use std::collections::HashMap;
use std::sync::Arc;

use crate::animation::FrameClock;
use crate::card::{
    is_clear_gesture, quip_chain, share_chain, CardSession, Greeting, JsonFileStore, Jukebox,
    KeyValueStore, MemoryStore,
};
use crate::config::AppConfig;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Action, Key, Modifiers, MouseButton, TouchAction, WindowEvent};
use crate::light::{Fog, LightCollection};
use crate::post_processing::{Bloom, BloomSettings, PostProcessingContext, PostProcessingEffect};
use crate::renderer::{MeshRenderer, PointRenderer, RenderContext, Renderer3d};
use crate::resource::{RenderTarget, ResourceLedger};
use crate::window::canvas::{Canvas, CanvasSetup};
use crate::window::events::EventTranslator;
use crate::window::mount::Mount;
use glamx::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window as WinitWindow, WindowId};

/// Cursor travel, in pixels, below which a press and release count as a click.
const CLICK_SLOP: f32 = 4.0;

/// Entry point of the native card.
pub struct Window;

impl Window {
    /// Opens the card window and runs it until it is closed.
    pub fn run(config: AppConfig) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = CardApp::new(config)?;
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// GPU state of an open window.
///
/// Fields drop in order: the canvas goes last since it may release the
/// global context.
struct CardView {
    mount: Mount,
    meshes: MeshRenderer,
    points: PointRenderer,
    bloom: Bloom,
    hdr: RenderTarget,
    fog: Fog,
    canvas: Canvas,
}

struct CardApp {
    config: AppConfig,
    rng: StdRng,
    ledger: ResourceLedger,
    translator: EventTranslator,
    clock: FrameClock,
    card: CardSession,
    view: Option<CardView>,
    press: Option<Vec2>,
    touches: HashMap<u64, Vec2>,
    title: String,
    error: Option<Error>,
}

impl CardApp {
    fn new(config: AppConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let store: Box<dyn KeyValueStore> = match JsonFileStore::open(&config.store) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!(
                    "Cannot open {}: {}. The message will not be kept.",
                    config.store.display(),
                    e
                );
                Box::new(MemoryStore::new())
            }
        };
        let greeting = config
            .linked_greeting()
            .unwrap_or_else(|| Greeting::load(store.as_ref()));

        let card = CardSession::new(
            greeting,
            store,
            Jukebox::logged(),
            &config.track(),
            config.share_base()?,
            share_chain(None, None),
            quip_chain(None),
            (config.width as f32, config.height as f32),
            &mut rng,
        );

        Ok(CardApp {
            config,
            rng,
            ledger: ResourceLedger::new(),
            translator: EventTranslator::new(),
            clock: FrameClock::new(),
            card,
            view: None,
            press: None,
            touches: HashMap::new(),
            title: String::new(),
            error: None,
        })
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<CardView> {
        let attrs = WinitWindow::default_attributes()
            .with_title("yule3d")
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| Error::Surface(e.to_string()))?;

        let canvas = pollster::block_on(Canvas::open(Arc::new(window), CanvasSetup::default()))?;
        let (width, height) = canvas.size();

        let mut mount = Mount::new(self.config.scene_parameters(), &mut self.rng, &self.ledger)?;
        mount.resize(width, height)?;

        Ok(CardView {
            mount,
            meshes: MeshRenderer::new(Context::hdr_format()),
            points: PointRenderer::new(Context::hdr_format()),
            bloom: Bloom::new(&self.ledger, width, height, BloomSettings::default()),
            hdr: RenderTarget::offscreen(
                &self.ledger,
                "scene_hdr",
                width,
                height,
                Context::hdr_format(),
                false,
            ),
            fog: Fog::default(),
            canvas,
        })
    }

    /// Unmounts the scene, then drops every GPU resource.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut view) = self.view.take() {
            let released = view.mount.unmount();
            view.bloom.release();
            view.hdr.release();
            log::info!(
                "Closed the card: {} scene resources released, {} still live.",
                released,
                self.ledger.total_live()
            );
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{}", error);
        self.error = Some(error);
        self.close(event_loop);
    }

    fn handle_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<()> {
        match event {
            WindowEvent::Close | WindowEvent::Key(Key::Escape, Action::Release, _) => {
                self.close(event_loop);
                return Ok(());
            }
            WindowEvent::FramebufferSize(width, height) => self.resize(width, height),
            WindowEvent::Key(key, Action::Press, _) => self.handle_key(key),
            WindowEvent::MouseButton(button, action, modifiers) => {
                self.handle_button(button, action, modifiers)
            }
            WindowEvent::Touch(id, x, y, action, _) => self.handle_touch(id, x, y, action),
            _ => {}
        }

        if let Some(view) = &mut self.view {
            view.mount.handle_event(&event);
        }

        Ok(())
    }

    /// Resizes the surface and the scene. A scene that cannot be resized keeps
    /// its previous size and the card keeps running.
    fn resize(&mut self, width: u32, height: u32) {
        let Some(view) = &mut self.view else {
            return;
        };

        if view.canvas.resize(width, height) {
            view.hdr.resize(width, height);
            if let Err(e) = view.mount.resize(width, height) {
                log::warn!("Cannot resize the scene to {}x{}: {}", width, height, e);
            }
            self.card.resize(width as f32, height as f32);
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Space => {
                if let Some(view) = &mut self.view {
                    let speed = view.mount.click();
                    log::debug!("Spin speed is now {:?}.", speed);
                }
            }
            Key::H => {
                let _ = self.card.quip();
            }
            Key::C => {
                let point = self.cursor().unwrap_or_else(|| self.center());
                let _ = self.card.clear_snow(&[point]);
            }
            Key::F => self.card.launch_confetti(&mut self.rng),
            Key::E => {
                let _ = self.card.tap_envelope(&mut self.rng);
            }
            Key::S => match self.card.share() {
                Some(via) => log::info!("Shared the card via {}.", via),
                None => log::warn!("The card could not be shared."),
            },
            Key::M => {
                let _ = self.card.toggle_music();
            }
            Key::Escape | Key::Unknown => {}
        }
    }

    fn handle_button(
        &mut self,
        button: MouseButton,
        action: Action,
        modifiers: Modifiers,
    ) {
        let cursor = self.cursor();

        match (button, action) {
            (MouseButton::Button1 | MouseButton::Button2, Action::Press)
                if is_clear_gesture(
                    0,
                    modifiers.contains(Modifiers::Shift),
                    button == MouseButton::Button2,
                ) =>
            {
                if let Some(point) = cursor {
                    let _ = self.card.clear_snow(&[point]);
                }
            }
            (MouseButton::Button1, Action::Press) => self.press = cursor,
            (MouseButton::Button1, Action::Release) => {
                let clicked = match (self.press.take(), cursor) {
                    (Some(from), Some(to)) => from.distance(to) < CLICK_SLOP,
                    _ => false,
                };

                if clicked {
                    if !self.card.envelope().is_open() {
                        let _ = self.card.tap_envelope(&mut self.rng);
                    } else if let Some(view) = &mut self.view {
                        let _ = view.mount.click();
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_touch(&mut self, id: u64, x: f64, y: f64, action: TouchAction) {
        let point = Vec2::new(x as f32, y as f32);

        match action {
            TouchAction::Start | TouchAction::Move => {
                let _ = self.touches.insert(id, point);
            }
            TouchAction::End | TouchAction::Cancel => {
                let _ = self.touches.remove(&id);
                return;
            }
        }

        if is_clear_gesture(self.touches.len(), false, false) {
            let points: Vec<Vec2> = self.touches.values().copied().collect();
            let _ = self.card.clear_snow(&points);
        }
    }

    fn cursor(&self) -> Option<Vec2> {
        self.translator
            .cursor()
            .map(|(x, y)| Vec2::new(x as f32, y as f32))
    }

    fn center(&self) -> Vec2 {
        match &self.view {
            Some(view) => {
                let (w, h) = view.canvas.size();
                Vec2::new(w as f32, h as f32) * 0.5
            }
            None => Vec2::ZERO,
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let dt = self.clock.tick();
        self.card.update(dt, &mut self.rng);
        self.update_title();

        let Some(view) = &mut self.view else {
            return Ok(());
        };

        if view.mount.frame(dt)? {
            render(view, dt)?;
        }

        view.canvas.request_redraw();
        Ok(())
    }

    fn update_title(&mut self) {
        let title = self.card.visible_title().replace('\n', " ");
        if title != self.title {
            if let Some(view) = &self.view {
                view.canvas.window().set_title(&title);
            }
            self.title = title;
        }
    }
}

/// Draws the scene into the HDR target, then blooms it onto the surface.
fn render(view: &mut CardView, dt: f32) -> Result<()> {
    let Some(frame) = view.canvas.get_current_texture()? else {
        return Ok(());
    };
    let output = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let Some(color_view) = view.hdr.color_view() else {
        return Ok(());
    };

    let ctxt = Context::get();
    let (width, height) = view.canvas.size();
    let graph = &view.mount.scene().graph;
    let lights = LightCollection::gather(graph);
    let mut encoder = ctxt.create_command_encoder(Some("yule3d_frame"));

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: view.canvas.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let context = RenderContext {
            camera: view.mount.camera(),
            lights: &lights,
            fog: &view.fog,
            viewport_width: width,
            viewport_height: height,
        };

        view.meshes.render(graph, &mut render_pass, &context);
        view.points.render(graph, &mut render_pass, &context);
    }

    view.bloom.update(dt, width, height);
    view.bloom.draw(
        &view.hdr,
        &mut PostProcessingContext {
            encoder: &mut encoder,
            output_view: &output,
        },
    );

    ctxt.submit(std::iter::once(encoder.finish()));
    frame.present();
    Ok(())
}

impl ApplicationHandler for CardApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }

        match self.open(event_loop) {
            Ok(view) => {
                view.canvas.request_redraw();
                self.view = Some(view);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        let result = match event {
            WinitWindowEvent::RedrawRequested => self.redraw(),
            ref event => match self.translator.translate(event) {
                Some(event) => self.handle_event(event_loop, event),
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }
}

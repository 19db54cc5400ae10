//! A mounted greeting scene, independent of any window or GPU.

use crate::animation::{advance, FrameClock, FrameLoop, SceneState, SpinControl, SpinSpeed};
use crate::camera::{Camera3d, OrbitCamera3d};
use crate::error::Result;
use crate::event::WindowEvent;
use crate::resource::{ResourceLedger, TargetSlot};
use crate::tree::{build_tree_scene, SceneParameters, TreeScene};
use crate::window::lifecycle::{Lifecycle, LifecycleState};
use rand::Rng;

/// One scene instance, from mount to unmount.
///
/// `Mount` owns the scene graph, the animation state, the orbit camera and the
/// frame loop. It does not draw: the host calls [`frame`](Self::frame) when
/// the display is ready and then renders [`scene`](Self::scene) through
/// [`camera`](Self::camera). Its surface is registered in the ledger as a
/// render target sized like the parameters, so tests can check for leaks
/// without a GPU.
pub struct Mount {
    lifecycle: Lifecycle,
    params: SceneParameters,
    scene: TreeScene,
    state: SceneState,
    spin: SpinControl,
    camera: OrbitCamera3d,
    frame_loop: FrameLoop,
    clock: FrameClock,
    surface: TargetSlot,
    ledger: ResourceLedger,
}

impl Mount {
    /// Builds the scene and starts the frame loop.
    pub fn new<R: Rng + ?Sized>(
        params: SceneParameters,
        rng: &mut R,
        ledger: &ResourceLedger,
    ) -> Result<Mount> {
        let mut lifecycle = Lifecycle::new();
        lifecycle.transition(LifecycleState::Building)?;

        let scene = build_tree_scene(params, ledger, rng);
        let mut camera = OrbitCamera3d::for_tree(scene.look_at());
        camera.set_aspect(params.width(), params.height());
        let state = SceneState::for_scene(&scene);
        let surface = TargetSlot::new(ledger, params.width(), params.height());

        let mut frame_loop = FrameLoop::new();
        let _ = frame_loop.schedule();
        lifecycle.transition(LifecycleState::Running)?;

        log::info!(
            "Mounted a {}x{} scene with {} nodes.",
            params.width(),
            params.height(),
            scene.graph.len()
        );

        Ok(Mount {
            lifecycle,
            params,
            scene,
            state,
            spin: SpinControl::new(params.interactive()),
            camera,
            frame_loop,
            clock: FrameClock::new(),
            surface,
            ledger: ledger.clone(),
        })
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    #[inline]
    pub fn params(&self) -> &SceneParameters {
        &self.params
    }

    #[inline]
    pub fn scene(&self) -> &TreeScene {
        &self.scene
    }

    #[inline]
    pub fn scene_state(&self) -> &SceneState {
        &self.state
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera3d {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut OrbitCamera3d {
        &mut self.camera
    }

    #[inline]
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    #[inline]
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Size of the rendered surface.
    #[inline]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface.size()
    }

    /// Forwards an input event to the orbit camera.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if self.lifecycle.state() == LifecycleState::Running {
            self.camera.handle_event(event);
        }
    }

    /// Resizes the camera and the surface; the scene graph is left untouched.
    ///
    /// The latest call wins. On error the previous size stays in effect.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.lifecycle.transition(LifecycleState::Resizing)?;

        self.params = self.params.resized(width, height);
        self.camera.set_aspect(self.params.width(), self.params.height());
        if self.surface.resize(self.params.width(), self.params.height()) {
            log::debug!("Reallocated the scene surface at {:?}.", self.surface.size());
        }

        self.lifecycle.transition(LifecycleState::Running)
    }

    /// Flips the spin speed if the scene is interactive.
    pub fn click(&mut self) -> SpinSpeed {
        let speed = self.spin.click();
        self.state.spin = speed.radians_per_second();
        speed
    }

    /// Runs one frame of `dt` seconds if one is pending, then asks for the next.
    ///
    /// Returns `Ok(false)` when no frame was pending. Calling it once the scene
    /// is no longer running is an error.
    pub fn frame(&mut self, dt: f32) -> Result<bool> {
        self.lifecycle.ensure_running()?;

        if !self.frame_loop.fire() {
            return Ok(false);
        }

        self.state = advance(&self.state, dt);
        self.state.apply(&mut self.scene);
        self.camera.update(dt);

        Ok(self.frame_loop.schedule())
    }

    /// Runs one frame timed by the mount's own monotonic clock.
    pub fn tick(&mut self) -> Result<bool> {
        let dt = self.clock.tick();
        self.frame(dt)
    }

    /// Cancels the frame loop, then releases every resource of the scene.
    ///
    /// Returns the number of released geometries and materials. Unmounting an
    /// unmounted scene does nothing and returns 0.
    pub fn unmount(&mut self) -> usize {
        match self.lifecycle.state() {
            LifecycleState::Running => {}
            LifecycleState::Unmounted => return 0,
            other => {
                log::warn!("Cannot unmount a scene in state {:?}.", other);
                return 0;
            }
        }

        // Nothing may fire after this point.
        let _ = self.frame_loop.cancel();

        if let Err(e) = self.lifecycle.transition(LifecycleState::Disposing) {
            log::warn!("{}", e);
        }

        let released = self.scene.dispose();
        self.surface.release();

        if let Err(e) = self.lifecycle.transition(LifecycleState::Unmounted) {
            log::warn!("{}", e);
        }

        log::info!("Unmounted the scene, {} resources released.", released);
        released
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        let _ = self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mount(interactive: bool) -> (Mount, ResourceLedger) {
        let ledger = ResourceLedger::new();
        let mut rng = StdRng::seed_from_u64(7);
        let params = SceneParameters::new(420, 380, 1.0, interactive);
        (Mount::new(params, &mut rng, &ledger).unwrap(), ledger)
    }

    #[test]
    fn test_frames_advance_time() {
        let (mut mount, _ledger) = mount(false);

        assert!(mount.frame(0.5).unwrap());
        assert!(mount.frame(0.25).unwrap());
        assert!((mount.scene_state().elapsed - 0.75).abs() < 1.0e-6);
        assert_eq!(mount.frame_loop().frames(), 2);
    }

    #[test]
    fn test_unmount_cancels_before_disposing() {
        let (mut mount, ledger) = mount(true);
        assert!(ledger.total_live() > 0);

        let released = mount.unmount();
        assert!(released > 0);
        assert!(mount.frame_loop().is_cancelled());
        assert!(!mount.frame_loop().is_pending());
        assert_eq!(ledger.total_live(), 0);
        assert_eq!(ledger.live(ResourceKind::RenderTarget), 0);

        assert_eq!(mount.unmount(), 0);
        assert_eq!(ledger.double_releases(), 0);
        assert!(mount.frame(0.1).is_err());
    }

    #[test]
    fn test_surface_is_only_reallocated_on_size_changes() {
        let (mut mount, ledger) = mount(true);
        let allocated = ledger.total_allocated();

        mount.resize(420, 380).unwrap();
        assert_eq!(ledger.total_allocated(), allocated);

        mount.resize(640, 480).unwrap();
        assert_eq!(ledger.total_allocated(), allocated + 1);
        assert_eq!(mount.surface_size(), (640, 480));
        assert_eq!(ledger.live(ResourceKind::RenderTarget), 1);
    }
}

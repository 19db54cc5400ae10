use crate::camera::Camera3d;
use crate::event::{Action, MouseButton, TouchAction, WindowEvent};
use glamx::{Mat4, Vec2, Vec3};
use std::collections::HashMap;

/// Bounds of the orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Smallest angle between the view direction and the vertical axis.
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        OrbitLimits {
            min_distance: 4.8,
            max_distance: 9.2,
            min_polar: std::f32::consts::PI / 3.0,
            max_polar: std::f32::consts::PI / 1.9,
        }
    }
}

impl OrbitLimits {
    #[inline]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    #[inline]
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.min_polar, self.max_polar)
    }
}

/// Fraction of the remaining motion applied per 60 Hz frame.
pub const ORBIT_DAMPING: f32 = 0.06;

/// An orbit camera with damped motion, circling a fixed point.
///
/// # Controls
/// - **Left mouse + drag** or **one-finger drag**: orbit.
/// - **Mouse wheel** or **two-finger pinch**: zoom.
///
/// Input moves a target orientation; [`update`](Camera3d::update) eases the
/// camera towards it. The distance and the polar angle are clamped to
/// [`OrbitLimits`] on the target as well as on the eased state, so neither ever
/// leaves its bounds.
#[derive(Clone, Debug)]
pub struct OrbitCamera3d {
    at: Vec3,
    yaw: f32,
    polar: f32,
    distance: f32,
    target_yaw: f32,
    target_polar: f32,
    target_distance: f32,
    limits: OrbitLimits,
    damping: f32,
    zoom_step: f32,

    fov: f32,
    znear: f32,
    zfar: f32,
    viewport: Vec2,

    rotate_button: Option<MouseButton>,
    rotating: bool,
    last_cursor_pos: Option<Vec2>,
    touches: HashMap<u64, Vec2>,

    view: Mat4,
    proj: Mat4,
}

impl OrbitCamera3d {
    /// Creates a camera at `eye` looking at `at`, with the default limits.
    ///
    /// `eye` is pulled within the limits right away.
    pub fn new(eye: Vec3, at: Vec3) -> OrbitCamera3d {
        Self::with_limits(eye, at, OrbitLimits::default())
    }

    pub fn with_limits(eye: Vec3, at: Vec3, limits: OrbitLimits) -> OrbitCamera3d {
        let offset = eye - at;
        let distance = limits.clamp_distance(offset.length());
        let polar = limits.clamp_polar(if offset.length() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            std::f32::consts::FRAC_PI_2
        });
        let yaw = offset.x.atan2(offset.z);

        let mut res = OrbitCamera3d {
            at,
            yaw,
            polar,
            distance,
            target_yaw: yaw,
            target_polar: polar,
            target_distance: distance,
            limits,
            damping: ORBIT_DAMPING,
            zoom_step: 0.95,
            fov: 45.0f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
            viewport: Vec2::new(800.0, 600.0),
            rotate_button: Some(MouseButton::Button1),
            rotating: false,
            last_cursor_pos: None,
            touches: HashMap::new(),
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        };
        res.update_projviews();
        res
    }

    /// The camera of the greeting: slightly above the ground, in front of the
    /// tree, looking at `at`.
    pub fn for_tree(at: Vec3) -> OrbitCamera3d {
        Self::new(Vec3::new(0.0, 2.2, 8.0), at)
    }

    #[inline]
    pub fn at(&self) -> Vec3 {
        self.at
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Angle between the vertical axis and the direction from `at` to the eye.
    #[inline]
    pub fn polar(&self) -> f32 {
        self.polar
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The `(yaw, polar, distance)` the camera is easing towards.
    #[inline]
    pub fn target(&self) -> (f32, f32, f32) {
        (self.target_yaw, self.target_polar, self.target_distance)
    }

    #[inline]
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Vertical field of view, in radians.
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Sets the viewport size used for the aspect ratio and the drag speed.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.update_projviews();
    }

    /// Sets the damping factor, in `(0, 1]`. `1` disables smoothing.
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(f32::EPSILON, 1.0);
    }

    /// Sets the mouse button used to orbit, or `None` to disable mouse orbiting.
    pub fn rebind_rotate_button(&mut self, button: Option<MouseButton>) {
        self.rotate_button = button;
        self.rotating = false;
    }

    /// Orbits by a cursor displacement in pixels.
    ///
    /// Dragging across the full viewport height turns the camera once around.
    pub fn handle_rotate(&mut self, dpos: Vec2) {
        let per_pixel = std::f32::consts::TAU / self.viewport.y;
        self.target_yaw -= dpos.x * per_pixel;
        self.target_polar = self.limits.clamp_polar(self.target_polar - dpos.y * per_pixel);
    }

    /// Zooms by a scroll offset; positive offsets move closer.
    pub fn handle_scroll(&mut self, off: f32) {
        let factor = self.zoom_step.powf(off / 10.0);
        self.handle_zoom(factor);
    }

    /// Multiplies the target distance by `factor`.
    pub fn handle_zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.target_distance = self.limits.clamp_distance(self.target_distance * factor);
        }
    }

    fn handle_touch(&mut self, id: u64, pos: Vec2, action: TouchAction) {
        match action {
            TouchAction::Start => {
                let _ = self.touches.insert(id, pos);
            }
            TouchAction::End | TouchAction::Cancel => {
                let _ = self.touches.remove(&id);
            }
            TouchAction::Move => {
                let Some(prev) = self.touches.get(&id).copied() else {
                    return;
                };

                match self.touches.len() {
                    1 => self.handle_rotate(pos - prev),
                    2 => {
                        let other = self
                            .touches
                            .iter()
                            .find(|(k, _)| **k != id)
                            .map(|(_, p)| *p);
                        if let Some(other) = other {
                            let before = prev.distance(other);
                            let after = pos.distance(other);
                            if after > f32::EPSILON {
                                self.handle_zoom(before / after);
                            }
                        }
                    }
                    _ => {}
                }

                let _ = self.touches.insert(id, pos);
            }
        }
    }

    fn update_projviews(&mut self) {
        let aspect = self.viewport.x / self.viewport.y;
        self.view = Mat4::look_at_rh(self.eye(), self.at, Vec3::Y);
        self.proj = Mat4::perspective_rh(self.fov, aspect, self.znear, self.zfar);
    }
}

impl Camera3d for OrbitCamera3d {
    fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::MouseButton(button, action, _) => {
                if Some(button) == self.rotate_button {
                    self.rotating = action == Action::Press;
                }
            }
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vec2::new(x as f32, y as f32);

                if let (true, Some(last)) = (self.rotating, self.last_cursor_pos) {
                    self.handle_rotate(curr_pos - last);
                }

                self.last_cursor_pos = Some(curr_pos);
            }
            WindowEvent::Scroll(_, off, _) => self.handle_scroll(off as f32),
            WindowEvent::Touch(id, x, y, action, _) => {
                self.handle_touch(id, Vec2::new(x as f32, y as f32), action)
            }
            WindowEvent::FramebufferSize(w, h) => self.set_aspect(w, h),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        let frames = if dt.is_finite() { dt.max(0.0) * 60.0 } else { 0.0 };
        let alpha = 1.0 - (1.0 - self.damping).powf(frames);

        self.yaw += (self.target_yaw - self.yaw) * alpha;
        self.polar = self
            .limits
            .clamp_polar(self.polar + (self.target_polar - self.polar) * alpha);
        self.distance = self
            .limits
            .clamp_distance(self.distance + (self.target_distance - self.distance) * alpha);

        self.update_projviews();
    }

    fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.at + Vec3::new(sp * sy, cp, sp * cy) * self.distance
    }

    fn view(&self) -> Mat4 {
        self.view
    }

    fn projection(&self) -> Mat4 {
        self.proj
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    #[test]
    fn test_initial_eye_is_pulled_within_limits() {
        let camera = OrbitCamera3d::for_tree(Vec3::new(0.0, 3.52, 0.0));
        let limits = OrbitLimits::default();

        assert!((camera.polar() - limits.max_polar).abs() < 1.0e-6);
        assert!((camera.distance() - (1.32f32 * 1.32 + 64.0).sqrt()).abs() < 1.0e-4);
        assert!(camera.yaw().abs() < 1.0e-6);
    }

    #[test]
    fn test_drag_moves_the_target_then_the_camera() {
        let mut camera = OrbitCamera3d::for_tree(Vec3::new(0.0, 3.52, 0.0));
        camera.set_aspect(400, 400);
        let none = Modifiers::empty();

        camera.handle_event(&WindowEvent::CursorPos(100.0, 100.0, none));
        camera.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Press, none));
        camera.handle_event(&WindowEvent::CursorPos(140.0, 100.0, none));

        let (target_yaw, _, _) = camera.target();
        assert!(target_yaw < 0.0);
        assert_eq!(camera.yaw(), 0.0);

        camera.update(1.0 / 60.0);
        assert!((camera.yaw() - target_yaw * ORBIT_DAMPING).abs() < 1.0e-5);

        camera.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Release, none));
        camera.handle_event(&WindowEvent::CursorPos(300.0, 100.0, none));
        assert_eq!(camera.target().0, target_yaw);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut camera = OrbitCamera3d::for_tree(Vec3::ZERO);
        camera.handle_zoom(0.5);
        camera.update(0.0);
        assert!((camera.distance() - camera.limits().max_distance).abs() > 1.0e-3);
        assert_eq!(camera.target().2, camera.limits().min_distance);
    }
}

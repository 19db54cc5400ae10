use crate::event::WindowEvent;
use glamx::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Trait that all camera implementations must implement.
///
/// A camera reacts to input events, advances its own motion once per frame,
/// and exposes the matrices the renderers need.
pub trait Camera3d {
    /// Handles a window event to update the camera state.
    fn handle_event(&mut self, event: &WindowEvent);

    /// Advances any smoothed motion by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// The camera position in world space.
    fn eye(&self) -> Vec3;

    /// World to camera space.
    fn view(&self) -> Mat4;

    /// Camera space to clip space, with a `[0, 1]` depth range.
    fn projection(&self) -> Mat4;

    /// The near and far clipping plane distances.
    fn clip_planes(&self) -> (f32, f32);

    /// World to clip space.
    fn transformation(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Projects a world-space point to pixel coordinates, origin at the top-left.
    fn project(&self, world_coord: Vec3, size: Vec2) -> Vec2 {
        let h = self.transformation() * world_coord.extend(1.0);
        let ndc = h.xyz() / h.w;

        Vec2::new(
            (1.0 + ndc.x) * size.x / 2.0,
            (1.0 - ndc.y) * size.y / 2.0,
        )
    }
}

//! Cameras looking at the scene.

pub use self::camera3d::Camera3d;
pub use self::orbit3d::{OrbitCamera3d, OrbitLimits, ORBIT_DAMPING};

mod camera3d;
mod orbit3d;

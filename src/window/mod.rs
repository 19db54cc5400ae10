//! The window, the lifecycle of the scene it shows, and input translation.

mod canvas;
mod events;
mod lifecycle;
mod mount;
mod window;

pub use canvas::{Canvas, CanvasSetup};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use mount::Mount;
pub use window::Window;

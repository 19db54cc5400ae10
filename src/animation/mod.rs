//! The animation loop: a pure per-frame step, and its scheduling.

pub use self::frame_loop::{CancelHandle, FrameClock, FrameLoop};
pub use self::state::{advance, SceneState, SpinControl, SpinSpeed, SPIN_FAST, SPIN_SLOW};

mod frame_loop;
mod state;

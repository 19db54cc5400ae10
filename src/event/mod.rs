//! Window and input events, decoupled from the windowing backend.

pub use self::window_event::{Action, Key, Modifiers, MouseButton, TouchAction, WindowEvent};

mod window_event;

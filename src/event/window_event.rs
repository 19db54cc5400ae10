use bitflags::bitflags;

/// An event coming from the window or the input devices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowEvent {
    /// The framebuffer was resized to the given size in physical pixels.
    FramebufferSize(u32, u32),
    /// The user asked to close the window.
    Close,
    /// The cursor moved to the given position, in physical pixels.
    CursorPos(f64, f64, Modifiers),
    MouseButton(MouseButton, Action, Modifiers),
    /// Scroll offsets along the horizontal and vertical axes.
    Scroll(f64, f64, Modifiers),
    Key(Key, Action, Modifiers),
    /// A touch point identified by `id` changed at the given position.
    Touch(u64, f64, f64, TouchAction, Modifiers),
}

impl WindowEvent {
    /// Tests if this event is related to the keyboard.
    pub fn is_keyboard_event(&self) -> bool {
        matches!(self, WindowEvent::Key(..))
    }

    /// Tests if this event is related to the mouse or to touch input.
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            WindowEvent::CursorPos(..)
                | WindowEvent::MouseButton(..)
                | WindowEvent::Scroll(..)
                | WindowEvent::Touch(..)
        )
    }
}

/// State of a key or of a mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Release,
    Press,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    Start,
    End,
    Move,
    Cancel,
}

/// Mouse buttons, numbered the way windowing systems usually number them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Button1,
    /// Usually the right button.
    Button2,
    /// Usually the middle button.
    Button3,
    /// Any other button.
    Button4,
}

/// The keys the card reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Toggles the spin speed of the tree.
    Space,
    /// Asks Santa for a quip.
    H,
    /// Clears some of the accumulated snow.
    C,
    /// Launches a confetti burst.
    F,
    /// Taps the envelope.
    E,
    /// Shares the greeting.
    S,
    /// Plays or pauses the music.
    M,
    Unknown,
}

bitflags! {
    /// Keyboard modifiers held while an event happened.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u32 {
        const Shift   = 0b0001;
        const Control = 0b0010;
        const Alt     = 0b0100;
        const Super   = 0b1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_categories() {
        let key = WindowEvent::Key(Key::Space, Action::Press, Modifiers::empty());
        let scroll = WindowEvent::Scroll(0.0, 1.0, Modifiers::Shift);

        assert!(key.is_keyboard_event());
        assert!(!key.is_pointer_event());
        assert!(scroll.is_pointer_event());
        assert!(!WindowEvent::Close.is_pointer_event());
    }
}

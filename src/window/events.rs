//! Translation of winit events into crate events.

use crate::event::{Action, Key, Modifiers, MouseButton, TouchAction, WindowEvent};
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent as WinitWindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Pixels scrolled per line of a line-based wheel.
const LINE_HEIGHT: f64 = 10.0;

/// Keeps the input state winit reports separately from the events using it.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventTranslator {
    modifiers: Modifiers,
    cursor: Option<(f64, f64)>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position, in physical pixels.
    #[inline]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Converts `event`, or returns `None` for events nothing here reacts to.
    pub fn translate(&mut self, event: &WinitWindowEvent) -> Option<WindowEvent> {
        let modifiers = self.modifiers;

        match event {
            WinitWindowEvent::Resized(size) => {
                Some(WindowEvent::FramebufferSize(size.width, size.height))
            }
            WinitWindowEvent::CloseRequested => Some(WindowEvent::Close),
            WinitWindowEvent::ModifiersChanged(m) => {
                self.modifiers = translate_modifiers(m.state());
                None
            }
            WinitWindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x, position.y));
                Some(WindowEvent::CursorPos(position.x, position.y, modifiers))
            }
            WinitWindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WinitWindowEvent::MouseInput { state, button, .. } => Some(WindowEvent::MouseButton(
                translate_mouse_button(*button),
                translate_action(*state),
                modifiers,
            )),
            WinitWindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        (*x as f64 * LINE_HEIGHT, *y as f64 * LINE_HEIGHT)
                    }
                    MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
                };
                Some(WindowEvent::Scroll(x, y, modifiers))
            }
            WinitWindowEvent::KeyboardInput { event, .. } => Some(WindowEvent::Key(
                translate_key(event.physical_key),
                translate_action(event.state),
                modifiers,
            )),
            WinitWindowEvent::Touch(touch) => Some(WindowEvent::Touch(
                touch.id,
                touch.location.x,
                touch.location.y,
                translate_touch(touch.phase),
                modifiers,
            )),
            _ => None,
        }
    }
}

fn translate_action(state: ElementState) -> Action {
    match state {
        ElementState::Pressed => Action::Press,
        ElementState::Released => Action::Release,
    }
}

fn translate_modifiers(modifiers: ModifiersState) -> Modifiers {
    let mut res = Modifiers::empty();
    if modifiers.shift_key() {
        res.insert(Modifiers::Shift)
    }
    if modifiers.control_key() {
        res.insert(Modifiers::Control)
    }
    if modifiers.alt_key() {
        res.insert(Modifiers::Alt)
    }
    if modifiers.super_key() {
        res.insert(Modifiers::Super)
    }
    res
}

fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Button1,
        winit::event::MouseButton::Right => MouseButton::Button2,
        winit::event::MouseButton::Middle => MouseButton::Button3,
        _ => MouseButton::Button4,
    }
}

fn translate_touch(phase: TouchPhase) -> TouchAction {
    match phase {
        TouchPhase::Started => TouchAction::Start,
        TouchPhase::Moved => TouchAction::Move,
        TouchPhase::Ended => TouchAction::End,
        TouchPhase::Cancelled => TouchAction::Cancel,
    }
}

fn translate_key(physical_key: PhysicalKey) -> Key {
    match physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::KeyH) => Key::H,
        PhysicalKey::Code(KeyCode::KeyC) => Key::C,
        PhysicalKey::Code(KeyCode::KeyF) => Key::F,
        PhysicalKey::Code(KeyCode::KeyE) => Key::E,
        PhysicalKey::Code(KeyCode::KeyS) => Key::S,
        PhysicalKey::Code(KeyCode::KeyM) => Key::M,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_inputs() {
        assert_eq!(
            translate_mouse_button(winit::event::MouseButton::Right),
            MouseButton::Button2
        );
        assert_eq!(
            translate_mouse_button(winit::event::MouseButton::Back),
            MouseButton::Button4
        );
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Space)), Key::Space);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown);
        assert_eq!(
            translate_modifiers(ModifiersState::SHIFT | ModifiersState::ALT),
            Modifiers::Shift | Modifiers::Alt
        );
        assert_eq!(translate_touch(TouchPhase::Cancelled), TouchAction::Cancel);
    }

    #[test]
    fn test_resize_and_close() {
        let mut translator = EventTranslator::new();
        let resized = WinitWindowEvent::Resized(winit::dpi::PhysicalSize::new(640, 480));

        assert_eq!(
            translator.translate(&resized),
            Some(WindowEvent::FramebufferSize(640, 480))
        );
        assert_eq!(
            translator.translate(&WinitWindowEvent::CloseRequested),
            Some(WindowEvent::Close)
        );
        assert_eq!(translator.cursor(), None);
    }
}

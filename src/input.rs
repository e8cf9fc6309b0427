//! Input handling for the windowed host.
//!
//! [`Input`] turns raw winit window events into the few things the effect
//! cares about: where the pointer is, which touches are down, and whether the
//! user is holding the vacuum trigger (left mouse button or Space).
//!
//! ```ignore
//! if let Some(update) = input.handle_event(&event) {
//!     match update {
//!         PointerUpdate::Moved(pos) => effect.pointer_moved(pos),
//!         PointerUpdate::Touches(points) => effect.touch_moved(&points),
//!     }
//! }
//! effect.set_vacuum(input.vacuum_held());
//! ```

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Back, forward and any extra buttons.
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Keys the host reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Escape,
    Other(WinitKeyCode),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            other => KeyCode::Other(other),
        }
    }
}

/// Pointer change produced by a window event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerUpdate {
    /// Mouse cursor moved.
    Moved(Vec2),
    /// Active touch points, oldest first.
    Touches(Vec<Vec2>),
}

/// Input state tracking for keyboard, mouse and touch.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    mouse_held: HashSet<MouseButton>,
    mouse_position: Vec2,
    /// Active touches in the order they started.
    touches: Vec<(u64, Vec2)>,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Get the mouse position in window pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Whether the vacuum trigger is held.
    pub fn vacuum_held(&self) -> bool {
        self.mouse_held(MouseButton::Left) || self.key_held(KeyCode::Space)
    }

    /// Called at the start of each frame to clear per-frame state.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    fn touch_points(&self) -> Vec<Vec2> {
        self.touches.iter().map(|(_, p)| *p).collect()
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) -> Option<PointerUpdate> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => {
                            // Only fire pressed event if not already held (no repeat)
                            if !self.keys_held.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_held.remove(&key);
                        }
                    }
                }
                None
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(MouseButton::from(*button), *state);
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
                Some(PointerUpdate::Moved(self.mouse_position))
            }

            WindowEvent::Focused(false) => {
                // Releases are lost while unfocused
                self.keys_held.clear();
                self.mouse_held.clear();
                None
            }

            WindowEvent::Touch(touch) => {
                let point = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.touch(touch.id, touch.phase, point)
            }

            _ => None,
        }
    }

    fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Other {
            return;
        }
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    fn touch(&mut self, id: u64, phase: TouchPhase, point: Vec2) -> Option<PointerUpdate> {
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|(t, _)| *t != id);
                self.touches.push((id, point));
                None
            }
            TouchPhase::Moved => {
                match self.touches.iter_mut().find(|(t, _)| *t == id) {
                    Some(entry) => entry.1 = point,
                    None => self.touches.push((id, point)),
                }
                Some(PointerUpdate::Touches(self.touch_points()))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|(t, _)| *t != id);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = Input::new();

        assert!(!input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        // Simulate key press via direct state manipulation (normally done via handle_event)
        input.keys_pressed.insert(KeyCode::Space);
        input.keys_held.insert(KeyCode::Space);

        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));
        assert!(input.vacuum_held());

        // After begin_frame, pressed is cleared but held remains
        input.begin_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_left_mouse_holds_vacuum() {
        let mut input = Input::new();
        input.mouse_held.insert(MouseButton::Right);
        assert!(!input.vacuum_held());
        input.mouse_held.insert(MouseButton::Left);
        assert!(input.vacuum_held());
    }

    #[test]
    fn test_side_buttons_leave_vacuum_alone() {
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);

        let mut input = Input::new();
        input.mouse_button(MouseButton::from(WinitMouseButton::Back), ElementState::Pressed);
        assert!(!input.vacuum_held());

        input.mouse_button(MouseButton::from(WinitMouseButton::Left), ElementState::Pressed);
        input.mouse_button(MouseButton::from(WinitMouseButton::Forward), ElementState::Released);
        assert!(input.vacuum_held());

        input.mouse_button(MouseButton::from(WinitMouseButton::Left), ElementState::Released);
        assert!(!input.vacuum_held());
    }

    #[test]
    fn test_touch_moves_report_oldest_first() {
        let mut input = Input::new();
        assert_eq!(input.touch(1, TouchPhase::Started, Vec2::new(1.0, 1.0)), None);
        input.touch(2, TouchPhase::Started, Vec2::new(5.0, 5.0));

        let update = input.touch(2, TouchPhase::Moved, Vec2::new(6.0, 6.0));
        assert_eq!(
            update,
            Some(PointerUpdate::Touches(vec![Vec2::new(1.0, 1.0), Vec2::new(6.0, 6.0)]))
        );

        input.touch(1, TouchPhase::Ended, Vec2::new(1.0, 1.0));
        let update = input.touch(2, TouchPhase::Moved, Vec2::new(7.0, 7.0));
        assert_eq!(update, Some(PointerUpdate::Touches(vec![Vec2::new(7.0, 7.0)])));
    }
}

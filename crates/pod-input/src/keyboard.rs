//! Keyboard state with explicit previous-frame / current-frame snapshots.
//!
//! Events update the *current* key set as they arrive. Edge queries compare
//! it against the snapshot taken at the end of the previous frame, so a key
//! held across many frames reports [`just_pressed`](KeyboardState::just_pressed)
//! exactly once. Physical key codes are used so WASD works on any layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Shorthand for a non-repeat event on a key code.
    pub fn code(code: KeyCode, state: ElementState) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }
}

/// Held keys this frame and at the end of the previous frame.
///
/// # Usage
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Query with [`is_pressed`](Self::is_pressed) or
///    [`just_pressed`](Self::just_pressed).
/// 3. Call [`end_frame`](Self::end_frame) once the frame's update has run.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    current: HashSet<PhysicalKey>,
    previous: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a `KeyboardState` with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`]. Repeat events carry no new state and are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.current.insert(event.key);
            }
            ElementState::Released => {
                self.current.remove(&event.key);
            }
        }
    }

    /// `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.current.contains(&key)
    }

    /// `true` when the key is held now and was not held at the end of the last frame.
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    /// [`is_pressed`](Self::is_pressed) for a key code.
    #[must_use]
    pub fn is_code_pressed(&self, code: KeyCode) -> bool {
        self.is_pressed(PhysicalKey::Code(code))
    }

    /// [`just_pressed`](Self::just_pressed) for a key code.
    #[must_use]
    pub fn is_code_just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed(PhysicalKey::Code(code))
    }

    /// Snapshot the current key set as the previous frame's state.
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for code in [KeyCode::KeyW, KeyCode::KeyL, KeyCode::KeyE, KeyCode::Escape] {
            assert!(!kb.is_code_pressed(code));
            assert!(!kb.is_code_just_pressed(code));
        }
    }

    #[test]
    fn test_press_sets_pressed_and_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyL, ElementState::Pressed, false));
        assert!(kb.is_code_pressed(KeyCode::KeyL));
        assert!(kb.is_code_just_pressed(KeyCode::KeyL));
    }

    #[test]
    fn test_held_key_edges_only_once() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Pressed, false));
        assert!(kb.is_code_just_pressed(KeyCode::KeyE));
        kb.end_frame();

        for _ in 0..10 {
            assert!(kb.is_code_pressed(KeyCode::KeyE));
            assert!(!kb.is_code_just_pressed(KeyCode::KeyE));
            kb.end_frame();
        }
    }

    #[test]
    fn test_os_repeat_does_not_retrigger() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Pressed, false));
        kb.end_frame();
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Pressed, true));
        assert!(!kb.is_code_just_pressed(KeyCode::KeyE));
    }

    #[test]
    fn test_release_then_press_edges_again() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyL, ElementState::Pressed, false));
        kb.end_frame();
        kb.process_raw(raw(KeyCode::KeyL, ElementState::Released, false));
        assert!(!kb.is_code_pressed(KeyCode::KeyL));
        kb.end_frame();
        kb.process_raw(raw(KeyCode::KeyL, ElementState::Pressed, false));
        assert!(kb.is_code_just_pressed(KeyCode::KeyL));
    }

    #[test]
    fn test_multiple_keys_tracked_independently() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false));
        kb.end_frame();
        kb.process_raw(raw(KeyCode::KeyD, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Released, false));

        assert!(!kb.is_code_pressed(KeyCode::KeyW));
        assert!(kb.is_code_pressed(KeyCode::KeyD));
        assert!(kb.is_code_just_pressed(KeyCode::KeyD));
    }

    #[test]
    fn test_release_all_clears_held_keys() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::code(KeyCode::ShiftLeft, ElementState::Pressed));
        kb.process_raw(RawKeyEvent::code(KeyCode::Space, ElementState::Pressed));
        kb.release_all();
        assert!(!kb.is_code_pressed(KeyCode::ShiftLeft));
        assert!(!kb.is_code_pressed(KeyCode::Space));
    }
}

//! Keyboard-driven free movement.

use pod_input::KeyboardState;
use winit::keyboard::KeyCode;

use crate::camera::Camera;

/// A movement direction relative to the camera basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    /// Every direction with the key that drives it.
    pub const BINDINGS: [(Movement, KeyCode); 6] = [
        (Movement::Forward, KeyCode::KeyW),
        (Movement::Backward, KeyCode::KeyS),
        (Movement::Left, KeyCode::KeyA),
        (Movement::Right, KeyCode::KeyD),
        (Movement::Up, KeyCode::Space),
        (Movement::Down, KeyCode::ShiftLeft),
    ];
}

/// Directions whose keys are currently held.
pub fn held_movements(keyboard: &KeyboardState) -> impl Iterator<Item = Movement> + '_ {
    Movement::BINDINGS
        .into_iter()
        .filter(|(_, key)| keyboard.is_code_pressed(*key))
        .map(|(movement, _)| movement)
}

/// Move the camera along every held direction for `delta_time` seconds.
pub fn apply_keyboard_movement(camera: &mut Camera, keyboard: &KeyboardState, delta_time: f32) {
    for movement in held_movements(keyboard) {
        camera.move_by(movement, delta_time);
    }
}

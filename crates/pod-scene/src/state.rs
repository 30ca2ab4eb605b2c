//! The single owned state of the viewer and its per-frame update.

use glam::Vec3;
use pod_config::Config;
use pod_input::KeyboardState;
use pod_player::{Camera, apply_keyboard_movement};
use tracing::info;
use winit::keyboard::KeyCode;

use crate::clock::AnimationClocks;
use crate::interaction::{InteractionState, ZoomSettings};

pub const EXIT_KEY: KeyCode = KeyCode::Escape;

/// Fixed point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(-8.0, 5.0, -5.0),
            color: Vec3::new(1.0, 0.95, 0.8),
        }
    }
}

/// Camera, toggles, clocks and light, mutated only by [`AppState::update`].
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub camera: Camera,
    pub interaction: InteractionState,
    pub clocks: AnimationClocks,
    pub light: Light,
    exit_requested: bool,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let zoom = ZoomSettings::from(&config.camera);
        let camera = Camera::new(Vec3::from_array(config.camera.start_position))
            .with_move_speed(config.camera.move_speed)
            .with_sensitivity(config.input.mouse_sensitivity)
            .with_zoom(zoom.normal);
        Self {
            camera,
            interaction: InteractionState::new(zoom),
            clocks: AnimationClocks::new(
                config.scene.planet_spin_deg_per_sec,
                config.scene.moon_orbit_deg_per_sec,
            ),
            light: Light {
                position: Vec3::from_array(config.scene.light_position),
                color: Vec3::from_array(config.scene.light_color),
            },
            exit_requested: false,
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Flag the loop to stop after the current iteration.
    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            info!("Exit requested");
        }
        self.exit_requested = true;
    }

    /// Advance one frame.
    ///
    /// Order: exit key, toggles, zoom interpolation, keyboard movement,
    /// mouse look, animation clocks. `look_offsets` is `(dx, dy)` with
    /// `dy` already positive for looking up.
    pub fn update(&mut self, delta_time: f32, keyboard: &KeyboardState, look_offsets: (f32, f32)) {
        if keyboard.is_code_pressed(EXIT_KEY) {
            self.request_exit();
        }

        self.interaction.apply_input(keyboard);
        self.interaction.update_zoom(delta_time);
        self.camera.zoom = self.interaction.current_zoom();

        apply_keyboard_movement(&mut self.camera, keyboard, delta_time);

        let (dx, dy) = look_offsets;
        if dx != 0.0 || dy != 0.0 {
            self.camera.update_orientation(dx, dy);
        }

        self.clocks.advance(delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_input::RawKeyEvent;
    use winit::event::ElementState;

    fn press(keyboard: &mut KeyboardState, code: KeyCode) {
        keyboard.process_raw(RawKeyEvent::code(code, ElementState::Pressed));
    }

    #[test]
    fn test_default_matches_config_defaults() {
        let from_config = AppState::from_config(&Config::default());
        let default = AppState::default();
        assert_eq!(from_config.camera, default.camera);
        assert_eq!(from_config.interaction, default.interaction);
        assert_eq!(from_config.clocks, default.clocks);
        assert_eq!(from_config.light, default.light);
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut state = AppState::default();
        let mut keyboard = KeyboardState::new();
        state.update(0.016, &keyboard, (0.0, 0.0));
        assert!(!state.exit_requested());
        press(&mut keyboard, EXIT_KEY);
        state.update(0.016, &keyboard, (0.0, 0.0));
        assert!(state.exit_requested());
    }

    #[test]
    fn test_update_drives_camera_zoom() {
        let mut state = AppState::default();
        let mut keyboard = KeyboardState::new();
        press(&mut keyboard, KeyCode::KeyE);
        state.update(0.1, &keyboard, (0.0, 0.0));
        assert!(state.interaction.telescope_active());
        assert_eq!(state.camera.zoom, state.interaction.current_zoom());
        assert!(state.camera.zoom < 45.0);
    }

    #[test]
    fn test_look_offsets_turn_camera() {
        let mut state = AppState::default();
        let keyboard = KeyboardState::new();
        state.update(0.016, &keyboard, (50.0, 10.0));
        assert!((state.camera.yaw() - (-85.0)).abs() < 1e-4);
        assert!((state.camera.pitch() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_clocks_advance_with_dt() {
        let mut state = AppState::default();
        let keyboard = KeyboardState::new();
        state.update(0.5, &keyboard, (0.0, 0.0));
        assert_eq!(state.clocks.planet_rotation, 5.0);
        assert_eq!(state.clocks.moon_orbit, 15.0);
    }

    #[test]
    fn test_movement_uses_frame_dt() {
        let mut state = AppState::default();
        let mut keyboard = KeyboardState::new();
        press(&mut keyboard, KeyCode::KeyW);
        state.update(0.2, &keyboard, (0.0, 0.0));
        assert!(state.camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
    }
}

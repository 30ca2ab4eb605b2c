//! Light and telescope toggles plus the telescope zoom interpolation.
//!
//! Both toggles fire on the rising edge of their key, so holding a key
//! flips the state once no matter how many frames it stays down.

use pod_config::CameraConfig;
use pod_input::KeyboardState;
use tracing::info;
use winit::keyboard::KeyCode;

pub const LIGHT_TOGGLE_KEY: KeyCode = KeyCode::KeyL;
pub const TELESCOPE_TOGGLE_KEY: KeyCode = KeyCode::KeyE;

/// Field of view targets and the rate the current zoom chases them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSettings {
    pub normal: f32,
    pub telescope: f32,
    pub rate: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            normal: 45.0,
            telescope: 20.0,
            rate: 5.0,
        }
    }
}

impl From<&CameraConfig> for ZoomSettings {
    fn from(config: &CameraConfig) -> Self {
        Self {
            normal: config.normal_zoom,
            telescope: config.telescope_zoom,
            rate: config.zoom_rate,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
    light_enabled: bool,
    telescope_active: bool,
    current_zoom: f32,
    zoom: ZoomSettings,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

impl InteractionState {
    /// Light on, telescope inactive, zoom resting at the normal field of view.
    pub fn new(zoom: ZoomSettings) -> Self {
        Self {
            light_enabled: true,
            telescope_active: false,
            current_zoom: zoom.normal,
            zoom,
        }
    }

    pub fn light_enabled(&self) -> bool {
        self.light_enabled
    }

    pub fn telescope_active(&self) -> bool {
        self.telescope_active
    }

    /// Interpolated field of view in degrees.
    pub fn current_zoom(&self) -> f32 {
        self.current_zoom
    }

    pub fn toggle_light(&mut self) {
        self.light_enabled = !self.light_enabled;
        info!(
            "Interior light: {}",
            if self.light_enabled { "ON" } else { "OFF" }
        );
    }

    pub fn toggle_telescope(&mut self) {
        self.telescope_active = !self.telescope_active;
        if self.telescope_active {
            info!("Telescope: ACTIVE - Zoomed View");
        } else {
            info!("Telescope: INACTIVE - Normal View");
        }
    }

    pub fn target_zoom(&self) -> f32 {
        if self.telescope_active {
            self.zoom.telescope
        } else {
            self.zoom.normal
        }
    }

    /// Move the current zoom toward the target by `rate * delta_time` of the gap.
    ///
    /// The factor is clamped to `[0, 1]`: a long stall lands exactly on the
    /// target instead of overshooting past it.
    pub fn update_zoom(&mut self, delta_time: f32) {
        let t = (self.zoom.rate * delta_time).clamp(0.0, 1.0);
        let target = self.target_zoom();
        self.current_zoom += (target - self.current_zoom) * t;
    }

    /// Apply this frame's rising-edge toggles.
    pub fn apply_input(&mut self, keyboard: &KeyboardState) {
        if keyboard.is_code_just_pressed(LIGHT_TOGGLE_KEY) {
            self.toggle_light();
        }
        if keyboard.is_code_just_pressed(TELESCOPE_TOGGLE_KEY) {
            self.toggle_telescope();
        }
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

    fn release(keyboard: &mut KeyboardState, code: KeyCode) {
        keyboard.process_raw(RawKeyEvent::code(code, ElementState::Released));
    }

    #[test]
    fn test_initial_state() {
        let state = InteractionState::default();
        assert!(state.light_enabled());
        assert!(!state.telescope_active());
        assert_eq!(state.current_zoom(), 45.0);
        assert_eq!(state.target_zoom(), 45.0);
    }

    #[test]
    fn test_press_release_press_flips_twice() {
        let mut state = InteractionState::default();
        let mut keyboard = KeyboardState::new();

        press(&mut keyboard, LIGHT_TOGGLE_KEY);
        state.apply_input(&keyboard);
        keyboard.end_frame();
        assert!(!state.light_enabled());

        release(&mut keyboard, LIGHT_TOGGLE_KEY);
        state.apply_input(&keyboard);
        keyboard.end_frame();
        assert!(!state.light_enabled());

        press(&mut keyboard, LIGHT_TOGGLE_KEY);
        state.apply_input(&keyboard);
        keyboard.end_frame();
        assert!(state.light_enabled());
    }

    #[test]
    fn test_held_key_does_not_retrigger() {
        let mut state = InteractionState::default();
        let mut keyboard = KeyboardState::new();
        press(&mut keyboard, TELESCOPE_TOGGLE_KEY);
        for _ in 0..30 {
            state.apply_input(&keyboard);
            keyboard.end_frame();
        }
        assert!(state.telescope_active());
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut state = InteractionState::default();
        state.toggle_telescope();
        assert!(state.light_enabled());
        assert_eq!(state.target_zoom(), 20.0);
        state.toggle_light();
        assert!(state.telescope_active());
    }

    #[test]
    fn test_zoom_converges_toward_telescope_target() {
        let mut state = InteractionState::default();
        state.toggle_telescope();
        for _ in 0..600 {
            state.update_zoom(1.0 / 60.0);
        }
        assert!((state.current_zoom() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_dt_leaves_zoom_unchanged() {
        let mut state = InteractionState::default();
        state.toggle_telescope();
        state.update_zoom(0.0);
        assert_eq!(state.current_zoom(), 45.0);
    }

    #[test]
    fn test_large_dt_snaps_without_overshoot() {
        let mut state = InteractionState::default();
        state.toggle_telescope();
        state.update_zoom(10.0);
        assert_eq!(state.current_zoom(), 20.0);
    }

    #[test]
    fn test_zoom_moves_monotonically() {
        let mut state = InteractionState::default();
        state.toggle_telescope();
        let mut last = state.current_zoom();
        for _ in 0..20 {
            state.update_zoom(0.016);
            assert!(state.current_zoom() < last);
            assert!(state.current_zoom() > 20.0);
            last = state.current_zoom();
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = CameraConfig {
            normal_zoom: 60.0,
            telescope_zoom: 10.0,
            zoom_rate: 2.0,
            ..CameraConfig::default()
        };
        let state = InteractionState::new(ZoomSettings::from(&config));
        assert_eq!(state.current_zoom(), 60.0);
    }
}

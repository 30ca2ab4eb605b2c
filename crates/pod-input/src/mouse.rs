//! Mouse-look delta accumulation.
//!
//! While the cursor is captured, raw `DeviceEvent::MouseMotion` deltas are
//! used. Otherwise deltas come from successive `CursorMoved` positions. The
//! first position after startup (or after the cursor re-enters the window)
//! only seeds the reference point and produces no delta.

use glam::Vec2;
use tracing::warn;

/// Per-frame mouse look state.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    last_position: Option<Vec2>,
    delta: Vec2,
    captured: bool,
}

impl MouseState {
    /// Creates a `MouseState` with no reference position and zero delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if let Some(last) = self.last_position
            && !self.captured
        {
            self.delta += position - last;
        }
        self.last_position = Some(position);
    }

    /// Process a `DeviceEvent::MouseMotion` raw delta. Ignored unless captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `CursorLeft` event; the next move re-seeds the reference point.
    pub fn on_cursor_left(&mut self) {
        self.last_position = None;
    }

    /// Grab and hide the cursor (or release it). Tries `Locked`, then `Confined`.
    pub fn set_captured(&mut self, window: &winit::window::Window, captured: bool) {
        use winit::window::CursorGrabMode;
        self.captured = captured;
        if captured {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
            {
                warn!("Cursor grab unavailable, falling back to free cursor: {e}");
                self.captured = false;
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_captured_flag(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Look offsets for the camera: `(dx, -dy)`, so moving the mouse up looks up.
    /// `invert_y` flips the vertical axis back.
    #[must_use]
    pub fn look_offsets(&self, invert_y: bool) -> (f32, f32) {
        let dy = if invert_y { self.delta.y } else { -self.delta.y };
        (self.delta.x, dy)
    }

    /// Whether raw motion is being used for FPS-style look.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Clear the accumulated delta. Call once the frame's update has run.
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_only_seeds_position() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(640.0, 360.0);
        assert_eq!(ms.delta, Vec2::ZERO);
    }

    #[test]
    fn test_delta_is_difference_between_moves() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        ms.end_frame();
        ms.on_cursor_moved(110.0, 195.0);
        assert!((ms.delta.x - 10.0).abs() < f32::EPSILON);
        assert!((ms.delta.y + 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_moves_accumulate_within_frame() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(0.0, 0.0);
        ms.on_cursor_moved(3.0, 1.0);
        ms.on_cursor_moved(5.0, 4.0);
        assert_eq!(ms.delta, Vec2::new(5.0, 4.0));
    }

    #[test]
    fn test_look_offsets_negate_vertical() {
        let mut ms = MouseState::new();
        ms.set_captured_flag(true);
        ms.on_raw_motion(4.0, 10.0);
        assert_eq!(ms.look_offsets(false), (4.0, -10.0));
        assert_eq!(ms.look_offsets(true), (4.0, 10.0));
    }

    #[test]
    fn test_raw_motion_ignored_when_not_captured() {
        let mut ms = MouseState::new();
        ms.on_raw_motion(50.0, 50.0);
        assert_eq!(ms.delta, Vec2::ZERO);
    }

    #[test]
    fn test_cursor_moves_ignored_when_captured() {
        let mut ms = MouseState::new();
        ms.set_captured_flag(true);
        ms.on_cursor_moved(0.0, 0.0);
        ms.on_cursor_moved(40.0, 40.0);
        assert_eq!(ms.delta, Vec2::ZERO);
        assert!(ms.is_captured());
    }

    #[test]
    fn test_reentry_does_not_jump() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(10.0, 10.0);
        ms.on_cursor_left();
        ms.on_cursor_moved(900.0, 500.0);
        assert_eq!(ms.delta, Vec2::ZERO);
    }

    #[test]
    fn test_delta_resets_each_frame() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(50.0, 50.0);
        ms.on_cursor_moved(60.0, 50.0);
        ms.end_frame();
        assert_eq!(ms.delta, Vec2::ZERO);
    }
}

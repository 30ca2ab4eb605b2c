//! Yaw/pitch camera with a basis recomputed from its angles.
//!
//! Angles are stored in degrees. Yaw `-90` looks down `-Z`. The basis is
//! always derived from the angles and the fixed world-up vector, never
//! updated incrementally, so it cannot drift from orthonormal.

use glam::{Mat4, Vec3};

use crate::movement::Movement;

/// Pitch is clamped to `±PITCH_LIMIT` degrees so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;
/// Near clip plane in scene units.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane in scene units.
pub const FAR_PLANE: f32 = 100.0;
/// Narrowest field of view reachable by scrolling, degrees.
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view reachable by scrolling, degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// First-person camera state.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    /// Scene units per second.
    pub move_speed: f32,
    /// Degrees per unit of look offset.
    pub sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

impl Camera {
    /// Camera at `position` looking down `-Z` with `+Y` as world up.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            move_speed: 5.0,
            sensitivity: 0.1,
            zoom: MAX_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Set the movement speed.
    #[must_use]
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Set the look sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set the starting field of view.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, within `±PITCH_LIMIT`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera-up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Add scaled look offsets to yaw and pitch, clamp pitch, and rebuild the basis.
    pub fn update_orientation(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw * self.sensitivity;
        self.pitch = (self.pitch + delta_pitch * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Translate by `move_speed * delta_time` along the basis vector for `direction`.
    ///
    /// Calls for several directions in one frame add up independently, so
    /// diagonal movement is faster than movement along a single axis.
    pub fn move_by(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.move_speed * delta_time;
        let axis = match direction {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right,
            Movement::Right => self.right,
            Movement::Up => self.up,
            Movement::Down => -self.up,
        };
        self.position += axis * velocity;
    }

    /// Narrow (positive offset) or widen the field of view, clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn process_scroll(&mut self, offset: f32) {
        self.zoom = (self.zoom - offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Right-handed look-at toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

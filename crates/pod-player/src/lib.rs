//! First-person camera for the observation pod: Euler-angle look, free movement,
//! and view/projection matrices.

pub mod camera;
pub mod movement;

pub use camera::{Camera, FAR_PLANE, MAX_ZOOM, MIN_ZOOM, NEAR_PLANE, PITCH_LIMIT};
pub use movement::{Movement, apply_keyboard_movement, held_movements};

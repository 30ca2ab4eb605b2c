//! Application shell for the observation pod viewer.
//!
//! Provides the winit event loop, the frame clock and platform directories.

pub mod frame_clock;
pub mod platform;
pub mod window;

pub use frame_clock::{FrameClock, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppError, ViewerApp, run, window_attributes_from_config};

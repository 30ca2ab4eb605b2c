//! Scene content and per-frame logic for the observation pod.
//!
//! Everything here is GPU-independent: meshes are generated as plain vertex
//! and index data, and a frame is described as a [`FramePlan`] that a
//! [`DrawTarget`] consumes.

pub mod clock;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod material;
pub mod render;
pub mod state;

pub use clock::AnimationClocks;
pub use geometry::{MeshData, Vertex};
pub use interaction::{InteractionState, ZoomSettings};
pub use layout::MeshId;
pub use material::{Material, TextureId};
pub use render::{DrawTarget, FrameGlobals, FramePlan, SceneObject, plan_frame, render_frame};
pub use state::{AppState, Light};

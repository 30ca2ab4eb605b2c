//! wgpu rendering for the observation pod: device and surface, depth buffer,
//! mesh and texture upload, the scene pipeline, and the GPU draw target.

pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod procedural;
pub mod renderer;
pub mod scene_pipeline;
pub mod shader;
pub mod texture;

#[cfg(test)]
mod test_device;

pub use buffer::{MeshBuffer, MeshLibrary, vertex_layout};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use renderer::{RendererOptions, SceneRenderer};
pub use scene_pipeline::{DrawUniform, FrameUniform, SCENE_SHADER_SOURCE, ScenePipeline};
pub use shader::{ShaderError, compile_shader};
pub use texture::{ManagedTexture, TextureError, TextureManager};

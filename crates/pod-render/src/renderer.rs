//! GPU implementation of the scene [`DrawTarget`].
//!
//! Draws are recorded into per-slot uniform buffers as they arrive, then
//! replayed into one render pass in the same order. A draw whose pipeline,
//! mesh or texture is unavailable is skipped and logged at `debug`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use pod_scene::{DrawTarget, FrameGlobals, FramePlan, MeshId, SceneObject, TextureId, render_frame};

use crate::buffer::MeshLibrary;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};
use crate::pass::{FrameEncoder, RenderPassBuilder};
use crate::scene_pipeline::{DrawUniform, FrameUniform, SCENE_SHADER_SOURCE, ScenePipeline};
use crate::shader::compile_shader;
use crate::texture::{ManagedTexture, TextureError, TextureManager};

/// Where scene textures come from.
#[derive(Clone, Debug)]
pub struct RendererOptions {
    pub asset_dir: PathBuf,
    pub procedural_fallback: bool,
}

struct DrawSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct PreparedDraw {
    slot: usize,
    mesh: MeshId,
    texture: Arc<ManagedTexture>,
}

/// Pipeline plus the uniform buffers bound alongside it.
struct PipelineResources {
    scene: ScenePipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    slots: Vec<DrawSlot>,
}

impl PipelineResources {
    fn new(device: &wgpu::Device, scene: ScenePipeline) -> Self {
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene-frame-uniform"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene-frame-bind-group"),
            layout: &scene.frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        Self {
            scene,
            frame_buffer,
            frame_bind_group,
            slots: Vec::new(),
        }
    }

    /// Uniform slot `index`, allocating slots up to it on first use.
    fn slot(&mut self, device: &wgpu::Device, index: usize) -> &DrawSlot {
        while self.slots.len() <= index {
            let label = format!("scene-draw-uniform-{}", self.slots.len());
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&label),
                size: std::mem::size_of::<DrawUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&label),
                layout: &self.scene.draw_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.slots.push(DrawSlot { buffer, bind_group });
        }
        &self.slots[index]
    }
}

pub struct SceneRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: Option<PipelineResources>,
    meshes: MeshLibrary,
    textures: HashMap<TextureId, Arc<ManagedTexture>>,
    white: Arc<ManagedTexture>,
    depth: DepthBuffer,
    prepared: Vec<PreparedDraw>,
}

impl SceneRenderer {
    /// Compile the scene shader, upload meshes and load textures.
    ///
    /// A shader that fails to compile leaves the renderer without a pipeline:
    /// frames still clear and present, but every draw is skipped.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: (u32, u32),
        options: &RendererOptions,
    ) -> Result<Self, TextureError> {
        Self::with_shader(device, queue, surface_format, size, options, SCENE_SHADER_SOURCE)
    }

    fn with_shader(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: (u32, u32),
        options: &RendererOptions,
        shader_source: &str,
    ) -> Result<Self, TextureError> {
        let mut texture_manager = TextureManager::new(device);
        let white = texture_manager.white(device, queue)?;

        let textures = TextureId::ALL
            .into_iter()
            .filter_map(|id| {
                texture_manager
                    .load_scene_texture(
                        device,
                        queue,
                        &options.asset_dir,
                        id,
                        options.procedural_fallback,
                    )
                    .map(|texture| (id, texture))
            })
            .collect();

        let pipeline = compile_shader(device, "scene", shader_source)
            .ok()
            .map(|shader| {
                let scene = ScenePipeline::new(
                    device,
                    &shader,
                    surface_format,
                    texture_manager.bind_group_layout(),
                );
                PipelineResources::new(device, scene)
            });
        if pipeline.is_none() {
            log::error!("Scene pipeline unavailable; frames will only be cleared");
        }

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            meshes: MeshLibrary::upload_all(device),
            textures,
            white,
            depth: DepthBuffer::new(device, size.0, size.1),
            prepared: Vec::new(),
        })
    }

    pub fn from_context(
        ctx: &RenderContext,
        options: &RendererOptions,
    ) -> Result<Self, TextureError> {
        Self::new(
            &ctx.device,
            &ctx.queue,
            ctx.surface_format,
            ctx.size(),
            options,
        )
    }

    /// Match the depth buffer to a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.depth.resize(&self.device, width, height);
    }

    /// Draws accepted since the last `begin_frame`.
    pub fn prepared_draw_count(&self) -> usize {
        self.prepared.len()
    }

    pub fn has_pipeline(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Acquire the next surface texture, record `plan` and present it.
    pub fn render(&mut self, ctx: &RenderContext, plan: &FramePlan) -> Result<(), SurfaceError> {
        let surface_texture = ctx.get_current_texture()?;
        render_frame(plan, self);

        let builder = RenderPassBuilder::new()
            .depth(&self.depth)
            .label("scene-pass");
        let mut frame = FrameEncoder::new(&ctx.device, &ctx.queue, surface_texture);
        if let Some(mut pass) = frame.begin_render_pass(&builder) {
            self.encode(&mut pass);
        }
        frame.submit();
        Ok(())
    }

    fn encode<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        let Some(resources) = &self.pipeline else {
            return;
        };
        pass.set_pipeline(&resources.scene.pipeline);
        pass.set_bind_group(0, &resources.frame_bind_group, &[]);
        for draw in &self.prepared {
            let Some(mesh) = self.meshes.get(draw.mesh) else {
                continue;
            };
            pass.set_bind_group(1, &resources.slots[draw.slot].bind_group, &[]);
            pass.set_bind_group(2, &draw.texture.bind_group, &[]);
            mesh.bind(pass);
            mesh.draw(pass);
        }
    }

    fn texture_for(&self, object: &SceneObject) -> Option<Arc<ManagedTexture>> {
        match object.material.texture {
            Some(id) => self.textures.get(&id).cloned(),
            None => Some(Arc::clone(&self.white)),
        }
    }
}

impl DrawTarget for SceneRenderer {
    fn begin_frame(&mut self, globals: &FrameGlobals) {
        self.prepared.clear();
        if let Some(resources) = &self.pipeline {
            self.queue.write_buffer(
                &resources.frame_buffer,
                0,
                bytemuck::bytes_of(&FrameUniform::from(globals)),
            );
        }
    }

    fn draw(&mut self, object: &SceneObject) {
        if self.pipeline.is_none() {
            log::debug!("Skipping '{}': no pipeline", object.label);
            return;
        }
        if self.meshes.get(object.mesh).is_none() {
            log::debug!("Skipping '{}': mesh {:?} not loaded", object.label, object.mesh);
            return;
        }
        let Some(texture) = self.texture_for(object) else {
            log::debug!(
                "Skipping '{}': texture {:?} not loaded",
                object.label,
                object.material.texture
            );
            return;
        };

        let index = self.prepared.len();
        let Some(resources) = self.pipeline.as_mut() else {
            return;
        };
        let slot = resources.slot(&self.device, index);
        self.queue.write_buffer(
            &slot.buffer,
            0,
            bytemuck::bytes_of(&DrawUniform::from(object)),
        );
        self.prepared.push(PreparedDraw {
            slot: index,
            mesh: object.mesh,
            texture,
        });
    }
}

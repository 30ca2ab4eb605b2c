//! Render pass configuration and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes the clear colour and depth attachment;
//! [`FrameEncoder`] owns one frame's encoder and surface texture and submits
//! and presents them exactly once.

use crate::depth::DepthBuffer;

/// Black space behind the starfield.
pub const SPACE_BLACK: wgpu::Color = wgpu::Color::BLACK;

#[derive(Debug)]
pub struct DepthAttachmentConfig {
    pub view: wgpu::TextureView,
    pub clear_value: f32,
}

/// Fluent builder for the frame's single render pass.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_attachment: Option<DepthAttachmentConfig>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// Builder that clears to [`SPACE_BLACK`] with no depth attachment.
    pub fn new() -> Self {
        Self {
            clear_color: SPACE_BLACK,
            depth_attachment: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach `depth`, cleared to the far plane.
    pub fn depth(mut self, depth: &DepthBuffer) -> Self {
        self.depth_attachment = Some(DepthAttachmentConfig {
            view: depth.view.clone(),
            clear_value: DepthBuffer::CLEAR_VALUE,
        });
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_attachment
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's command encoder and surface texture.
///
/// Dropping an unsubmitted encoder still submits and presents, with a warning.
pub struct FrameEncoder {
    encoder: Option<wgpu::CommandEncoder>,
    queue: wgpu::Queue,
    surface_texture: Option<wgpu::SurfaceTexture>,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            queue: queue.clone(),
            surface_texture: Some(surface_texture),
            surface_view,
        }
    }

    /// Begin a pass on the surface texture. `None` once the frame was submitted.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> Option<wgpu::RenderPass<'a>> {
        let encoder = self.encoder.as_mut()?;
        Some(builder.create_render_pass(encoder, &self.surface_view))
    }

    /// Submit the recorded commands and present the surface texture.
    pub fn submit(mut self) {
        self.finish();
    }

    fn finish(&mut self) -> bool {
        let (Some(encoder), Some(surface_texture)) =
            (self.encoder.take(), self.surface_texture.take())
        else {
            return false;
        };
        self.queue.submit([encoder.finish()]);
        surface_texture.present();
        true
    }
}

impl Drop for FrameEncoder {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            log::warn!("FrameEncoder dropped without explicit submit() - auto-submitting");
            self.finish();
        }
    }
}

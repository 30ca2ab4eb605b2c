//! The single lit, optionally textured pipeline every scene object is drawn with.
//!
//! Bind groups: frame uniforms at group 0, per-draw uniforms at group 1,
//! texture and sampler at group 2.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use pod_scene::{FrameGlobals, SceneObject};
use std::num::NonZeroU64;

use crate::buffer::vertex_layout;
use crate::depth::DepthBuffer;

/// Camera, projection and light state shared by every draw in a frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub light_enabled: u32,
    pub _pad: [u32; 3],
}

impl From<&FrameGlobals> for FrameUniform {
    fn from(globals: &FrameGlobals) -> Self {
        Self {
            view: globals.view.to_cols_array_2d(),
            projection: globals.projection.to_cols_array_2d(),
            view_pos: globals.view_pos.extend(1.0).to_array(),
            light_pos: globals.light_pos.extend(1.0).to_array(),
            light_color: globals.light_color.extend(1.0).to_array(),
            light_enabled: u32::from(globals.light_enabled),
            _pad: [0; 3],
        }
    }
}

/// Model transform and material of one draw.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for non-uniformly scaled normals.
    pub normal_matrix: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub use_texture: u32,
    pub _pad: [u32; 3],
}

impl DrawUniform {
    pub fn new(model: &Mat4, color: Vec3, use_texture: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            object_color: color.extend(1.0).to_array(),
            use_texture: u32::from(use_texture),
            _pad: [0; 3],
        }
    }
}

impl From<&SceneObject> for DrawUniform {
    fn from(object: &SceneObject) -> Self {
        Self::new(
            &object.model,
            object.material.color,
            object.material.uses_texture(),
        )
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    size: usize,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size as u64),
            },
            count: None,
        }],
    })
}

pub struct ScenePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub draw_bind_group_layout: wgpu::BindGroupLayout,
}

impl ScenePipeline {
    /// `texture_bind_group_layout` is the texture manager's layout, used for group 2.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let frame_bind_group_layout = uniform_layout(
            device,
            "scene-frame-bgl",
            std::mem::size_of::<FrameUniform>(),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let draw_bind_group_layout = uniform_layout(
            device,
            "scene-draw-bgl",
            std::mem::size_of::<DrawUniform>(),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene-pipeline-layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &draw_bind_group_layout,
                texture_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The starfield sphere is seen from inside.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_bind_group_layout,
            draw_bind_group_layout,
        }
    }
}

/// Phong shading with a single point light. With the light off only the
/// ambient term remains.
pub const SCENE_SHADER_SOURCE: &str = r#"
struct FrameUniform {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_pos: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    light_enabled: u32,
};

struct DrawUniform {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    object_color: vec4<f32>,
    use_texture: u32,
};

@group(0) @binding(0)
var<uniform> globals: FrameUniform;

@group(1) @binding(0)
var<uniform> per_draw: DrawUniform;

@group(2) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(2) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = per_draw.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = globals.projection * globals.view * world;
    out.world_pos = world.xyz;
    out.normal = (per_draw.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    return out;
}

const AMBIENT_STRENGTH: f32 = 0.1;
const SPECULAR_STRENGTH: f32 = 0.5;
const SHININESS: f32 = 32.0;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(t_diffuse, s_diffuse, in.uv).rgb;
    var base = per_draw.object_color.rgb;
    if (per_draw.use_texture != 0u) {
        base = base * texel;
    }

    let light_color = globals.light_color.rgb;
    var lighting = AMBIENT_STRENGTH * light_color;
    if (globals.light_enabled != 0u) {
        let n = normalize(in.normal);
        let to_light = normalize(globals.light_pos.xyz - in.world_pos);
        let diffuse = max(dot(n, to_light), 0.0) * light_color;

        let to_eye = normalize(globals.view_pos.xyz - in.world_pos);
        let reflected = reflect(-to_light, n);
        let spec = pow(max(dot(to_eye, reflected), 0.0), SHININESS);
        lighting = lighting + diffuse + SPECULAR_STRENGTH * spec * light_color;
    }

    return vec4<f32>(lighting * base, 1.0);
}
"#;

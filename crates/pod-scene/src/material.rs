//! Per-draw material description: a tint and an optional texture.

use glam::Vec3;

/// The named image assets the scene samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    Planet,
    Moon,
    Metal,
    Stars,
}

impl TextureId {
    pub const ALL: [TextureId; 4] = [
        TextureId::Planet,
        TextureId::Moon,
        TextureId::Metal,
        TextureId::Stars,
    ];

    /// Image file name inside the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TextureId::Planet => "planet_texture.png",
            TextureId::Moon => "moon_texture.png",
            TextureId::Metal => "metal_texture.png",
            TextureId::Stars => "stars_texture.png",
        }
    }

    /// Short name used for GPU labels and logs.
    pub fn label(self) -> &'static str {
        match self {
            TextureId::Planet => "planet",
            TextureId::Moon => "moon",
            TextureId::Metal => "metal",
            TextureId::Stars => "stars",
        }
    }
}

/// Tint plus optional texture. `texture: None` renders the tint as a solid colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub texture: Option<TextureId>,
}

impl Material {
    /// Texture modulated by `color`.
    pub const fn textured(color: Vec3, texture: TextureId) -> Self {
        Self {
            color,
            texture: Some(texture),
        }
    }

    /// Flat `color`, no texture sampling.
    pub const fn solid(color: Vec3) -> Self {
        Self {
            color,
            texture: None,
        }
    }

    /// Value of the `use_texture` uniform.
    pub fn uses_texture(&self) -> bool {
        self.texture.is_some()
    }
}

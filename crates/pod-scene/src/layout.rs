//! Fixed placement of every object in the pod scene.
//!
//! Transforms are written in column-vector order (`T * R * S`): the
//! rightmost factor applies to the mesh first.

use glam::{Mat4, Vec3};

use crate::geometry::{self, MeshData};
use crate::material::{Material, TextureId};

/// Shared meshes generated once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshId {
    Starfield,
    Planet,
    Moon,
    Interior,
    Telescope,
}

impl MeshId {
    pub const ALL: [MeshId; 5] = [
        MeshId::Starfield,
        MeshId::Planet,
        MeshId::Moon,
        MeshId::Interior,
        MeshId::Telescope,
    ];

    /// Generate the CPU geometry for this mesh.
    pub fn build(self) -> MeshData {
        match self {
            MeshId::Starfield => geometry::sphere(STARFIELD_RADIUS, 32, 16),
            MeshId::Planet => geometry::sphere(PLANET_RADIUS, 64, 32),
            MeshId::Moon => geometry::sphere(MOON_RADIUS, 32, 16),
            MeshId::Interior | MeshId::Telescope => geometry::cube(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeshId::Starfield => "starfield",
            MeshId::Planet => "planet",
            MeshId::Moon => "moon",
            MeshId::Interior => "interior",
            MeshId::Telescope => "telescope",
        }
    }
}

/// Encloses the whole scene and stays inside the far plane.
pub const STARFIELD_RADIUS: f32 = 50.0;
pub const PLANET_RADIUS: f32 = 1.5;
pub const MOON_RADIUS: f32 = 0.3;

pub const PLANET_POSITION: Vec3 = Vec3::new(-5.0, 0.0, -8.0);
pub const PLANET_TINT: Vec3 = Vec3::new(0.3, 0.6, 1.0);

pub const MOON_ORBIT_RADIUS: f32 = 3.0;
pub const MOON_HEIGHT: f32 = 0.5;

pub const WALL_TINT: Vec3 = Vec3::new(0.6, 0.6, 0.65);
pub const FLOOR_TINT: Vec3 = Vec3::new(0.5, 0.5, 0.55);

pub const TELESCOPE_ACTIVE_TINT: Vec3 = Vec3::new(0.3, 0.8, 1.0);
pub const TELESCOPE_INACTIVE_TINT: Vec3 = Vec3::new(0.4, 0.4, 0.45);
pub const LENS_ACTIVE_TINT: Vec3 = Vec3::new(0.5, 1.0, 1.0);
pub const LENS_INACTIVE_TINT: Vec3 = Vec3::new(0.3, 0.3, 0.35);

/// A static interior panel: scaled cube then translated.
#[derive(Clone, Copy, Debug)]
pub struct Panel {
    pub label: &'static str,
    pub scale: Vec3,
    pub translation: Vec3,
    pub tint: Vec3,
}

impl Panel {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_scale(self.scale)
    }

    pub fn material(&self) -> Material {
        Material::textured(self.tint, TextureId::Metal)
    }
}

/// Left wall, right wall, floor, in draw order.
pub const PANELS: [Panel; 3] = [
    Panel {
        label: "left-wall",
        scale: Vec3::new(0.1, 2.0, 3.0),
        translation: Vec3::new(-2.0, 0.0, 1.0),
        tint: WALL_TINT,
    },
    Panel {
        label: "right-wall",
        scale: Vec3::new(0.1, 2.0, 3.0),
        translation: Vec3::new(2.0, 0.0, 1.0),
        tint: WALL_TINT,
    },
    Panel {
        label: "floor",
        scale: Vec3::new(4.0, 0.1, 3.0),
        translation: Vec3::new(0.0, -2.0, 1.0),
        tint: FLOOR_TINT,
    },
];

pub fn starfield_material() -> Material {
    Material::textured(Vec3::ONE, TextureId::Stars)
}

/// Spin about the planet's own vertical axis, then move it into place.
pub fn planet_transform(rotation_deg: f32) -> Mat4 {
    Mat4::from_translation(PLANET_POSITION) * Mat4::from_rotation_y(rotation_deg.to_radians())
}

pub fn planet_material() -> Material {
    Material::textured(PLANET_TINT, TextureId::Planet)
}

/// Moon centre on a circle of [`MOON_ORBIT_RADIUS`] around the planet, raised by [`MOON_HEIGHT`].
pub fn moon_position(orbit_deg: f32) -> Vec3 {
    let angle = orbit_deg.to_radians();
    Vec3::new(
        PLANET_POSITION.x + MOON_ORBIT_RADIUS * angle.cos(),
        MOON_HEIGHT,
        PLANET_POSITION.z + MOON_ORBIT_RADIUS * angle.sin(),
    )
}

pub fn moon_transform(orbit_deg: f32) -> Mat4 {
    Mat4::from_translation(moon_position(orbit_deg))
}

pub fn moon_material() -> Material {
    Material::textured(Vec3::ONE, TextureId::Moon)
}

/// Long thin box tilted up 20° and swung 30° to the side, right of the viewer.
pub fn telescope_body_transform() -> Mat4 {
    Mat4::from_translation(Vec3::new(1.2, -0.3, 1.5))
        * Mat4::from_rotation_y((-30.0f32).to_radians())
        * Mat4::from_rotation_x((-20.0f32).to_radians())
        * Mat4::from_scale(Vec3::new(0.15, 0.15, 0.5))
}

pub fn telescope_body_material(active: bool) -> Material {
    let tint = if active {
        TELESCOPE_ACTIVE_TINT
    } else {
        TELESCOPE_INACTIVE_TINT
    };
    Material::textured(tint, TextureId::Metal)
}

/// Small sphere at the eyepiece end. Drawn with the moon mesh.
pub fn lens_transform() -> Mat4 {
    Mat4::from_translation(Vec3::new(1.1, -0.15, 1.3)) * Mat4::from_scale(Vec3::splat(0.1))
}

pub fn lens_material(active: bool) -> Material {
    Material::solid(if active {
        LENS_ACTIVE_TINT
    } else {
        LENS_INACTIVE_TINT
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moon_orbit_at_zero_degrees() {
        let pos = moon_position(0.0);
        let expected = PLANET_POSITION + Vec3::new(MOON_ORBIT_RADIUS, MOON_HEIGHT, 0.0);
        assert!(pos.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_moon_orbit_at_ninety_degrees() {
        let pos = moon_position(90.0);
        assert!((pos.x - PLANET_POSITION.x).abs() < 1e-5);
        assert!((pos.z - (PLANET_POSITION.z + MOON_ORBIT_RADIUS)).abs() < 1e-5);
        assert_eq!(pos.y, MOON_HEIGHT);
    }

    #[test]
    fn test_moon_stays_on_orbit_circle() {
        for step in 0..36 {
            let pos = moon_position(step as f32 * 10.0 + 1234.0);
            let flat = Vec3::new(pos.x - PLANET_POSITION.x, 0.0, pos.z - PLANET_POSITION.z);
            assert!((flat.length() - MOON_ORBIT_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn test_planet_spins_in_place() {
        for angle in [0.0, 45.0, 190.0, 720.0] {
            let centre = planet_transform(angle).transform_point3(Vec3::ZERO);
            assert!(centre.abs_diff_eq(PLANET_POSITION, 1e-5));
        }
        let surface = planet_transform(90.0).transform_point3(Vec3::X * PLANET_RADIUS);
        assert!(surface.abs_diff_eq(PLANET_POSITION + Vec3::NEG_Z * PLANET_RADIUS, 1e-5));
    }

    #[test]
    fn test_panels_scale_before_translate() {
        let left = PANELS[0].transform();
        let corner = left.transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!(corner.abs_diff_eq(Vec3::new(-1.95, 1.0, 2.5), 1e-5));
        let floor_centre = PANELS[2].transform().transform_point3(Vec3::ZERO);
        assert!(floor_centre.abs_diff_eq(Vec3::new(0.0, -2.0, 1.0), 1e-6));
    }

    #[test]
    fn test_telescope_body_placement() {
        let m = telescope_body_transform();
        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::new(1.2, -0.3, 1.5), 1e-6));
        // Local +Z (the long axis) ends up tilted upward and swung toward -X.
        let axis = m.transform_vector3(Vec3::Z).normalize();
        assert!(axis.y > 0.0);
        assert!(axis.x < 0.0);
        assert!((m.transform_vector3(Vec3::Z).length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_lens_is_small_sphere_near_eyepiece() {
        let m = lens_transform();
        let rim = m.transform_point3(Vec3::X * MOON_RADIUS);
        assert!(rim.abs_diff_eq(Vec3::new(1.1 + 0.03, -0.15, 1.3), 1e-5));
    }

    #[test]
    fn test_telescope_tints_depend_on_state() {
        assert_eq!(telescope_body_material(true).color, TELESCOPE_ACTIVE_TINT);
        assert_eq!(telescope_body_material(false).color, TELESCOPE_INACTIVE_TINT);
        assert_eq!(lens_material(true).color, LENS_ACTIVE_TINT);
        assert!(!lens_material(true).uses_texture());
        assert_eq!(telescope_body_material(false).texture, Some(TextureId::Metal));
    }

    #[test]
    fn test_starfield_fits_inside_far_plane() {
        let camera = pod_player::Camera::default();
        assert!(STARFIELD_RADIUS + camera.position.length() < pod_player::FAR_PLANE);
    }
}

//! Per-frame draw orchestration.
//!
//! [`plan_frame`] turns the application state into frame globals and an
//! ordered draw list; [`render_frame`] replays that list against any
//! [`DrawTarget`]. The order is fixed: starfield, planet, moon, the three
//! interior panels, telescope body, lens.

use glam::{Mat4, Vec3};

use crate::layout::{self, MeshId, PANELS};
use crate::material::Material;
use crate::state::AppState;

/// Uniform state shared by every draw in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGlobals {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_pos: Vec3,
    pub light_pos: Vec3,
    pub light_color: Vec3,
    pub light_enabled: bool,
}

/// One draw: which mesh, where, and how it is shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub label: &'static str,
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
}

/// Receiver of a frame's draws.
///
/// Implementations that cannot honour a draw (missing mesh, texture or
/// pipeline) skip it rather than failing the frame.
pub trait DrawTarget {
    fn begin_frame(&mut self, globals: &FrameGlobals);
    fn draw(&mut self, object: &SceneObject);
}

/// Everything needed to render one frame, independent of the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub globals: FrameGlobals,
    pub objects: Vec<SceneObject>,
}

/// Number of draws issued every frame.
pub const DRAWS_PER_FRAME: usize = 8;

pub fn plan_frame(state: &AppState, aspect_ratio: f32) -> FramePlan {
    let camera = &state.camera;
    let globals = FrameGlobals {
        view: camera.view_matrix(),
        projection: camera.projection_matrix(aspect_ratio),
        view_pos: camera.position,
        light_pos: state.light.position,
        light_color: state.light.color,
        light_enabled: state.interaction.light_enabled(),
    };

    let active = state.interaction.telescope_active();
    let mut objects = Vec::with_capacity(DRAWS_PER_FRAME);
    objects.push(SceneObject {
        label: "starfield",
        mesh: MeshId::Starfield,
        model: Mat4::IDENTITY,
        material: layout::starfield_material(),
    });
    objects.push(SceneObject {
        label: "planet",
        mesh: MeshId::Planet,
        model: layout::planet_transform(state.clocks.planet_rotation),
        material: layout::planet_material(),
    });
    objects.push(SceneObject {
        label: "moon",
        mesh: MeshId::Moon,
        model: layout::moon_transform(state.clocks.moon_orbit),
        material: layout::moon_material(),
    });
    objects.extend(PANELS.iter().map(|panel| SceneObject {
        label: panel.label,
        mesh: MeshId::Interior,
        model: panel.transform(),
        material: panel.material(),
    }));
    objects.push(SceneObject {
        label: "telescope",
        mesh: MeshId::Telescope,
        model: layout::telescope_body_transform(),
        material: layout::telescope_body_material(active),
    });
    objects.push(SceneObject {
        label: "lens",
        mesh: MeshId::Moon,
        model: layout::lens_transform(),
        material: layout::lens_material(active),
    });

    FramePlan { globals, objects }
}

pub fn render_frame(plan: &FramePlan, target: &mut impl DrawTarget) {
    target.begin_frame(&plan.globals);
    for object in &plan.objects {
        target.draw(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{
        LENS_ACTIVE_TINT, LENS_INACTIVE_TINT, TELESCOPE_ACTIVE_TINT, TELESCOPE_INACTIVE_TINT,
    };
    use crate::material::TextureId;
    use pod_input::{KeyboardState, RawKeyEvent};
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    #[derive(Default)]
    struct RecordingTarget {
        globals: Vec<FrameGlobals>,
        draws: Vec<SceneObject>,
    }

    impl DrawTarget for RecordingTarget {
        fn begin_frame(&mut self, globals: &FrameGlobals) {
            self.globals.push(*globals);
        }

        fn draw(&mut self, object: &SceneObject) {
            self.draws.push(*object);
        }
    }

    fn record(state: &AppState) -> RecordingTarget {
        let mut target = RecordingTarget::default();
        render_frame(&plan_frame(state, 16.0 / 9.0), &mut target);
        target
    }

    #[test]
    fn test_draw_order_and_parameters() {
        let target = record(&AppState::default());
        assert_eq!(target.globals.len(), 1);
        assert_eq!(target.draws.len(), DRAWS_PER_FRAME);

        let labels: Vec<_> = target.draws.iter().map(|d| d.label).collect();
        assert_eq!(
            labels,
            ["starfield", "planet", "moon", "left-wall", "right-wall", "floor", "telescope", "lens"]
        );
        let meshes: Vec<_> = target.draws.iter().map(|d| d.mesh).collect();
        assert_eq!(
            meshes,
            [
                MeshId::Starfield,
                MeshId::Planet,
                MeshId::Moon,
                MeshId::Interior,
                MeshId::Interior,
                MeshId::Interior,
                MeshId::Telescope,
                MeshId::Moon,
            ]
        );
        let textures: Vec<_> = target.draws.iter().map(|d| d.material.texture).collect();
        assert_eq!(
            textures,
            [
                Some(TextureId::Stars),
                Some(TextureId::Planet),
                Some(TextureId::Moon),
                Some(TextureId::Metal),
                Some(TextureId::Metal),
                Some(TextureId::Metal),
                Some(TextureId::Metal),
                None,
            ]
        );

        assert_eq!(target.draws[0].model, Mat4::IDENTITY);
        assert_eq!(target.draws[0].material.color, Vec3::ONE);
        assert_eq!(target.draws[1].material.color, Vec3::new(0.3, 0.6, 1.0));
        assert_eq!(target.draws[3].material.color, Vec3::new(0.6, 0.6, 0.65));
        assert_eq!(target.draws[5].material.color, Vec3::new(0.5, 0.5, 0.55));
        assert_eq!(target.draws[6].material.color, TELESCOPE_INACTIVE_TINT);
        assert_eq!(target.draws[7].material.color, LENS_INACTIVE_TINT);
    }

    #[test]
    fn test_globals_follow_state() {
        let mut state = AppState::default();
        state.interaction.toggle_light();
        let target = record(&state);
        let globals = target.globals[0];
        assert!(!globals.light_enabled);
        assert_eq!(globals.view_pos, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(globals.light_pos, Vec3::new(-8.0, 5.0, -5.0));
        assert_eq!(globals.light_color, Vec3::new(1.0, 0.95, 0.8));
        assert_eq!(globals.view, state.camera.view_matrix());
        assert_eq!(globals.projection, state.camera.projection_matrix(16.0 / 9.0));
    }

    #[test]
    fn test_moon_draw_follows_orbit_clock() {
        let mut state = AppState::default();
        state.clocks.moon_orbit = 90.0;
        let target = record(&state);
        let centre = target.draws[2].model.transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(Vec3::new(-5.0, 0.5, -5.0), 1e-5));
    }

    #[test]
    fn test_telescope_scenario_two_seconds() {
        let mut state = AppState::default();
        assert!(state.interaction.light_enabled());
        assert!(!state.interaction.telescope_active());
        assert_eq!(state.interaction.current_zoom(), 45.0);

        let mut keyboard = KeyboardState::new();
        keyboard.process_raw(RawKeyEvent::code(KeyCode::KeyE, ElementState::Pressed));
        let dt = 1.0 / 60.0;
        for frame in 0..120 {
            state.update(dt, &keyboard, (0.0, 0.0));
            keyboard.end_frame();
            if frame == 0 {
                keyboard.process_raw(RawKeyEvent::code(KeyCode::KeyE, ElementState::Released));
            }
        }

        assert!(state.interaction.telescope_active());
        let zoom = state.interaction.current_zoom();
        assert!((zoom - 20.0).abs() < (zoom - 45.0).abs());

        let target = record(&state);
        assert_eq!(target.draws[6].material.color, TELESCOPE_ACTIVE_TINT);
        assert_eq!(target.draws[7].material.color, LENS_ACTIVE_TINT);
        assert_eq!(
            target.globals[0].projection,
            Mat4::perspective_rh(zoom.to_radians(), 16.0 / 9.0, 0.1, 100.0)
        );
    }
}

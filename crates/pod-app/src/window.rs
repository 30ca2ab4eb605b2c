//! Window creation and event handling via winit.
//!
//! [`ViewerApp`] implements winit's [`ApplicationHandler`]: it owns the
//! window, the GPU context, the scene renderer and the [`AppState`], and runs
//! one update plus one render per `RedrawRequested`.

use std::sync::Arc;

use pod_config::Config;
use pod_input::{KeyboardState, MouseState};
use pod_render::{
    RenderContext, RenderContextError, RendererOptions, SceneRenderer, SurfaceError, TextureError,
    init_render_context_blocking,
};
use pod_scene::{AppState, plan_frame};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;

/// Errors that stop the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error("failed to create scene resources: {0}")]
    Resources(#[from] TextureError),

    #[error("presentation failed: {0}")]
    Surface(#[from] SurfaceError),
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attributes = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attributes
    }
}

/// Timeouts skip the frame; anything else ends the viewer.
fn is_fatal(error: &SurfaceError) -> bool {
    !matches!(error, SurfaceError::Timeout)
}

pub struct ViewerApp {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    state: AppState,
    keyboard: KeyboardState,
    mouse: MouseState,
    clock: FrameClock,
    failure: Option<AppError>,
}

impl ViewerApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::from_config(&config),
            config,
            window: None,
            gpu: None,
            renderer: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            clock: FrameClock::new(),
            failure: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Redraws processed so far.
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            asset_dir: self.config.scene.asset_dir.clone(),
            procedural_fallback: self.config.scene.procedural_fallback,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let gpu = init_render_context_blocking(Arc::clone(&window), self.config.window.vsync)?;
        let renderer = SceneRenderer::from_context(&gpu, &self.renderer_options())?;

        let (width, height) = gpu.size();
        info!("Window ready: {}x{} ({:?})", width, height, gpu.surface_format);

        self.mouse.set_captured(&window, true);
        window.request_redraw();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.clock.restart();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        error!("{error}");
        self.failure = Some(error);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        debug!("Surface resized to {}x{}", width, height);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let look = self.mouse.look_offsets(self.config.input.invert_y);
        self.state.update(dt, &self.keyboard, look);
        self.keyboard.end_frame();
        self.mouse.end_frame();

        if self.state.exit_requested() {
            event_loop.exit();
            return;
        }

        let rendered = match (&self.gpu, &mut self.renderer) {
            (Some(gpu), Some(renderer)) => {
                let plan = plan_frame(&self.state, gpu.aspect_ratio());
                renderer.render(gpu, &plan)
            }
            _ => Ok(()),
        };
        match rendered {
            Ok(()) => {}
            Err(e) if is_fatal(&e) => {
                self.fail(event_loop, e.into());
                return;
            }
            Err(e) => warn!("Skipping frame: {e}"),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.state.request_exit();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => self.keyboard.process_event(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            WindowEvent::Focused(focused) => {
                if !focused {
                    // Key releases are not delivered while unfocused.
                    self.keyboard.release_all();
                }
                if let Some(window) = &self.window {
                    self.mouse.set_captured(window, focused);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse.on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Create the event loop and run the viewer until it exits.
///
/// Blocks until the window closes, `Escape` is pressed, or start-up fails.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(config);
    event_loop.run_app(&mut app)?;
    info!("Viewer stopped after {} frames", app.frame_count());
    match app.failure.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{LogicalSize, Size};

    #[test]
    fn test_window_attributes_use_config_size_and_title() {
        let config = Config::default();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Space Observation Pod - Midterm Project");
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(1280.0, 720.0)))
        );
        assert!(attrs.fullscreen.is_none());
    }

    #[test]
    fn test_window_attributes_fullscreen() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        config.window.width = 800;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.fullscreen, Some(Fullscreen::Borderless(None)));
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(800.0, 720.0)))
        );
    }

    #[test]
    fn test_only_timeouts_are_recoverable() {
        assert!(!is_fatal(&SurfaceError::Timeout));
        assert!(is_fatal(&SurfaceError::Lost));
        assert!(is_fatal(&SurfaceError::OutOfMemory));
    }

    #[test]
    fn test_new_app_starts_from_config() {
        let mut config = Config::default();
        config.camera.start_position = [1.0, 2.0, 3.0];
        let app = ViewerApp::new(config);
        assert_eq!(app.state().camera.position.to_array(), [1.0, 2.0, 3.0]);
        assert!(app.state().interaction.light_enabled());
        assert!(!app.state().exit_requested());
        assert_eq!(app.frame_count(), 0);
        assert!(app.window.is_none());
    }

    #[test]
    fn test_renderer_options_follow_scene_config() {
        let mut config = Config::default();
        config.scene.procedural_fallback = false;
        config.scene.asset_dir = "textures".into();
        let options = ViewerApp::new(config).renderer_options();
        assert!(!options.procedural_fallback);
        assert_eq!(options.asset_dir, std::path::PathBuf::from("textures"));
    }
}

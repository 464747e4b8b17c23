//! Application event loop.
//!
//! This module drives the sample with winit's [`ApplicationHandler`]. One
//! iteration of the frame loop is one `RedrawRequested` event, and every frame
//! requests the next one, so the scene is redrawn continuously without any frame
//! rate limit.
//!
//! # Lifecycle Flow
//!
//! 1. `resumed` creates the window, the GPU context and the [`Scene`]
//! 2. keyboard events are folded into the [`KeyboardState`] as they arrive;
//!    losing focus releases every held key
//! 3. `Resized` reconfigures the surface and the viewport right away
//! 4. on `RedrawRequested`:
//!    - stop if a close was requested during the previous frame, otherwise
//!      level-check the keys ([`Session::begin_frame`])
//!    - clear, select the pipeline for the mode, draw the quads, present
//!    - capture a screenshot if one was requested
//! 5. `exiting` drops the scene and the context, releasing all GPU resources

use std::{iter, path::Path, sync::Arc};

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    config::Settings,
    context::Context,
    error::SampleError,
    input::{KeyboardState, Session},
    render::{Frame, Scene},
    screenshot,
};

/// Everything that exists once the window is up.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene,
    session: Session,
}

impl AppState {
    fn new(
        window: Arc<Window>,
        settings: &Settings,
        runtime: &tokio::runtime::Runtime,
    ) -> anyhow::Result<Self> {
        let ctx = runtime
            .block_on(Context::new(window, settings))
            .context("App initialization failed. Cannot create the main context")?;
        let scene = Scene::new(&ctx.device, &ctx.queue, ctx.config.format, settings)
            .context("App initialization failed. Cannot set up the scene")?;
        Ok(Self {
            ctx,
            scene,
            session: Session::new(settings.screenshot_trigger),
        })
    }

    fn frame(&self) -> Frame {
        Frame {
            mode: self.session.mode(),
            clear_colour: self.ctx.clear_colour,
            viewport: self.ctx.viewport,
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // keep the loop going
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.ctx.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.scene.encode(&mut encoder, &view, &self.frame());
        self.ctx.queue.submit(iter::once(encoder.finish()));

        output.present();
        Ok(())
    }

    /// Capture failures are logged and otherwise ignored.
    fn save_screenshot(&self, runtime: &tokio::runtime::Runtime, dir: &Path) {
        let saved = screenshot::capture(
            &self.ctx.device,
            &self.ctx.queue,
            runtime,
            &self.scene,
            self.ctx.config.format,
            &self.frame(),
        )
        .and_then(|image| {
            Ok(screenshot::write_bitmap(
                dir,
                screenshot::unix_seconds_now(),
                &image,
            )?)
        });
        match saved {
            Ok(path) => log::info!("Saved screenshot to {}", path.display()),
            Err(e) => log::error!("Screenshot failed: {e:#}"),
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: Settings,
    keys: KeyboardState,
    state: Option<AppState>,
    // Set when setup failed; handed back to the caller of `run`.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            async_runtime,
            settings,
            keys: KeyboardState::new(),
            state: None,
            error: None,
        })
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(true);
        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| SampleError::SurfaceInit(e.to_string()))
            .context("Failed to create the window")?;
        AppState::new(Arc::new(window), &self.settings, &self.async_runtime)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => self.keys.handle_key(code, key_state),
            WindowEvent::Focused(false) => self.keys.release_all(),
            WindowEvent::RedrawRequested => {
                let Some(capture) = state.session.begin_frame(&mut self.keys) else {
                    event_loop.exit();
                    return;
                };

                match state.render() {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }

                if capture {
                    state.save_screenshot(&self.async_runtime, &self.settings.screenshot_dir);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources go before the event loop tears the window down
        self.state = None;
    }
}

/// Open the window and run the frame loop until it is closed.
///
/// Returns an error if the window, the GPU context or the shaders could not be
/// set up. Logging is initialised here from `RUST_LOG`.
pub fn run(settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

use std::sync::Arc;

use flecs_ecs::prelude::*;
use lumen_core::{App, Plugin, time::Time};
use lumen_input::physical::{InputState, PhysicalInputId};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::{EventLoopError, OsError},
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

/// The OS window, shared with the renderer's surface.
#[derive(Component)]
pub struct MainWindow(pub Arc<Window>);

/// Current drawable size in physical pixels.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Lumen".to_string(),
            width: 1024,
            height: 768,
            resizable: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create the window: {0}")]
    CreateWindow(#[from] OsError),
    #[error("{0}")]
    Aborted(String),
}

#[derive(Default)]
pub struct WindowPlugin {
    pub settings: WindowSettings,
}

impl Plugin for WindowPlugin {
    fn build(&self, app: &mut App) {
        app.world
            .component::<WindowSettings>()
            .add_trait::<flecs::Singleton>();
        app.world.set(self.settings.clone());

        app.world
            .component::<WindowSize>()
            .add_trait::<flecs::Singleton>();
        app.world.set(WindowSize {
            width: self.settings.width,
            height: self.settings.height,
        });

        // Set once the event loop has created the window.
        app.world
            .component::<MainWindow>()
            .add_trait::<flecs::Singleton>();
    }
}

const TITLE_REFRESH_SECONDS: f32 = 1.0;

// Holds the App while the OS drives the loop.
struct LumenRunner {
    app: App,
    window: Option<Arc<Window>>,
    error: Option<WindowError>,
    title_refreshed_at: f32,
}

impl LumenRunner {
    fn new(app: App) -> Self {
        Self {
            app,
            window: None,
            error: None,
            title_refreshed_at: 0.0,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, OsError> {
        let settings = self.app.world.get::<&WindowSettings>(|s| s.clone());

        let attributes = Window::default_attributes()
            .with_title(settings.title)
            .with_inner_size(LogicalSize::new(settings.width, settings.height))
            .with_resizable(settings.resizable);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        self.app.world.set(MainWindow(window.clone()));
        self.app.world.set(WindowSize {
            width: size.width,
            height: size.height,
        });

        Ok(window)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.app.world.get::<&mut Time>(|time| time.update());

        self.app.update();

        if self.app.exit_requested() {
            event_loop.exit();
            return;
        }

        self.refresh_title();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn refresh_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };

        let (elapsed, fps) = self
            .app
            .world
            .get::<&Time>(|time| (time.elapsed_seconds(), time.frames_per_second()));
        if elapsed - self.title_refreshed_at < TITLE_REFRESH_SECONDS {
            return;
        }
        self.title_refreshed_at = elapsed;

        let title = self.app.world.get::<&WindowSettings>(|s| s.title.clone());
        window.set_title(&format!("{title} - {fps:.0} fps"));
    }
}

impl ApplicationHandler for LumenRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(window) => {
                log::info!("Window created ({:?})", window.inner_size());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Failed to create the window: {err}");
                self.error = Some(err.into());
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.app.world.get::<&mut InputState>(|input| {
                    input.set_button(PhysicalInputId::keyboard(code), state.is_pressed());
                });
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested, stopping");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.app.world.get::<&mut WindowSize>(|window_size| {
                    window_size.width = size.width;
                    window_size.height = size.height;
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }
}

/// Opens the window and drives `app` one frame per redraw until the window
/// closes or a system asks to exit.
pub fn run_lumen_app(app: App) -> Result<(), WindowError> {
    let event_loop = EventLoop::new()?;

    // Poll keeps frames coming even when the OS has no events for us.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = LumenRunner::new(app);
    event_loop.run_app(&mut runner)?;

    if let Some(err) = runner.error {
        return Err(err);
    }
    match runner.app.failure() {
        Some(reason) => Err(WindowError::Aborted(reason)),
        None => Ok(()),
    }
}

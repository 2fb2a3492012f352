use flecs_ecs::prelude::*;
use glam::Vec3;

pub mod assets;
pub mod camera;
pub mod color;
pub mod pipeline;
pub mod time;
pub mod transform;

use crate::{pipeline::define_pipeline_stages, time::Time};

/// The Plugin Trait
/// Every module (Renderer, Input, Window, Scene) must implement this.
pub trait Plugin {
    fn build(&self, app: &mut App);
}

/// Background colour the renderer clears to at the start of each frame.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ClearColor(pub Vec3);

impl Default for ClearColor {
    fn default() -> Self {
        Self(Vec3::ZERO)
    }
}

/// Raised by any system that wants the runner to stop after the current frame.
#[derive(Component, Default, Clone, Debug)]
pub struct AppExit {
    pub requested: bool,
    pub failure: Option<String>,
}

impl AppExit {
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Stops the app and records why. The runner turns this into a non-zero exit.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.requested = true;
        self.failure = Some(reason.into());
    }
}

/// The Engine Application
/// Holds the ECS World and orchestrates the loop.
pub struct App {
    pub world: World,
}

impl App {
    pub fn new() -> Self {
        let world = World::new();

        define_pipeline_stages(&world);

        world.component::<Time>().add_trait::<flecs::Singleton>();
        world.set(Time::default());

        world.component::<AppExit>().add_trait::<flecs::Singleton>();
        world.set(AppExit::default());

        world
            .component::<ClearColor>()
            .add_trait::<flecs::Singleton>();
        world.set(ClearColor::default());

        Self { world }
    }

    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        plugin.build(self);
        self
    }

    /// Processes ONE frame.
    /// The windowing system decides WHEN to run, we never take over the thread.
    pub fn update(&mut self) {
        self.world.progress();
    }

    pub fn exit_requested(&self) -> bool {
        self.world.get::<&AppExit>(|exit| exit.requested)
    }

    pub fn failure(&self) -> Option<String> {
        self.world.get::<&AppExit>(|exit| exit.failure.clone())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

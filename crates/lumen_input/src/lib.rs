use flecs_ecs::prelude::*;
use lumen_core::{App, Plugin};

use crate::{
    logical::{InputMap, register_sys_input_map},
    physical::InputState,
};

pub mod logical;
pub mod physical;

pub use winit::keyboard::KeyCode;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.world
            .component::<InputState>()
            .add_trait::<flecs::Singleton>();
        app.world.set(InputState::default());

        app.world
            .component::<InputMap>()
            .add_trait::<flecs::Singleton>();
        app.world.set(InputMap::default());

        register_sys_input_map(app);
    }
}

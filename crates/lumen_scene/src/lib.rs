use flecs_ecs::prelude::*;
use lumen_core::{App, ClearColor, Plugin, time::Time};
use lumen_input::{logical::ActionId, physical::InputState};

pub mod day_night;
pub mod light;
pub mod shading;

pub use day_night::{DayNight, DayPhase};
pub use light::{Light, LightKind, SceneLights, SpotlightSweep};
pub use shading::{RenderObject, Shading, ShadingStyle};

pub const ACTION_TOGGLE_DAY_NIGHT: ActionId = ActionId(10);
pub const ACTION_TOGGLE_SHADING: ActionId = ActionId(11);
pub const ACTION_TOGGLE_SPOTLIGHT: ActionId = ActionId(12);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.world
            .component::<SceneLights>()
            .add_trait::<flecs::Singleton>();
        app.world.set(SceneLights::default());

        // Set by the application once its lights and materials exist.
        app.world
            .component::<DayNight>()
            .add_trait::<flecs::Singleton>();
        app.world
            .component::<Shading>()
            .add_trait::<flecs::Singleton>();
        app.world
            .component::<SpotlightSweep>()
            .add_trait::<flecs::Singleton>();

        app.world.component::<RenderObject>();

        register_light_systems(app);
        register_shading_systems(app);
    }
}

fn register_light_systems(app: &App) {
    app.world
        .system_named::<(&InputState, &mut DayNight, &mut SceneLights, &mut ClearColor)>(
            "day_night_toggle",
        )
        .kind(flecs::pipeline::OnUpdate)
        .each(|(input, day_night, lights, clear_color)| {
            if input.just_pressed(ACTION_TOGGLE_DAY_NIGHT) {
                clear_color.0 = day_night.toggle(&mut lights.0);
                log::info!("Switched to {:?}", day_night.phase);
            }
        });

    app.world
        .system_named::<(&InputState, &SpotlightSweep, &mut SceneLights)>("spotlight_toggle")
        .kind(flecs::pipeline::OnUpdate)
        .each(|(input, sweep, lights)| {
            if input.just_pressed(ACTION_TOGGLE_SPOTLIGHT) {
                if let Some(enabled) = lights.toggle(sweep.light) {
                    log::info!("Spotlight {}", if enabled { "on" } else { "off" });
                }
            }
        });

    app.world
        .system_named::<(&Time, &SpotlightSweep, &mut SceneLights)>("spotlight_animation")
        .kind(flecs::pipeline::OnUpdate)
        .each(|(time, sweep, lights)| {
            sweep.apply(lights, time.elapsed_seconds());
        });
}

fn register_shading_systems(app: &App) {
    let render_objects = app
        .world
        .query_named::<&mut RenderObject>("render_objects")
        .set_cached()
        .build();

    app.world
        .system_named::<(&InputState, &mut Shading)>("shading_toggle")
        .kind(flecs::pipeline::OnUpdate)
        .each(move |(input, shading)| {
            if input.just_pressed(ACTION_TOGGLE_SHADING) {
                let material = shading.toggle();

                let mut reassigned = 0;
                render_objects.each(|object| {
                    object.material = material;
                    reassigned += 1;
                });

                log::info!(
                    "Shading style {:?}: {} objects now use material {}",
                    shading.style,
                    reassigned,
                    material.id
                );
            }
        });
}

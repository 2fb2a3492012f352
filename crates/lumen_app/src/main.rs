use std::{path::PathBuf, process::ExitCode};

use flecs_ecs::prelude::*;
use glam::Vec3;
use lumen_assets::{
    AssetError, AssetPlugin, MaterialData, MaterialSettings, MaterialStore, MeshData, MeshStore,
};
use lumen_core::{App, AppExit, ClearColor, camera::Camera, color::from_hex, transform::Transform};
use lumen_input::{
    InputPlugin, KeyCode,
    logical::{ActionId, InputMap},
    physical::InputState,
};
use lumen_renderer::RenderPlugin;
use lumen_scene::{
    ACTION_TOGGLE_DAY_NIGHT, ACTION_TOGGLE_SHADING, ACTION_TOGGLE_SPOTLIGHT, DayNight, Light,
    RenderObject, SceneLights, ScenePlugin, Shading, SpotlightSweep,
};
use lumen_window::{WindowError, WindowPlugin, run_lumen_app};
use thiserror::Error;

mod camera_rig;
mod config;

use camera_rig::{ACTION_TURN_LEFT, ACTION_TURN_RIGHT, CameraRig, register_camera_rig};
use config::{ConfigError, DemoConfig};

pub const ACTION_EXIT: ActionId = ActionId(1);

const DAY_SKY: u32 = 0xEDFAFD;
const NIGHT_SKY: u32 = 0x070B34;
const GRAY: u32 = 0x7A7A7A;

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.0);

// Indices into `SceneLights`.
const SUN: usize = 0;
const LAMP: usize = 1;
const SPOTLIGHT: usize = 2;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Window(#[from] WindowError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(config_path.as_deref())?;

    let mesh = MeshData::load_obj(&config.mesh_path)?;
    log::info!(
        "Loaded {} ({} triangles)",
        config.mesh_path.display(),
        mesh.triangle_count()
    );

    let mut app = App::new();

    app.add_plugin(InputPlugin);
    app.add_plugin(WindowPlugin {
        settings: config.window_settings(),
    });
    app.add_plugin(AssetPlugin);
    app.add_plugin(ScenePlugin);
    app.add_plugin(RenderPlugin);

    setup_scene(&app, &config, mesh);
    bind_keys(&app);
    register_camera_rig(&app);
    register_exit(&app);

    run_lumen_app(app)?;
    Ok(())
}

fn register_exit(app: &App) {
    app.world
        .system_named::<(&InputState, &mut AppExit)>("exit_on_escape")
        .kind(flecs::pipeline::OnUpdate)
        .each(|(input, exit)| {
            if input.just_pressed(ACTION_EXIT) {
                log::info!("Exit requested");
                exit.request();
            }
        });
}

fn setup_scene(app: &App, config: &DemoConfig, mesh: MeshData) {
    let mesh = app.world.get::<&mut MeshStore>(|store| store.0.add(mesh));

    let gray = from_hex(GRAY);
    let (phong, toon) = app.world.get::<&mut MaterialStore>(|store| {
        let phong = store.0.add(MaterialData::phong(MaterialSettings {
            ambient_reflectance: gray,
            diffuse_reflectance: gray,
            specular_reflectance: Vec3::ZERO,
            fog_density: config.fog_density,
            ..Default::default()
        }));
        let toon = store.0.add(MaterialData::toon(MaterialSettings {
            diffuse_reflectance: gray,
            fog_density: config.fog_density,
            ..Default::default()
        }));
        (phong, toon)
    });

    let day_sky = from_hex(DAY_SKY);
    let night_sky = from_hex(NIGHT_SKY);
    let sweep = SpotlightSweep::new(SPOTLIGHT);

    // Order must match SUN, LAMP and SPOTLIGHT.
    let mut lights = vec![
        Light::directional(Vec3::new(-1.0, -1.0, -1.0), day_sky),
        Light::point(Vec3::new(10.0, 0.0, 3.0), Vec3::splat(200.0)),
        Light::spot(Vec3::ZERO, sweep.direction_at(0.0), Vec3::splat(3.0)),
    ];

    let day_night = DayNight::new(SUN, LAMP, day_sky, night_sky);
    day_night.apply(&mut lights);

    app.world.set(ClearColor(day_night.sky_color()));
    app.world.set(SceneLights(lights));
    app.world.set(day_night);
    app.world.set(sweep);
    app.world.set(Shading::new(phong, toon));

    app.world
        .entity_named("mesh")
        .set(
            Transform::from_translation(Vec3::from(config.object_position))
                .with_scale(Vec3::splat(config.object_scale)),
        )
        .set(RenderObject {
            mesh,
            material: phong,
        });

    let rig = CameraRig::new(config.turn_speed);
    app.world
        .entity_named("main_camera")
        .set(Camera {
            fov: config.fov_degrees.to_radians(),
            aspect_ratio: config.width as f32 / config.height.max(1) as f32,
            near: config.near,
            far: config.far,
        })
        .set(Transform {
            translation: CAMERA_POSITION,
            rotation: rig.orientation(),
            scale: Vec3::ONE,
        })
        .set(rig);
}

fn bind_keys(app: &App) {
    app.world.get::<&mut InputMap>(|map| {
        map.bind_keyboard_button(KeyCode::KeyN, ACTION_TOGGLE_DAY_NIGHT)
            .bind_keyboard_button(KeyCode::KeyT, ACTION_TOGGLE_SHADING)
            .bind_keyboard_button(KeyCode::KeyL, ACTION_TOGGLE_SPOTLIGHT)
            .bind_keyboard_button(KeyCode::ArrowLeft, ACTION_TURN_LEFT)
            .bind_keyboard_button(KeyCode::ArrowRight, ACTION_TURN_RIGHT)
            .bind_keyboard_button(KeyCode::Escape, ACTION_EXIT);
    });
}

use std::time::Duration;

use flecs_ecs::prelude::*;
use glam::Vec3;
use lumen_assets::{AssetPlugin, MaterialData, MaterialSettings, MaterialStore, MeshData};
use lumen_core::{
    App, ClearColor, assets::Handle, color::from_hex, time::Time, transform::Transform,
};
use lumen_input::{
    InputPlugin, KeyCode,
    logical::InputMap,
    physical::{InputState, PhysicalInputId},
};
use lumen_scene::{
    ACTION_TOGGLE_DAY_NIGHT, ACTION_TOGGLE_SHADING, ACTION_TOGGLE_SPOTLIGHT, DayNight, Light,
    RenderObject, SceneLights, ScenePlugin, Shading, ShadingStyle, SpotlightSweep,
};

const KEY_N: KeyCode = KeyCode::KeyN;
const KEY_T: KeyCode = KeyCode::KeyT;
const KEY_L: KeyCode = KeyCode::KeyL;
const OBJECT_COUNT: usize = 4;

struct TestScene {
    app: App,
    phong: Handle<MaterialData>,
    toon: Handle<MaterialData>,
}

fn scene() -> TestScene {
    let mut app = App::new();
    app.add_plugin(InputPlugin);
    app.add_plugin(AssetPlugin);
    app.add_plugin(ScenePlugin);

    let (phong, toon) = app.world.get::<&mut MaterialStore>(|store| {
        (
            store.0.add(MaterialData::phong(MaterialSettings::default())),
            store.0.add(MaterialData::toon(MaterialSettings::default())),
        )
    });

    let day_sky = from_hex(0xEDFAFD);
    let night_sky = from_hex(0x070B34);
    let mut lights = vec![
        Light::directional(Vec3::new(-1.0, -1.0, -1.0), day_sky),
        Light::point(Vec3::new(10.0, 0.0, 3.0), Vec3::splat(200.0)),
        Light::spot(Vec3::ZERO, Vec3::X, Vec3::splat(3.0)),
    ];
    let day_night = DayNight::new(0, 1, day_sky, night_sky);
    day_night.apply(&mut lights);

    app.world.set(SceneLights(lights));
    app.world.set(ClearColor(day_night.sky_color()));
    app.world.set(day_night);
    app.world.set(Shading::new(phong, toon));
    app.world.set(SpotlightSweep::new(2));

    for i in 0..OBJECT_COUNT {
        app.world
            .entity()
            .set(Transform::from_xyz(i as f32, 0.0, 0.0))
            .set(RenderObject {
                mesh: Handle::<MeshData>::new(0),
                material: phong,
            });
    }

    app.world.get::<&mut InputMap>(|map| {
        map.bind_keyboard_button(KEY_N, ACTION_TOGGLE_DAY_NIGHT)
            .bind_keyboard_button(KEY_T, ACTION_TOGGLE_SHADING)
            .bind_keyboard_button(KEY_L, ACTION_TOGGLE_SPOTLIGHT);
    });

    TestScene { app, phong, toon }
}

fn tap(app: &mut App, key: KeyCode) {
    app.world.get::<&mut InputState>(|input| {
        input.set_button(PhysicalInputId::keyboard(key), true);
        input.set_button(PhysicalInputId::keyboard(key), false);
    });
    app.update();
}

fn materials(app: &App) -> Vec<Handle<MaterialData>> {
    let mut materials = Vec::new();
    app.world
        .query::<&RenderObject>()
        .build()
        .each(|object| materials.push(object.material));
    materials
}

fn lights(app: &App) -> Vec<Light> {
    app.world.get::<&SceneLights>(|lights| lights.0.clone())
}

#[test]
fn shading_toggle_reassigns_every_object_and_leaves_lights_alone() {
    let TestScene {
        mut app,
        phong,
        toon,
    } = scene();
    app.update();
    let lights_before = lights(&app);

    tap(&mut app, KEY_T);

    let after = materials(&app);
    assert_eq!(after.len(), OBJECT_COUNT);
    assert!(after.iter().all(|m| *m == toon));
    assert_eq!(
        app.world.get::<&Shading>(|s| s.style),
        ShadingStyle::Toon
    );

    let lights_after = lights(&app);
    for (before, after) in lights_before.iter().zip(&lights_after) {
        assert_eq!(before.enabled, after.enabled);
        assert_eq!(before.diffuse, after.diffuse);
        assert_eq!(before.pose, after.pose);
    }

    tap(&mut app, KEY_T);
    assert!(materials(&app).iter().all(|m| *m == phong));
}

#[test]
fn day_night_toggle_swaps_pair_and_clear_color() {
    let TestScene { mut app, .. } = scene();
    app.update();

    for expect_day in [false, true, false] {
        tap(&mut app, KEY_N);

        let lights = lights(&app);
        assert_eq!(lights[0].enabled, expect_day);
        assert_eq!(lights[1].enabled, !expect_day);
        assert!(lights[2].enabled, "spotlight is independent of day/night");

        let expected_sky = if expect_day {
            from_hex(0xEDFAFD)
        } else {
            from_hex(0x070B34)
        };
        assert_eq!(app.world.get::<&ClearColor>(|c| c.0), expected_sky);
    }
}

#[test]
fn spotlight_toggle_does_not_touch_the_day_night_pair() {
    let TestScene { mut app, .. } = scene();
    app.update();

    tap(&mut app, KEY_L);

    let lights = lights(&app);
    assert!(lights[0].enabled);
    assert!(!lights[1].enabled);
    assert!(!lights[2].enabled);
}

#[test]
fn spotlight_direction_follows_elapsed_time() {
    let TestScene { mut app, .. } = scene();

    app.world
        .get::<&mut Time>(|time| time.advance(Duration::from_secs(2)));
    app.update();

    let expected = SpotlightSweep::new(2).direction_at(2.0);
    assert!(lights(&app)[2].direction.abs_diff_eq(expected, 1e-5));
}

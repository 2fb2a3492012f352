use std::f32::consts::FRAC_PI_2;

use flecs_ecs::prelude::*;
use glam::Quat;
use lumen_core::{App, camera::Camera, time::Time, transform::Transform};
use lumen_input::{logical::ActionId, physical::InputState};

pub const ACTION_TURN_LEFT: ActionId = ActionId(20);
pub const ACTION_TURN_RIGHT: ActionId = ActionId(21);

/// Turns the camera about the world Z axis. Yaw 0 looks along +Y; the rig
/// starts a quarter turn round, looking along +X with Z up.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub yaw: f32,
    pub turn_speed: f32,
}

impl CameraRig {
    pub const START_YAW: f32 = -FRAC_PI_2;

    pub fn new(turn_speed: f32) -> Self {
        Self {
            yaw: Self::START_YAW,
            turn_speed,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_y(self.yaw)
    }

    /// `direction` is +1 to turn left, -1 to turn right.
    pub fn turn(&mut self, direction: f32, delta_seconds: f32) {
        self.yaw += direction * self.turn_speed * delta_seconds;
    }
}

pub fn register_camera_rig(app: &App) {
    app.world
        .system_named::<(&mut Transform, &mut CameraRig, &Time, &InputState)>("camera_turn")
        .with(Camera::id())
        .kind(flecs::pipeline::OnUpdate)
        .each(|(transform, rig, time, input)| {
            let mut direction = 0.0;
            if input.is_held(ACTION_TURN_LEFT) {
                direction += 1.0;
            }
            if input.is_held(ACTION_TURN_RIGHT) {
                direction -= 1.0;
            }

            if direction != 0.0 {
                rig.turn(direction, time.delta_seconds());
                transform.rotation = rig.orientation();
            }
        });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec3;
    use lumen_input::{InputPlugin, KeyCode, logical::InputMap, physical::PhysicalInputId};

    use super::*;

    #[test]
    fn starts_looking_along_x_with_z_up() {
        let transform = Transform::from_rotation(CameraRig::new(0.5).orientation());

        assert!(transform.forward().abs_diff_eq(Vec3::X, 1e-6));
        assert!(transform.up().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn turning_left_swings_forward_towards_y() {
        let mut rig = CameraRig::new(0.5);
        rig.turn(1.0, 0.2);

        let forward = Transform::from_rotation(rig.orientation()).forward();

        assert!(forward.y > 0.0);
        assert!(forward.z.abs() < 1e-6);
    }

    #[test]
    fn held_arrow_turns_the_camera_at_turn_speed() {
        let mut app = App::new();
        app.add_plugin(InputPlugin);
        register_camera_rig(&app);

        let rig = CameraRig::new(0.5);
        let camera = app
            .world
            .entity()
            .set(Camera::default())
            .set(Transform::from_rotation(rig.orientation()))
            .set(rig)
            .id();

        app.world.get::<&mut InputMap>(|map| {
            map.bind_keyboard_button(KeyCode::ArrowRight, ACTION_TURN_RIGHT);
        });
        app.world.get::<&mut InputState>(|input| {
            input.set_button(PhysicalInputId::keyboard(KeyCode::ArrowRight), true);
        });
        app.world
            .get::<&mut Time>(|time| time.advance(Duration::from_secs(1)));

        app.update();

        let yaw = app
            .world
            .entity_from_id(camera)
            .get::<&CameraRig>(|rig| rig.yaw);
        assert!((yaw - (CameraRig::START_YAW - 0.5)).abs() < 1e-6);
    }
}

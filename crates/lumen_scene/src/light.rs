use flecs_ecs::prelude::*;
use glam::Vec3;
use lumen_core::transform::Transform;

/// Shader-side codes are fixed; the fragment programs switch on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum LightKind {
    Point = 1,
    Directional = 2,
    Spot = 3,
}

impl LightKind {
    pub fn shader_code(self) -> u32 {
        self as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub enabled: bool,
    pub pose: Transform,
    pub direction: Vec3,
    // Colours are intensities: values above 1 or below 0 are legal.
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            enabled: true,
            pose: Transform::default(),
            direction,
            diffuse: color,
            specular: color,
        }
    }

    pub fn point(position: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Point,
            enabled: true,
            pose: Transform::from_translation(position),
            direction: Vec3::ZERO,
            diffuse: color,
            specular: color,
        }
    }

    pub fn spot(position: Vec3, direction: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Spot,
            enabled: true,
            pose: Transform::from_translation(position),
            direction,
            diffuse: color,
            specular: color,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn world_position(&self) -> Vec3 {
        self.pose.world_position()
    }
}

/// Every light in the scene, in upload order.
#[derive(Component, Clone, Debug, Default)]
pub struct SceneLights(pub Vec<Light>);

impl SceneLights {
    pub fn enabled(&self) -> impl Iterator<Item = &Light> {
        self.0.iter().filter(|light| light.enabled)
    }

    /// Flips one light on or off, returning its new state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let light = self.0.get_mut(index)?;
        light.enabled = !light.enabled;
        Some(light.enabled)
    }
}

/// Swings one light's direction around a circle over time.
#[derive(Component, Clone, Debug)]
pub struct SpotlightSweep {
    pub light: usize,
    pub radius: f32,
    pub height: f32,
    pub angular_speed: f32,
}

impl SpotlightSweep {
    pub fn new(light: usize) -> Self {
        Self {
            light,
            radius: 5.0,
            height: 2.0,
            angular_speed: 0.4,
        }
    }

    pub fn direction_at(&self, elapsed_seconds: f32) -> Vec3 {
        let angle = self.angular_speed * elapsed_seconds;
        Vec3::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            self.height,
        )
    }

    pub fn apply(&self, lights: &mut SceneLights, elapsed_seconds: f32) {
        if let Some(light) = lights.0.get_mut(self.light) {
            light.direction = self.direction_at(elapsed_seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn shader_codes_are_stable() {
        assert_eq!(LightKind::Point.shader_code(), 1);
        assert_eq!(LightKind::Directional.shader_code(), 2);
        assert_eq!(LightKind::Spot.shader_code(), 3);
    }

    #[test]
    fn enabled_skips_disabled_lights_in_order() {
        let lights = SceneLights(vec![
            Light::point(Vec3::X, Vec3::ONE),
            Light::point(Vec3::Y, Vec3::ONE).with_enabled(false),
            Light::point(Vec3::Z, Vec3::ONE),
        ]);

        let positions: Vec<Vec3> = lights.enabled().map(Light::world_position).collect();

        assert_eq!(positions, vec![Vec3::X, Vec3::Z]);
    }

    #[test]
    fn toggle_flips_only_the_requested_light() {
        let mut lights = SceneLights(vec![
            Light::directional(-Vec3::ONE, Vec3::ONE),
            Light::spot(Vec3::ZERO, Vec3::X, Vec3::splat(3.0)),
        ]);

        assert_eq!(lights.toggle(1), Some(false));
        assert!(lights.0[0].enabled);
        assert_eq!(lights.toggle(1), Some(true));
        assert_eq!(lights.toggle(5), None);
    }

    #[test]
    fn sweep_follows_the_circle() {
        let sweep = SpotlightSweep::new(0);

        assert!(sweep.direction_at(0.0).abs_diff_eq(Vec3::new(5.0, 0.0, 2.0), 1e-5));

        let quarter_turn = (PI / 2.0) / sweep.angular_speed;
        assert!(
            sweep
                .direction_at(quarter_turn)
                .abs_diff_eq(Vec3::new(0.0, 5.0, 2.0), 1e-4)
        );
    }

    #[test]
    fn sweep_only_touches_its_light() {
        let mut lights = SceneLights(vec![
            Light::directional(Vec3::NEG_Z, Vec3::ONE),
            Light::spot(Vec3::ZERO, Vec3::X, Vec3::ONE),
        ]);
        let before = lights.0[0].clone();

        SpotlightSweep::new(1).apply(&mut lights, 3.0);

        assert_eq!(lights.0[0], before);
        assert!(
            lights.0[1]
                .direction
                .abs_diff_eq(SpotlightSweep::new(1).direction_at(3.0), 1e-6)
        );
    }
}

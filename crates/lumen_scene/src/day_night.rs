use flecs_ecs::prelude::*;
use glam::Vec3;

use crate::light::Light;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

/// Pairs two lights so that exactly one of them is lit at a time, together
/// with the sky colour that goes with each phase.
#[derive(Component, Clone, Debug)]
pub struct DayNight {
    pub phase: DayPhase,
    pub day_light: usize,
    pub night_light: usize,
    pub day_sky: Vec3,
    pub night_sky: Vec3,
}

impl DayNight {
    pub fn new(day_light: usize, night_light: usize, day_sky: Vec3, night_sky: Vec3) -> Self {
        debug_assert_ne!(day_light, night_light, "day and night need distinct lights");

        Self {
            phase: DayPhase::Day,
            day_light,
            night_light,
            day_sky,
            night_sky,
        }
    }

    pub fn is_day(&self) -> bool {
        self.phase == DayPhase::Day
    }

    pub fn sky_color(&self) -> Vec3 {
        match self.phase {
            DayPhase::Day => self.day_sky,
            DayPhase::Night => self.night_sky,
        }
    }

    /// Enables the light of the current phase and disables the other one.
    /// Any other light is left alone.
    pub fn apply(&self, lights: &mut [Light]) {
        let is_day = self.is_day();

        if let Some(light) = lights.get_mut(self.day_light) {
            light.enabled = is_day;
        }
        if let Some(light) = lights.get_mut(self.night_light) {
            light.enabled = !is_day;
        }
    }

    /// Switches phase and returns the new background colour.
    pub fn toggle(&mut self, lights: &mut [Light]) -> Vec3 {
        self.phase = match self.phase {
            DayPhase::Day => DayPhase::Night,
            DayPhase::Night => DayPhase::Day,
        };
        self.apply(lights);
        self.sky_color()
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::color::from_hex;

    use super::*;

    fn rig() -> (DayNight, Vec<Light>) {
        let day_sky = from_hex(0xEDFAFD);
        let night_sky = from_hex(0x070B34);
        let lights = vec![
            Light::directional(Vec3::new(-1.0, -1.0, -1.0), day_sky),
            Light::point(Vec3::new(10.0, 0.0, 3.0), Vec3::splat(200.0)),
            Light::spot(Vec3::ZERO, Vec3::X, Vec3::splat(3.0)),
        ];
        (DayNight::new(0, 1, day_sky, night_sky), lights)
    }

    fn lit_pair(day_night: &DayNight, lights: &[Light]) -> (bool, bool) {
        (
            lights[day_night.day_light].enabled,
            lights[day_night.night_light].enabled,
        )
    }

    #[test]
    fn toggling_always_leaves_exactly_one_of_the_pair_lit() {
        // Start from every possible (mis)configuration of the pair.
        for (day_on, night_on) in [(true, true), (true, false), (false, true), (false, false)] {
            let (mut day_night, mut lights) = rig();
            lights[0].enabled = day_on;
            lights[1].enabled = night_on;

            for _ in 0..5 {
                day_night.toggle(&mut lights);
                let (day, night) = lit_pair(&day_night, &lights);
                assert!(day ^ night, "pair must be mutually exclusive");
                assert_eq!(day, day_night.is_day());
            }
        }
    }

    #[test]
    fn toggle_changes_the_sky() {
        let (mut day_night, mut lights) = rig();

        let night = day_night.toggle(&mut lights);
        assert_eq!(night, from_hex(0x070B34));
        assert_eq!(day_night.phase, DayPhase::Night);

        let day = day_night.toggle(&mut lights);
        assert_eq!(day, from_hex(0xEDFAFD));
    }

    #[test]
    fn third_light_keeps_its_own_state() {
        let (mut day_night, mut lights) = rig();
        lights[2].enabled = false;

        day_night.toggle(&mut lights);
        assert!(!lights[2].enabled);

        lights[2].enabled = true;
        day_night.toggle(&mut lights);
        assert!(lights[2].enabled);
    }

    #[test]
    fn missing_light_indices_are_ignored() {
        let (_, mut lights) = rig();
        let mut day_night = DayNight::new(0, 9, Vec3::ONE, Vec3::ZERO);

        day_night.toggle(&mut lights);

        assert!(!lights[0].enabled);
        assert_eq!(lights.len(), 3);
    }
}

use std::time::{Duration, Instant};

use flecs_ecs::prelude::*;

/// Weight of the newest frame in the smoothed frame time.
const SMOOTHING: f32 = 1.0 / 60.0;

#[derive(Component, Clone, Debug)]
pub struct Time {
    last_update: Instant,
    delta: Duration,
    elapsed: Duration,
    smoothed_delta: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            smoothed_delta: 1.0 / 60.0,
        }
    }
}

impl Time {
    /// Called by the engine loop once per frame
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_update;
        self.last_update = now;
        self.advance(delta);
    }

    /// Moves the clock forward by a fixed step.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.smoothed_delta =
            self.smoothed_delta * (1.0 - SMOOTHING) + delta.as_secs_f32() * SMOOTHING;
    }

    /// Returns time in seconds since last frame (e.g., 0.016 for 60fps)
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Returns total time since app started
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Moving average of the frame time, in seconds.
    pub fn smoothed_delta_seconds(&self) -> f32 {
        self.smoothed_delta
    }

    pub fn frames_per_second(&self) -> f32 {
        if self.smoothed_delta > 0.0 {
            1.0 / self.smoothed_delta
        } else {
            0.0
        }
    }
}

use flecs_ecs::prelude::*;
use glam::{Mat4, Vec3};

use crate::transform::Transform;

#[derive(Component, Clone, Debug)]
pub struct Camera {
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 45.0f32.to_radians(),
            aspect_ratio: 16.0 / 9.0, // Standard monitor
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Computes the "Projection Matrix" (View -> Clip)
    pub fn compute_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Computes the "View Matrix" (World -> View) for a camera placed at `transform`.
    /// The camera looks down its local -Z.
    pub fn compute_view_matrix(transform: &Transform) -> Mat4 {
        let eye = transform.translation;
        Mat4::look_at_rh(eye, eye + transform.forward(), transform.up())
    }

    pub fn compute_view_projection(&self, transform: &Transform) -> Mat4 {
        self.compute_projection_matrix() * Self::compute_view_matrix(transform)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }
}

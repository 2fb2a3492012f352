use flecs_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    // --- Matrices ---

    /// Creates the Model Matrix (Local -> World)
    /// This is what we send to the GPU Uniform Buffer
    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// The local origin carried into world space.
    pub fn world_position(&self) -> Vec3 {
        self.compute_matrix().transform_point3(Vec3::ZERO)
    }

    // --- Directions ---

    /// Returns the "Forward" direction (-Z) relative to current rotation
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Returns the "Right" direction (+X) relative to current rotation
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Returns the "Up" direction (+Y) relative to current rotation
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn world_position_ignores_rotation_and_scale() {
        let transform = Transform {
            translation: Vec3::new(10.0, 0.0, 3.0),
            rotation: Quat::from_rotation_z(1.3),
            scale: Vec3::splat(4.0),
        };

        assert!(transform.world_position().abs_diff_eq(Vec3::new(10.0, 0.0, 3.0), 1e-5));
    }

    #[test]
    fn directions_follow_rotation() {
        let transform = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));

        assert!(transform.forward().abs_diff_eq(-Vec3::X, 1e-5));
        assert!(transform.right().abs_diff_eq(-Vec3::Z, 1e-5));
        assert!(transform.up().abs_diff_eq(Vec3::Y, 1e-5));
    }
}

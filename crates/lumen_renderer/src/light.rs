use glam::Vec3;
use lumen_scene::Light;

/// Size of the light array in the shaders. Lights beyond it are not uploaded.
pub const MAX_LIGHTS: usize = 3;

// Mirrors `Light` in common.wgsl: every vec3 is padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 3],
    pub kind: u32,
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub diffuse: [f32; 3],
    pub _pad1: f32,
    pub specular: [f32; 3],
    pub _pad2: f32,
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        Self {
            position: light.world_position().to_array(),
            kind: light.kind.shader_code(),
            direction: light.direction.to_array(),
            _pad0: 0.0,
            diffuse: light.diffuse.to_array(),
            _pad1: 0.0,
            specular: light.specular.to_array(),
            _pad2: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    pub lights: [GpuLight; MAX_LIGHTS],
    pub camera_position: [f32; 3],
    pub num_lights: u32,
}

/// Packs the enabled lights, in collection order, into the uniform block.
///
/// Disabled lights do not take a slot. Once `MAX_LIGHTS` slots are filled the
/// remaining lights are dropped, and unused slots stay zeroed.
pub fn pack_lights<'a>(
    lights: impl IntoIterator<Item = &'a Light>,
    camera_position: Vec3,
) -> LightUniforms {
    let mut uniforms: LightUniforms = bytemuck::Zeroable::zeroed();
    uniforms.camera_position = camera_position.to_array();

    let enabled = lights.into_iter().filter(|light| light.enabled);
    for (slot, light) in uniforms.lights.iter_mut().zip(enabled) {
        *slot = GpuLight::from(light);
        uniforms.num_lights += 1;
    }

    uniforms
}

#[cfg(test)]
mod tests {
    use bytemuck::Zeroable;
    use glam::Quat;
    use lumen_core::transform::Transform;

    use super::*;

    fn point(x: f32) -> Light {
        Light::point(Vec3::new(x, 0.0, 0.0), Vec3::ONE)
    }

    #[test]
    fn gpu_layout_matches_the_shader() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 64);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 64 * MAX_LIGHTS + 16);
    }

    #[test]
    fn never_uploads_more_than_the_array_holds() {
        let lights: Vec<Light> = (0..5).map(|i| point(i as f32)).collect();

        let uniforms = pack_lights(&lights, Vec3::ZERO);

        assert_eq!(uniforms.num_lights as usize, MAX_LIGHTS);
        let xs: Vec<f32> = uniforms.lights.iter().map(|l| l.position[0]).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn disabled_lights_do_not_take_a_slot() {
        let lights = vec![
            point(0.0).with_enabled(false),
            point(1.0),
            point(2.0).with_enabled(false),
            point(3.0),
        ];

        let uniforms = pack_lights(&lights, Vec3::ZERO);

        assert_eq!(uniforms.num_lights, 2);
        assert_eq!(uniforms.lights[0].position[0], 1.0);
        assert_eq!(uniforms.lights[1].position[0], 3.0);
        assert_eq!(uniforms.lights[2], GpuLight::zeroed());
    }

    #[test]
    fn no_enabled_lights_uploads_an_empty_array() {
        let lights = vec![point(0.0).with_enabled(false)];

        let uniforms = pack_lights(&lights, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(uniforms.num_lights, 0);
        assert_eq!(uniforms.camera_position, [1.0, 2.0, 3.0]);
        assert!(uniforms.lights.iter().all(|l| *l == GpuLight::zeroed()));
    }

    #[test]
    fn position_comes_from_the_pose() {
        let mut light = point(0.0);
        light.pose = Transform::from_xyz(4.0, 5.0, 6.0).with_scale(Vec3::splat(3.0));
        light.pose.rotation = Quat::from_rotation_z(1.0);

        let uniforms = pack_lights([&light], Vec3::ZERO);

        assert_eq!(uniforms.lights[0].position, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn colours_pass_through_unclamped() {
        let mut light = Light::spot(Vec3::ZERO, Vec3::NEG_Z, Vec3::splat(200.0));
        light.specular = Vec3::new(-1.0, 0.5, 2.0);

        let uniforms = pack_lights([&light], Vec3::ZERO);
        let packed = uniforms.lights[0];

        assert_eq!(packed.kind, 3);
        assert_eq!(packed.diffuse, [200.0; 3]);
        assert_eq!(packed.specular, [-1.0, 0.5, 2.0]);
        assert_eq!(packed.direction, [0.0, 0.0, -1.0]);
    }
}

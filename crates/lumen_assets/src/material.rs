use glam::Vec3;

/// Which GPU program draws a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShadingModel {
    Phong,
    Toon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSettings {
    pub ambient_reflectance: Vec3,
    pub diffuse_reflectance: Vec3,
    pub specular_reflectance: Vec3,
    pub shininess: f32,
    pub fog_density: f32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            ambient_reflectance: Vec3::splat(0.1),
            diffuse_reflectance: Vec3::ONE,
            specular_reflectance: Vec3::ONE,
            shininess: 32.0,
            fog_density: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialData {
    pub shading: ShadingModel,
    pub settings: MaterialSettings,
}

impl MaterialData {
    pub fn phong(settings: MaterialSettings) -> Self {
        Self {
            shading: ShadingModel::Phong,
            settings,
        }
    }

    pub fn toon(settings: MaterialSettings) -> Self {
        Self {
            shading: ShadingModel::Toon,
            settings,
        }
    }
}

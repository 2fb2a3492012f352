use flecs_ecs::prelude::*;
use lumen_assets::{MaterialData, MeshData};
use lumen_core::assets::Handle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingStyle {
    Phong,
    Toon,
}

/// The two pre-built materials every render object switches between.
#[derive(Component, Clone, Debug)]
pub struct Shading {
    pub style: ShadingStyle,
    pub phong: Handle<MaterialData>,
    pub toon: Handle<MaterialData>,
}

impl Shading {
    pub fn new(phong: Handle<MaterialData>, toon: Handle<MaterialData>) -> Self {
        Self {
            style: ShadingStyle::Phong,
            phong,
            toon,
        }
    }

    pub fn active_material(&self) -> Handle<MaterialData> {
        match self.style {
            ShadingStyle::Phong => self.phong,
            ShadingStyle::Toon => self.toon,
        }
    }

    /// Switches style and returns the material objects should now use.
    pub fn toggle(&mut self) -> Handle<MaterialData> {
        self.style = match self.style {
            ShadingStyle::Phong => ShadingStyle::Toon,
            ShadingStyle::Toon => ShadingStyle::Phong,
        };
        self.active_material()
    }
}

/// Something the renderer draws: a mesh and the material it is drawn with.
/// The entity also carries a `Transform`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RenderObject {
    pub mesh: Handle<MeshData>,
    pub material: Handle<MaterialData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_phong() {
        let shading = Shading::new(Handle::new(0), Handle::new(1));

        assert_eq!(shading.style, ShadingStyle::Phong);
        assert_eq!(shading.active_material(), Handle::new(0));
    }

    #[test]
    fn toggle_alternates_between_the_two_materials() {
        let mut shading = Shading::new(Handle::new(0), Handle::new(1));

        assert_eq!(shading.toggle(), Handle::new(1));
        assert_eq!(shading.style, ShadingStyle::Toon);
        assert_eq!(shading.toggle(), Handle::new(0));
        assert_eq!(shading.style, ShadingStyle::Phong);
    }
}

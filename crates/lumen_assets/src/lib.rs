use flecs_ecs::prelude::*;
use lumen_core::{App, Plugin, assets::Assets};

pub mod error;
pub mod material;
pub mod mesh;

pub use error::AssetError;
pub use material::{MaterialData, MaterialSettings, ShadingModel};
pub use mesh::{MeshData, Vertex};

/// Every mesh loaded at start-up, addressed by `Handle<MeshData>`.
#[derive(Component, Default)]
pub struct MeshStore(pub Assets<MeshData>);

/// Every material built at start-up, addressed by `Handle<MaterialData>`.
#[derive(Component, Default)]
pub struct MaterialStore(pub Assets<MaterialData>);

pub struct AssetPlugin;

impl Plugin for AssetPlugin {
    fn build(&self, app: &mut App) {
        app.world
            .component::<MeshStore>()
            .add_trait::<flecs::Singleton>();
        app.world.set(MeshStore::default());

        app.world
            .component::<MaterialStore>()
            .add_trait::<flecs::Singleton>();
        app.world.set(MaterialStore::default());
    }
}

use lumen_core::{App, Plugin};

pub mod error;
pub mod global_resources;
pub mod light;
pub mod material;
pub mod mesh;
pub mod programs;
pub mod render;
pub mod texture;

pub use error::RenderError;
pub use light::{GpuLight, LightUniforms, MAX_LIGHTS, pack_lights};
pub use render::{RenderContext, RenderTarget};

/// Draws every `RenderObject` with the enabled scene lights each frame.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        render::register_renderings(app);
    }
}

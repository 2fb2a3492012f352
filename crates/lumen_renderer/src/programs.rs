pub mod lit_program;

pub use lit_program::{LitDraw, LitProgram};

/// Holds common WGPU references to simplify function signatures.
pub struct GpuProgramRenderContext<'a> {
    pub device: &'a wgpu::Device,
    pub format: wgpu::TextureFormat,
}

/// Bind group layouts every program in the renderer agrees on.
#[derive(Clone)]
pub struct ProgramLayouts {
    pub global: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
    pub mesh: wgpu::BindGroupLayout,
}

pub trait GpuProgram {
    /// Data required to build the pipeline.
    type InitData;

    /// Data required to record one draw.
    type DrawData<'a>
    where
        Self: 'a;

    /// Compiles shaders, creates the pipeline layout and the pipeline itself.
    fn new(ctx: &GpuProgramRenderContext, init_data: &Self::InitData) -> Self;

    /// Encodes commands into the render pass.
    fn record<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, data: Self::DrawData<'a>);
}

use lumen_assets::ShadingModel;
use wgpu::RenderPipeline;

use crate::{
    light::MAX_LIGHTS,
    material::GpuMaterial,
    mesh::{GpuGeometry, MeshInstance, Vertex},
    programs::{GpuProgram, GpuProgramRenderContext, ProgramLayouts},
    texture::DepthTexture,
};

const COMMON_WGSL: &str = include_str!("common.wgsl");
const PHONG_WGSL: &str = include_str!("phong.wgsl");
const TOON_WGSL: &str = include_str!("toon.wgsl");

/// Full WGSL source for one shading model: the light array size, the shared
/// declarations, then the model's fragment stage.
pub fn shader_source(shading: ShadingModel) -> String {
    let fragment = match shading {
        ShadingModel::Phong => PHONG_WGSL,
        ShadingModel::Toon => TOON_WGSL,
    };
    format!("const MAX_LIGHTS: u32 = {MAX_LIGHTS}u;\n{COMMON_WGSL}\n{fragment}")
}

/// A lit, depth-tested mesh pipeline. Built once per shading model at start-up;
/// switching material never rebuilds it.
pub struct LitProgram {
    pub shading: ShadingModel,
    pipeline: RenderPipeline,
}

pub struct LitDraw<'a> {
    pub global: &'a wgpu::BindGroup,
    pub geometry: &'a GpuGeometry,
    pub material: &'a GpuMaterial,
    pub instance: &'a MeshInstance,
}

impl GpuProgram for LitProgram {
    type InitData = (ProgramLayouts, ShadingModel);
    type DrawData<'a> = LitDraw<'a>;

    fn new(ctx: &GpuProgramRenderContext, (layouts, shading): &Self::InitData) -> Self {
        let label = match shading {
            ShadingModel::Phong => "Phong",
            ShadingModel::Toon => "Toon",
        };

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(shader_source(*shading).into()),
            });

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Lit Pipeline Layout"),
                // 0: camera + lights, 1: material, 2: mesh
                bind_group_layouts: &[&layouts.global, &layouts.material, &layouts.mesh],
                push_constant_ranges: &[],
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                cache: None,
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::desc()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        Self {
            shading: *shading,
            pipeline,
        }
    }

    fn record<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, draw: Self::DrawData<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, draw.global, &[]);
        render_pass.set_bind_group(1, &draw.material.bind_group, &[]);
        render_pass.set_bind_group(2, &draw.instance.bind_group, &[]);

        render_pass.set_vertex_buffer(0, draw.geometry.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            draw.geometry.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..draw.geometry.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;
    use crate::{
        light::{GpuLight, LightUniforms},
        material::GpuMaterialUniform,
        mesh::MeshUniform,
    };

    fn validated(shading: ShadingModel) -> naga::Module {
        let source = shader_source(shading);
        let module = naga::front::wgsl::parse_str(&source)
            .unwrap_or_else(|e| panic!("{shading:?} shader: {}", e.emit_to_string(&source)));

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{shading:?} shader is invalid: {e:?}"));

        module
    }

    fn struct_size(module: &naga::Module, name: &str) -> usize {
        let (_, ty) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("no struct {name}"));

        match ty.inner {
            naga::TypeInner::Struct { span, .. } => span as usize,
            _ => panic!("{name} is not a struct"),
        }
    }

    #[test]
    fn both_shading_models_compile() {
        validated(ShadingModel::Phong);
        validated(ShadingModel::Toon);
    }

    #[test]
    fn uniform_blocks_match_the_rust_layouts() {
        let module = validated(ShadingModel::Phong);

        assert_eq!(struct_size(&module, "Light"), size_of::<GpuLight>());
        assert_eq!(struct_size(&module, "LightUniforms"), size_of::<LightUniforms>());
        assert_eq!(struct_size(&module, "MaterialUniform"), size_of::<GpuMaterialUniform>());
        assert_eq!(struct_size(&module, "MeshUniform"), size_of::<MeshUniform>());
    }

    #[test]
    fn light_array_size_is_injected() {
        assert!(shader_source(ShadingModel::Toon)
            .starts_with(&format!("const MAX_LIGHTS: u32 = {MAX_LIGHTS}u;")));
    }
}

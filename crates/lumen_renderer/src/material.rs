use glam::Vec3;
use lumen_assets::{MaterialData, MaterialSettings, ShadingModel};
use wgpu::util::DeviceExt;

// Mirrors `MaterialUniform` in common.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuMaterialUniform {
    pub ambient_reflectance: [f32; 3],
    pub shininess: f32,
    pub diffuse_reflectance: [f32; 3],
    pub fog_density: f32,
    pub specular_reflectance: [f32; 3],
    pub _pad0: f32,
    pub fog_color: [f32; 3],
    pub _pad1: f32,
}

impl From<&MaterialSettings> for GpuMaterialUniform {
    fn from(s: &MaterialSettings) -> Self {
        Self {
            ambient_reflectance: s.ambient_reflectance.to_array(),
            shininess: s.shininess,
            diffuse_reflectance: s.diffuse_reflectance.to_array(),
            fog_density: s.fog_density,
            specular_reflectance: s.specular_reflectance.to_array(),
            _pad0: 0.0,
            fog_color: [0.0; 3],
            _pad1: 0.0,
        }
    }
}

/// CPU copy of a material's uniform block. Setters only mark the block dirty
/// when the value actually changes.
#[derive(Clone, Debug)]
pub struct MaterialParams {
    uniform: GpuMaterialUniform,
    dirty: bool,
}

impl MaterialParams {
    pub fn new(settings: &MaterialSettings) -> Self {
        Self {
            uniform: GpuMaterialUniform::from(settings),
            dirty: true,
        }
    }

    pub fn uniform(&self) -> &GpuMaterialUniform {
        &self.uniform
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_ambient_reflectance(&mut self, color: Vec3) {
        Self::assign(&mut self.uniform.ambient_reflectance, color.to_array(), &mut self.dirty);
    }

    pub fn set_diffuse_reflectance(&mut self, color: Vec3) {
        Self::assign(&mut self.uniform.diffuse_reflectance, color.to_array(), &mut self.dirty);
    }

    pub fn set_specular_reflectance(&mut self, color: Vec3) {
        Self::assign(&mut self.uniform.specular_reflectance, color.to_array(), &mut self.dirty);
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        Self::assign(&mut self.uniform.shininess, shininess, &mut self.dirty);
    }

    pub fn set_fog_color(&mut self, color: Vec3) {
        Self::assign(&mut self.uniform.fog_color, color.to_array(), &mut self.dirty);
    }

    pub fn set_fog_density(&mut self, density: f32) {
        Self::assign(&mut self.uniform.fog_density, density, &mut self.dirty);
    }

    fn assign<T: PartialEq>(slot: &mut T, value: T, dirty: &mut bool) {
        if *slot != value {
            *slot = value;
            *dirty = true;
        }
    }

    fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Group 1: one uniform buffer per material.
pub struct GpuMaterial {
    pub shading: ShadingModel,
    pub params: MaterialParams,
    pub bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
}

impl GpuMaterial {
    pub fn create_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, data: &MaterialData) -> Self {
        let params = MaterialParams::new(&data.settings);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Uniforms"),
            contents: bytemuck::bytes_of(params.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            shading: data.shading,
            params,
            bind_group,
            buffer,
        }
    }

    /// Writes the uniform block if any setter changed it since the last upload.
    pub fn upload(&mut self, queue: &wgpu::Queue) {
        if self.params.take_dirty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(self.params.uniform()));
        }
    }
}

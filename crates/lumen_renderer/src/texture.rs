use wgpu::{
    Device, Extent3d, SurfaceConfiguration, TextureDescriptor, TextureDimension, TextureFormat,
    TextureUsages,
};

pub struct DepthTexture;

impl DepthTexture {
    pub const FORMAT: TextureFormat = TextureFormat::Depth32Float;

    /// Depth buffer matching the surface size. Recreate it whenever the
    /// surface is reconfigured.
    pub fn create(device: &Device, config: &SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Depth Texture"),
            size: Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: Self::FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

use std::collections::HashMap;

use flecs_ecs::prelude::*;
use glam::{Mat4, Vec3};
use lumen_assets::{MaterialData, MaterialStore, MeshData, MeshStore, ShadingModel};
use lumen_core::{
    App, AppExit, ClearColor,
    assets::Handle,
    camera::Camera,
    pipeline::{PhasePresent, PhaseRender3D},
    transform::Transform,
};
use lumen_scene::{RenderObject, SceneLights};
use lumen_window::{MainWindow, WindowSize};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::{
    error::RenderError,
    global_resources::GlobalResources,
    light::pack_lights,
    material::GpuMaterial,
    mesh::{GpuGeometry, MeshInstance},
    programs::{GpuProgram, GpuProgramRenderContext, LitDraw, LitProgram, ProgramLayouts},
    texture::DepthTexture,
};

/// One object to draw this frame.
pub struct FrameDraw {
    pub mesh: Handle<MeshData>,
    pub material: Handle<MaterialData>,
    pub model: Mat4,
}

/// Per-frame values shared by every draw.
pub struct FrameState {
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    pub clear_color: Vec3,
}

#[derive(Component)]
pub struct RenderContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub config: SurfaceConfiguration,
    depth_texture: wgpu::TextureView,

    global_resources: GlobalResources,
    layouts: ProgramLayouts,

    // Both programs are built up front so a material switch never compiles anything.
    phong_program: LitProgram,
    toon_program: LitProgram,

    meshes: HashMap<Handle<MeshData>, GpuGeometry>,
    materials: HashMap<Handle<MaterialData>, GpuMaterial>,
    instances: Vec<MeshInstance>,
}

impl RenderContext {
    pub fn new(window: &MainWindow) -> Result<Self, RenderError> {
        log::info!("Initializing GPU");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.0.clone())?;

        // `pollster` blocks on the async adapter/device requests inside a sync system.
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))?;

        let size = window.0.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_texture = DepthTexture::create(&device, &config);
        let global_resources = GlobalResources::new(&device);
        let layouts = ProgramLayouts {
            global: global_resources.layout.clone(),
            material: GpuMaterial::create_layout(&device),
            mesh: MeshInstance::create_layout(&device),
        };

        let program_context = GpuProgramRenderContext {
            device: &device,
            format,
        };
        let phong_program =
            LitProgram::new(&program_context, &(layouts.clone(), ShadingModel::Phong));
        let toon_program = LitProgram::new(&program_context, &(layouts.clone(), ShadingModel::Toon));

        log::info!(
            "Renderer ready: {:?} surface, {}x{}",
            format,
            config.width,
            config.height
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_texture,
            global_resources,
            layouts,
            phong_program,
            toon_program,
            meshes: HashMap::new(),
            materials: HashMap::new(),
            instances: Vec::new(),
        })
    }

    /// Reconfigures the surface when the window size changed. Zero sizes
    /// (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.config.width && height == self.config.height)
        {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = DepthTexture::create(&self.device, &self.config);
        log::debug!("Surface resized to {width}x{height}");
    }

    /// Returns `None` when no frame can be drawn this time round. A lost or
    /// outdated surface is reconfigured for the next attempt.
    pub fn acquire_frame(&mut self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(err) => {
                log::warn!("Skipping frame: {err}");
                None
            }
        }
    }

    /// Uploads every mesh and material that has no GPU copy yet.
    pub fn prepare_assets(&mut self, meshes: &MeshStore, materials: &MaterialStore) {
        for (handle, mesh) in meshes.0.iter() {
            self.meshes.entry(handle).or_insert_with(|| {
                log::debug!("Uploading mesh {} ({} triangles)", handle.id, mesh.triangle_count());
                GpuGeometry::new(&self.device, mesh)
            });
        }

        for (handle, material) in materials.0.iter() {
            self.materials.entry(handle).or_insert_with(|| {
                log::debug!("Uploading {:?} material {}", material.shading, handle.id);
                GpuMaterial::new(&self.device, &self.layouts.material, material)
            });
        }
    }

    fn program(&self, shading: ShadingModel) -> &LitProgram {
        match shading {
            ShadingModel::Phong => &self.phong_program,
            ShadingModel::Toon => &self.toon_program,
        }
    }

    pub fn draw_frame(
        &mut self,
        view: &wgpu::TextureView,
        frame: &FrameState,
        lights: &SceneLights,
        draws: &[FrameDraw],
    ) {
        let light_uniforms = pack_lights(&lights.0, frame.camera_position);
        self.global_resources.update_camera(&self.queue, frame.view_proj);
        self.global_resources.update_lights(&self.queue, &light_uniforms);

        // Fog fades towards whatever the background currently is.
        for material in self.materials.values_mut() {
            material.params.set_fog_color(frame.clear_color);
            material.upload(&self.queue);
        }

        while self.instances.len() < draws.len() {
            let instance = MeshInstance::new(&self.device, &self.layouts.mesh);
            self.instances.push(instance);
        }
        for (draw, instance) in draws.iter().zip(&self.instances) {
            instance.write(&self.queue, draw.model);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let clear = frame.clear_color.as_dvec3();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x,
                            g: clear.y,
                            b: clear.z,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for (draw, instance) in draws.iter().zip(&self.instances) {
                let (Some(geometry), Some(material)) = (
                    self.meshes.get(&draw.mesh),
                    self.materials.get(&draw.material),
                ) else {
                    continue;
                };

                self.program(material.shading).record(
                    &mut render_pass,
                    LitDraw {
                        global: &self.global_resources.bind_group,
                        geometry,
                        material,
                        instance,
                    },
                );
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// The swapchain image being drawn this frame.
#[derive(Component, Default)]
pub struct RenderTarget {
    pub view: Option<wgpu::TextureView>,
    pub texture: Option<wgpu::SurfaceTexture>,
}

pub fn register_renderings(app: &App) {
    app.world
        .component::<RenderTarget>()
        .add_trait::<flecs::Singleton>();
    app.world.set(RenderTarget::default());
    app.world
        .component::<RenderContext>()
        .add_trait::<flecs::Singleton>();

    app.world
        .system_named::<&MainWindow>("init renderer")
        .kind(flecs::pipeline::OnStart)
        .run(|mut iter| {
            let world = iter.world();
            while iter.next() {
                let windows = iter.field::<MainWindow>(0);
                if let Some(window) = windows.get(0) {
                    match RenderContext::new(window) {
                        Ok(context) => {
                            world.set(context);
                        }
                        Err(err) => {
                            log::error!("Renderer failed to start: {err}");
                            world.get::<&mut AppExit>(|exit| exit.fail(err.to_string()));
                        }
                    }
                }
            }
        });

    app.world
        .system_named::<(&WindowSize, &mut Camera)>("sync camera aspect")
        .kind(flecs::pipeline::PreStore)
        .each(|(size, camera)| {
            camera.set_viewport(size.width, size.height);
        });

    app.world
        .system_named::<(&WindowSize, &mut RenderContext)>("resize surface")
        .kind(flecs::pipeline::PreStore)
        .each(|(size, context)| {
            context.resize(size.width, size.height);
        });

    app.world
        .system_named::<(&mut RenderContext, &mut RenderTarget)>("start frame")
        .kind(flecs::pipeline::PreStore)
        .each(|(context, target)| {
            if let Some(frame) = context.acquire_frame() {
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                target.texture = Some(frame);
                target.view = Some(view);
            }
        });

    app.world
        .system_named::<(&MeshStore, &MaterialStore, &mut RenderContext)>("prepare gpu assets")
        .kind(flecs::pipeline::OnStore)
        .each(|(meshes, materials, context)| {
            context.prepare_assets(meshes, materials);
        });

    let render_objects = app
        .world
        .query::<(&RenderObject, &Transform)>()
        .set_cached()
        .build();

    app.world
        .system_named::<(
            &Camera,
            &Transform,
            &mut RenderContext,
            &RenderTarget,
            &SceneLights,
            &ClearColor,
        )>("render frame")
        .kind(PhaseRender3D)
        .each(
            move |(camera, camera_transform, context, target, lights, clear_color)| {
                let Some(view) = target.view.as_ref() else {
                    return;
                };

                let mut draws = Vec::new();
                render_objects.each(|(object, transform)| {
                    draws.push(FrameDraw {
                        mesh: object.mesh,
                        material: object.material,
                        model: transform.compute_matrix(),
                    });
                });

                let frame = FrameState {
                    view_proj: camera.compute_view_projection(camera_transform),
                    camera_position: camera_transform.world_position(),
                    clear_color: clear_color.0,
                };
                context.draw_frame(view, &frame, lights, &draws);
            },
        );

    app.world
        .system_named::<&mut RenderTarget>("end frame")
        .kind(PhasePresent)
        .each(|target| {
            target.view = None;
            if let Some(frame) = target.texture.take() {
                frame.present();
            }
        });
}

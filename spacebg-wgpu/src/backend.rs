use spacebg_core::config::RendererConfig;
use spacebg_core::uniforms::{AsteroidInstanceRaw, FrameUniforms, LightUniforms, MaterialUniforms};
use spacebg_core::{SpaceScene, Viewport};
use wgpu::util::DeviceExt;

use crate::pipelines;
use crate::targets::FrameTargets;
use crate::RenderError;

/// Owns every GPU resource of the background and draws a `SpaceScene`.
pub struct SpaceRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    targets: FrameTargets,
    encode_srgb: bool,
    clear_color: wgpu::Color,

    star_pipeline: wgpu::RenderPipeline,
    asteroid_pipeline: wgpu::RenderPipeline,
    scene_bind_group: wgpu::BindGroup,
    frame_buffer: wgpu::Buffer,

    star_buffer: wgpu::Buffer,
    star_count: u32,
    mesh_buffer: wgpu::Buffer,
    mesh_vertex_count: u32,
    asteroid_buffer: wgpu::Buffer,
    visible_asteroids: u32,
}

impl<'w> SpaceRenderer<'w> {
    /// Create the surface, device and pipelines and upload the scene's static geometry.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        viewport: Viewport,
        scene: &SpaceScene,
        config: &RendererConfig,
    ) -> Result<Self, RenderError> {
        // Falls back to WebGL2 in browsers without WebGPU.
        let instance = wgpu::util::new_instance_with_webgpu_detection(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        })
        .await;

        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("spacebg Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps.formats).ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = pick_alpha_mode(&caps.alpha_modes, config.transparent);

        let requested_samples = config.sample_count();
        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(requested_samples)
        {
            requested_samples
        } else {
            log::warn!("{requested_samples}x MSAA unsupported for {format:?}, rendering without it");
            1
        };

        let size = clamp_to_limit(viewport, device.limits().max_texture_dimension_2d);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let targets = FrameTargets::new(&device, format, size.width, size.height, sample_count);

        // Uniforms
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let light_uniforms: LightUniforms = scene.lights.uniforms();
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Uniforms"),
            contents: bytemuck::bytes_of(&light_uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let material_uniforms: MaterialUniforms = scene.asteroids.material.uniforms();
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Asteroid Material Uniforms"),
            contents: bytemuck::bytes_of(&material_uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = pipelines::scene_bind_group_layout(&device);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let star_pipeline = pipelines::star_pipeline(&device, &pipeline_layout, format, sample_count);
        let asteroid_pipeline =
            pipelines::asteroid_pipeline(&device, &pipeline_layout, format, sample_count);

        // Static geometry
        let stars = scene.starfield.instances();
        let star_count = stars.len() as u32;
        let star_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Instance Buffer"),
            contents: bytemuck::cast_slice(&non_empty(stars)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mesh = &scene.asteroids.geometry;
        let mesh_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Asteroid Mesh Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let asteroid_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Asteroid Instance Buffer"),
            size: (scene.asteroids.len().max(1) * std::mem::size_of::<AsteroidInstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let info = adapter.get_info();
        log::info!(
            "Renderer initialized: {} ({}), format {:?}, {}x MSAA, {}x{}",
            info.name,
            info.backend.to_str(),
            format,
            sample_count,
            size.width,
            size.height,
        );

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            targets,
            encode_srgb: !format.is_srgb(),
            clear_color: clear_color(config.transparent),
            star_pipeline,
            asteroid_pipeline,
            scene_bind_group,
            frame_buffer,
            star_buffer,
            star_count,
            mesh_buffer,
            mesh_vertex_count: mesh.vertex_count(),
            asteroid_buffer,
            visible_asteroids: 0,
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.surface_config.width, self.surface_config.height)
    }

    /// Asteroids that survived culling in the last rendered frame.
    pub fn visible_asteroids(&self) -> u32 {
        self.visible_asteroids
    }

    /// Resize the surface and recreate the size-dependent targets. Empty sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        let size = clamp_to_limit(viewport, self.device.limits().max_texture_dimension_2d);
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.targets = FrameTargets::new(
            &self.device,
            self.surface_config.format,
            size.width,
            size.height,
            self.targets.sample_count,
        );
        log::debug!("Renderer resized to {}x{}", size.width, size.height);
    }

    /// Draw one frame: asteroids first, then the transparent starfield.
    pub fn render(&mut self, scene: &SpaceScene) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let uniforms = scene.frame_uniforms(self.viewport(), self.encode_srgb);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));

        let visible = scene.asteroids.visible_instances(&scene.frustum());
        if !visible.is_empty() {
            self.queue
                .write_buffer(&self.asteroid_buffer, 0, bytemuck::cast_slice(&visible));
        }
        self.visible_asteroids = visible.len() as u32;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(self.targets.color_attachment(&view, self.clear_color))],
                depth_stencil_attachment: Some(self.targets.depth_attachment()),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.scene_bind_group, &[]);

            if self.visible_asteroids > 0 {
                pass.set_pipeline(&self.asteroid_pipeline);
                pass.set_vertex_buffer(0, self.mesh_buffer.slice(..));
                pass.set_vertex_buffer(1, self.asteroid_buffer.slice(..));
                pass.draw(0..self.mesh_vertex_count, 0..self.visible_asteroids);
            }

            if self.star_count > 0 {
                pass.set_pipeline(&self.star_pipeline);
                pass.set_vertex_buffer(0, self.star_buffer.slice(..));
                pass.draw(0..6, 0..self.star_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Prefer an sRGB format; otherwise the shaders encode sRGB themselves.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode], transparent: bool) -> wgpu::CompositeAlphaMode {
    if transparent && modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        return wgpu::CompositeAlphaMode::PreMultiplied;
    }
    modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

fn clear_color(transparent: bool) -> wgpu::Color {
    if transparent {
        wgpu::Color::TRANSPARENT
    } else {
        wgpu::Color::BLACK
    }
}

fn clamp_to_limit(viewport: Viewport, max_dimension: u32) -> Viewport {
    Viewport::new(
        viewport.width.clamp(1, max_dimension),
        viewport.height.clamp(1, max_dimension),
    )
}

/// wgpu rejects zero-sized vertex buffers; pad with one unused element.
fn non_empty<T: bytemuck::Zeroable>(mut items: Vec<T>) -> Vec<T> {
    if items.is_empty() {
        items.push(T::zeroed());
    }
    items
}

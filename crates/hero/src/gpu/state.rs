use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::animation::HeroState;
use crate::lifecycle::SceneBackend;
use crate::scene::SceneDescription;
use crate::types::Antialiasing;
use crate::viewport::Viewport;

use super::context::GpuContext;
use super::pipeline::{MeshPipeline, DEPTH_FORMAT};
use super::uniforms::SceneUniforms;

struct MultisampleTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MultisampleTarget {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color target"),
            size: extent(size),
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, size: (u32, u32), sample_count: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth target"),
            size: extent(size),
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

fn extent(size: (u32, u32)) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.0.max(1),
        height: size.1.max(1),
        depth_or_array_layers: 1,
    }
}

/// Everything allocated on the device. Dropped as a unit on release.
struct GpuResources {
    context: GpuContext,
    pipeline: MeshPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    multisample: Option<MultisampleTarget>,
    uniforms: SceneUniforms,
}

impl GpuResources {
    fn rebuild_targets(&mut self) {
        let size = self.context.size();
        let sample_count = self.context.sample_count;
        self.depth = DepthTarget::new(&self.context.device, size, sample_count);
        self.multisample = (sample_count > 1).then(|| {
            MultisampleTarget::new(
                &self.context.device,
                self.context.surface_format,
                size,
                sample_count,
            )
        });
    }
}

/// `wgpu` implementation of [`SceneBackend`] rendering into a window surface.
pub struct GpuBackend {
    resources: Option<GpuResources>,
    // Must outlive the surface held by `resources`.
    _window: Arc<Window>,
}

impl GpuBackend {
    pub fn new(
        window: Arc<Window>,
        scene: &SceneDescription,
        viewport: &Viewport,
        antialiasing: Antialiasing,
    ) -> Result<Self> {
        let context = GpuContext::new(window.clone(), viewport.buffer_size(), antialiasing)?;
        let pipeline = MeshPipeline::new(
            &context.device,
            context.surface_format,
            context.sample_count,
        );

        let mesh = scene.knot.build();
        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("knot vertices"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("knot indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let uniforms = SceneUniforms::new(scene);
        let uniform_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scene uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("scene uniform bind group"),
                layout: &pipeline.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let size = context.size();
        let depth = DepthTarget::new(&context.device, size, context.sample_count);
        let multisample = (context.sample_count > 1).then(|| {
            MultisampleTarget::new(
                &context.device,
                context.surface_format,
                size,
                context.sample_count,
            )
        });

        info!(
            adapter = %context.adapter_profile.name,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            sample_count = context.sample_count,
            width = size.0,
            height = size.1,
            "gpu backend ready"
        );

        Ok(Self {
            resources: Some(GpuResources {
                pipeline,
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                uniform_buffer,
                bind_group,
                depth,
                multisample,
                uniforms,
                context,
            }),
            _window: window,
        })
    }

    pub fn is_software_adapter(&self) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|resources| resources.context.adapter_profile.is_software())
    }

    /// Reapplies the current surface configuration after `Lost`/`Outdated`.
    pub fn reconfigure(&self) {
        if let Some(resources) = self.resources.as_ref() {
            resources.context.reconfigure();
        }
    }
}

impl SceneBackend for GpuBackend {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, viewport: &Viewport) {
        let Some(resources) = self.resources.as_mut() else {
            return;
        };
        if resources.context.resize(viewport.buffer_size()) {
            resources.rebuild_targets();
            debug!(size = ?resources.context.size(), "surface reconfigured");
        }
    }

    fn render(&mut self, _scene: &SceneDescription, state: &HeroState) -> Result<(), Self::Error> {
        let Some(resources) = self.resources.as_mut() else {
            return Ok(());
        };

        let frame = resources.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        resources.uniforms.update(state);
        resources.context.queue.write_buffer(
            &resources.uniform_buffer,
            0,
            bytemuck::bytes_of(&resources.uniforms),
        );

        let mut encoder =
            resources
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("hero encoder"),
                });

        {
            let (color_view, resolve_target) = match resources.multisample.as_ref() {
                Some(target) => (&target.view, Some(&view)),
                None => (&view, None),
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &resources.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&resources.pipeline.pipeline);
            pass.set_bind_group(0, &resources.bind_group, &[]);
            pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
            pass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..resources.index_count, 0, 0..1);
        }

        resources.context.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(&mut self) {
        let Some(resources) = self.resources.take() else {
            return;
        };
        resources.vertex_buffer.destroy();
        resources.index_buffer.destroy();
        resources.uniform_buffer.destroy();
        debug!("gpu resources released");
    }
}

//! GPU resources and per-frame drawing for the two quads

use crate::core::config::DemoConfig;
use crate::core::types::Result;
use crate::math::{FrameMatrices, Viewport};
use crate::render::buffer::{OrthoUniforms, PerspectiveUniforms, UniformBuffer};
use crate::render::context::GpuContext;
use crate::render::mesh::QuadMeshes;
use crate::render::pipeline::QuadPipeline;
use crate::render::shader::ShaderSet;
use crate::render::texture::{DepthTexture, ImageTexture};

pub struct DemoRenderer {
    meshes: QuadMeshes,
    #[allow(dead_code)]
    texture: ImageTexture,
    texture_bind_group: wgpu::BindGroup,
    depth: DepthTexture,
    ortho_uniforms: UniformBuffer<OrthoUniforms>,
    perspective_uniforms: UniformBuffer<PerspectiveUniforms>,
    ortho_pipeline: QuadPipeline,
    perspective_pipeline: QuadPipeline,
}

impl DemoRenderer {
    /// Compile shaders, upload the quads and texture and build both pipelines.
    ///
    /// A shader that fails to load or compile is an error; an unreadable
    /// texture is logged and replaced with a black placeholder.
    pub fn new(gpu: &GpuContext, config: &DemoConfig) -> Result<Self> {
        let device = &gpu.device;
        let shaders = ShaderSet::load(device, config)?;

        let meshes = QuadMeshes::new(device);

        let texture = ImageTexture::load_or_placeholder(
            device,
            &gpu.queue,
            &config.texture_path,
            config.flip_texture,
        );
        let (texture_width, texture_height) = texture.size();
        log::info!(
            "Texture {} ({}x{})",
            config.texture_path.display(),
            texture_width,
            texture_height
        );
        let texture_layout = ImageTexture::bind_group_layout(device);
        let texture_bind_group = texture.create_bind_group(device, &texture_layout);

        let ortho_uniforms = UniformBuffer::<OrthoUniforms>::new(device, "ortho_uniforms");
        let perspective_uniforms =
            UniformBuffer::<PerspectiveUniforms>::new(device, "perspective_uniforms");

        let ortho_pipeline = QuadPipeline::new(
            device,
            "ortho_pipeline",
            gpu.format(),
            &shaders.ortho_vertex,
            &shaders.fragment,
            ortho_uniforms.bind_group_layout(),
            &texture_layout,
        );
        let perspective_pipeline = QuadPipeline::new(
            device,
            "perspective_pipeline",
            gpu.format(),
            &shaders.perspective_vertex,
            &shaders.fragment,
            perspective_uniforms.bind_group_layout(),
            &texture_layout,
        );

        let (width, height) = gpu.size();
        let depth = DepthTexture::new(device, width, height);

        Ok(Self {
            meshes,
            texture,
            texture_bind_group,
            depth,
            ortho_uniforms,
            perspective_uniforms,
            ortho_pipeline,
            perspective_pipeline,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Update uniforms for `elapsed` seconds and draw both quads
    pub fn render(&self, gpu: &GpuContext, config: &DemoConfig, elapsed: f32) -> Result<()> {
        let (width, height) = gpu.size();
        let matrices = FrameMatrices::compute(config, Viewport::new(width, height), elapsed);

        self.ortho_uniforms
            .update(&gpu.queue, &OrthoUniforms::new(&matrices.ortho, matrices.time));
        self.perspective_uniforms
            .update(&gpu.queue, &PerspectiveUniforms::new(&matrices.perspective, matrices.time));

        let frame = gpu.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let index_count = self.meshes.index_count();

            // Orthographic first, then perspective; the depth test decides overlap
            self.ortho_pipeline.draw(
                &mut pass,
                self.ortho_uniforms.bind_group(),
                &self.texture_bind_group,
                &self.meshes.ortho,
                &self.meshes.indices,
                index_count,
            );
            self.perspective_pipeline.draw(
                &mut pass,
                self.perspective_uniforms.bind_group(),
                &self.texture_bind_group,
                &self.meshes.perspective,
                &self.meshes.indices,
                index_count,
            );
        }

        gpu.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

//! The scene and its draw step.
//!
//! [`Scene`] owns every GPU resource created at setup: the two pipelines, the
//! four quad meshes, the texture and the camera. All of them are released when
//! the scene is dropped. [`Scene::encode`] records one frame:
//!
//! 1. clear the colour target
//! 2. select the pipeline for the current [`RenderMode`]
//! 3. bind the texture (group 0) and the camera (group 1)
//! 4. draw each quad with its own buffers

use crate::{
    config::Settings,
    context::Viewport,
    data_structures::{
        camera::{CameraResources, CameraUniform},
        quad::{DrawQuad, QUADS, QuadMesh},
    },
    pipelines::Pipelines,
    resources::texture::{SamplingUniform, TextureResources, load_texture_or_blank},
};

/// What the quads are painted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// The texture as the sampler sees it.
    #[default]
    Textured,
    /// One false colour per mip level.
    MipLevels,
}

/// The shader programs the scene compiles at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderProgram {
    Textured,
    MipLevels,
}

impl RenderMode {
    pub fn program(self) -> ShaderProgram {
        match self {
            RenderMode::Textured => ShaderProgram::Textured,
            RenderMode::MipLevels => ShaderProgram::MipLevels,
        }
    }
}

/// Per-frame inputs of the draw step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub mode: RenderMode,
    pub clear_colour: wgpu::Color,
    pub viewport: Viewport,
}

#[derive(Debug)]
pub struct Scene {
    pub pipelines: Pipelines,
    pub quads: Vec<QuadMesh>,
    pub texture: TextureResources,
    pub camera: CameraResources,
}

impl Scene {
    /// Build every GPU resource of the scene for targets of `color_format`.
    ///
    /// Missing shader sources are an error. A missing texture is logged and
    /// replaced by a blank one.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        settings: &Settings,
    ) -> anyhow::Result<Self> {
        let camera = CameraResources::new(
            device,
            CameraUniform::from_settings(&settings.camera, settings.width, settings.height),
        );
        let texture = TextureResources::new(
            device,
            load_texture_or_blank(settings, device, queue),
            SamplingUniform::new(settings.lod_bias, settings.max_anisotropy),
        );
        let pipelines = Pipelines::new(
            device,
            color_format,
            &texture.bind_group_layout,
            &camera.bind_group_layout,
            &settings.assets,
        )?;
        let quads = QuadMesh::upload_all(device, &QUADS);
        log::info!("Uploaded {} quads", quads.len());

        Ok(Self {
            pipelines,
            quads,
            texture,
            camera,
        })
    }

    pub fn pipeline(&self, mode: RenderMode) -> &wgpu::RenderPipeline {
        self.pipelines.get(mode.program())
    }

    /// Issue the draw calls of one frame into an already begun render pass.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, frame: &Frame) {
        if !frame.viewport.is_empty() {
            render_pass.set_viewport(
                0.0,
                0.0,
                frame.viewport.width as f32,
                frame.viewport.height as f32,
                0.0,
                1.0,
            );
        }
        render_pass.set_pipeline(self.pipeline(frame.mode));
        render_pass.set_bind_group(0, &self.texture.bind_group, &[]);
        render_pass.set_bind_group(1, &self.camera.bind_group, &[]);
        for quad in &self.quads {
            log::trace!("Drawing {} ({} indices)", quad.name, quad.num_elements);
            render_pass.draw_quad(quad);
        }
    }

    /// Record a complete frame into `view`: clear, then draw.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(frame.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            ..Default::default()
        });
        self.draw(&mut render_pass, frame);
    }
}

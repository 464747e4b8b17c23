//! Render pipelines.
//!
//! Both programs share the vertex stage and the pipeline layout and differ only
//! in their fragment stage:
//!
//! - `textured` samples the texture with the configured LOD bias
//! - `mip_level` paints each mip level in its own false colour
//! - `basic` holds the pipeline and layout construction both build on

pub mod basic;
pub mod mip_level;
pub mod textured;

use std::path::Path;

use crate::{config::AssetSettings, error::SampleError, render::ShaderProgram};

#[derive(Debug)]
pub struct Pipelines {
    pub textured: wgpu::RenderPipeline,
    pub mip_levels: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Compile both programs from their vertex/fragment source pairs.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        assets: &AssetSettings,
    ) -> Result<Self, SampleError> {
        let dir: &Path = &assets.asset_dir;
        let textured_source =
            crate::resources::load_shader_source(dir, &assets.vertex_shader, &assets.texture_shader)?;
        let mip_level_source = crate::resources::load_shader_source(
            dir,
            &assets.vertex_shader,
            &assets.mip_level_shader,
        )?;

        let layout = basic::mk_quad_pipeline_layout(
            device,
            texture_bind_group_layout,
            camera_bind_group_layout,
        );
        let textured =
            textured::mk_textured_pipeline(device, &layout, color_format, &textured_source);
        let mip_levels =
            mip_level::mk_mip_level_pipeline(device, &layout, color_format, &mip_level_source);
        log::info!("Compiled texture and mip level shader programs");

        Ok(Self {
            textured,
            mip_levels,
        })
    }

    pub fn get(&self, program: ShaderProgram) -> &wgpu::RenderPipeline {
        match program {
            ShaderProgram::Textured => &self.textured,
            ShaderProgram::MipLevels => &self.mip_levels,
        }
    }
}

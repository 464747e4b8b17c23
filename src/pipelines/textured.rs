use crate::pipelines::basic::mk_quad_pipeline;

/**
 * Samples the texture with the configured LOD bias. What you see is what the
 * hardware picked from the mip chain.
 */
pub fn mk_textured_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    source: &str,
) -> wgpu::RenderPipeline {
    mk_quad_pipeline(device, layout, color_format, "Texture Shader", source)
}

use crate::pipelines::basic::mk_quad_pipeline;

/**
 * Replaces the texture colour with a false colour per mip level so that the
 * effect of the LOD bias and of anisotropic filtering becomes visible. The
 * level is estimated in the fragment stage from the screen space derivatives of
 * the texel coordinates, blended between the two nearest levels.
 */
pub fn mk_mip_level_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    source: &str,
) -> wgpu::RenderPipeline {
    mk_quad_pipeline(device, layout, color_format, "Mip Level Shader", source)
}

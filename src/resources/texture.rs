use std::path::Path;

use wgpu::util::DeviceExt;

use crate::{config::Settings, data_structures::texture, resources::load_binary};

/// Sampling parameters the fragment stage applies on top of the sampler.
///
/// wgpu samplers carry no LOD bias, so the bias travels as a uniform and is
/// handed to `textureSampleBias`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SamplingUniform {
    pub lod_bias: f32,
    pub max_anisotropy: f32,
    // Uniforms require 16 byte (4 float) spacing
    _padding: [f32; 2],
}

impl SamplingUniform {
    pub fn new(lod_bias: f32, max_anisotropy: u16) -> Self {
        Self {
            lod_bias,
            max_anisotropy: f32::from(max_anisotropy.max(1)),
            _padding: [0.0; 2],
        }
    }
}

pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

/// The texture, its sampling uniform and the bind group at group 0.
#[derive(Debug)]
pub struct TextureResources {
    pub texture: texture::Texture,
    pub uniform: SamplingUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl TextureResources {
    pub fn new(device: &wgpu::Device, texture: texture::Texture, uniform: SamplingUniform) -> Self {
        let bind_group_layout = texture_layout(device);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sampling Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffer.as_entire_binding(),
                },
            ],
            label: Some("texture_bind_group"),
        });
        Self {
            texture,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

pub fn load_texture(
    asset_dir: &Path,
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    max_anisotropy: u16,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(asset_dir, file_name)?;
    texture::Texture::from_bytes(device, queue, &data, file_name, max_anisotropy)
}

/// Load the scene texture. A missing or broken image is not fatal: the error is
/// logged and a blank texture takes its place.
pub fn load_texture_or_blank(
    settings: &Settings,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    let assets = &settings.assets;
    match load_texture(
        &assets.asset_dir,
        &assets.texture,
        device,
        queue,
        settings.max_anisotropy,
    ) {
        Ok(texture) => {
            log::info!(
                "Loaded {} with {} mip levels",
                assets.texture,
                texture.mip_level_count()
            );
            texture
        }
        Err(e) => {
            log::warn!("Failed to load texture, using a blank one instead: {e:#}");
            texture::Texture::blank(device, queue, settings.max_anisotropy)
        }
    }
}

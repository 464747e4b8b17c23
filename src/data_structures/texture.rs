//! GPU textures with a full mip chain.
//!
//! This module provides [`Texture`], a wrapper around the wgpu texture, its
//! view and its sampler, plus the CPU side mip chain generation used to fill
//! every level. wgpu has no `glGenerateMipmap`, so each level is downsampled
//! with the `image` crate and uploaded individually.

use anyhow::*;
use image::{RgbaImage, imageops::FilterType};

use crate::error::SampleError;

/// Number of levels in a complete mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// Downsample `base` level by level until a 1x1 image is reached.
///
/// The first entry is a copy of `base`. Every following level halves each
/// dimension (rounding down, never below 1) of the previous one.
pub fn build_mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(base.width(), base.height()) as usize;
    let mut levels = Vec::with_capacity(count);
    levels.push(base.clone());
    while levels.len() < count {
        let Some(previous) = levels.last() else {
            break;
        };
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let next = image::imageops::resize(previous, width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

/// Repeat wrapping, trilinear filtering and the given anisotropy.
///
/// wgpu rejects anisotropy above 1 unless all three filters are linear, which
/// they always are here.
pub fn sampler_descriptor(max_anisotropy: u16) -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("Mipmapped sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: max_anisotropy.max(1),
        ..Default::default()
    }
}

/// A GPU texture with a view and its sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Texels reach the shader as stored in the image file, without sRGB decoding.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Decode raw image file contents and upload them with a generated mip chain.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        max_anisotropy: u16,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|source| SampleError::TextureDecode {
            label: label.to_string(),
            source,
        })?;
        Ok(Self::from_image(device, queue, &img, Some(label), max_anisotropy))
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        max_anisotropy: u16,
    ) -> Self {
        let levels = build_mip_chain(&img.to_rgba8());
        Self::from_levels(device, queue, &levels, label, max_anisotropy)
    }

    /// A single 1x1 level of transparent black, used when the real image is missing.
    pub fn blank(device: &wgpu::Device, queue: &wgpu::Queue, max_anisotropy: u16) -> Self {
        let levels = [RgbaImage::new(1, 1)];
        Self::from_levels(device, queue, &levels, Some("blank texture"), max_anisotropy)
    }

    fn from_levels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        levels: &[RgbaImage],
        label: Option<&str>,
        max_anisotropy: u16,
    ) -> Self {
        let (width, height) = levels
            .first()
            .map(|base| base.dimensions())
            .unwrap_or((1, 1));
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: levels.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (level_width, level_height) = level.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
        }
        log::debug!(
            "Uploaded {} ({width}x{height}) with {} mip levels",
            label.unwrap_or("texture"),
            levels.len()
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&sampler_descriptor(max_anisotropy));

        Self {
            texture,
            view,
            sampler,
        }
    }

    pub fn mip_level_count(&self) -> u32 {
        self.texture.mip_level_count()
    }
}

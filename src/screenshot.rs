//! Framebuffer capture.
//!
//! A capture re-renders the current frame into an offscreen target of the
//! surface format, copies it into a mappable staging buffer and writes the
//! pixels as an uncompressed 24-bit bitmap named `screenshot<unix-seconds>.bmp`.
//! Two captures within the same second overwrite each other.
//!
//! wgpu requires every row of a texture-to-buffer copy to start at a multiple
//! of [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`], so the staging buffer is padded
//! and the padding is stripped again while converting to RGB.

use std::{
    iter,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::ensure;
use image::{ImageFormat, RgbImage};

use crate::{
    error::SampleError,
    render::{Frame, Scene},
};

pub const CHANNELS: usize = 3;

pub fn file_name(unix_seconds: u64) -> String {
    format!("screenshot{unix_seconds}.bmp")
}

pub fn unix_seconds_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Bytes per row of a `width` pixel wide copy, rounded up to the copy alignment.
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * bytes_per_pixel).div_ceil(align) * align
}

/// Channel order of a 4 byte per pixel colour format, or `None` if the format
/// can't be turned into RGB by reordering bytes.
fn rgb_offsets(format: wgpu::TextureFormat) -> Option<[usize; 3]> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Some([0, 1, 2]),
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => Some([2, 1, 0]),
        _ => None,
    }
}

/// Strip the row padding off a read back buffer and drop the alpha channel.
///
/// The result holds `width * height * 3` bytes, row-major, top row first.
pub fn rgb_from_padded(
    data: &[u8],
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    format: wgpu::TextureFormat,
) -> Result<Vec<u8>, SampleError> {
    let offsets = rgb_offsets(format).ok_or_else(|| {
        SampleError::CaptureRead(format!("unsupported framebuffer format {format:?}"))
    })?;
    let row_len = width as usize * 4;
    let stride = padded_bytes_per_row as usize;
    if stride < row_len || data.len() < stride * height as usize {
        return Err(SampleError::CaptureRead(format!(
            "read back buffer of {} bytes is too small for {width}x{height} with {stride} bytes per row",
            data.len()
        )));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for row in data.chunks(stride).take(height as usize) {
        for pixel in row[..row_len].chunks_exact(4) {
            rgb.extend(offsets.iter().map(|&offset| pixel[offset]));
        }
    }
    Ok(rgb)
}

/// Write `image` as `screenshot<unix_seconds>.bmp` into `dir`.
pub fn write_bitmap(dir: &Path, unix_seconds: u64, image: &RgbImage) -> Result<PathBuf, SampleError> {
    let path = dir.join(file_name(unix_seconds));
    image
        .save_with_format(&path, ImageFormat::Bmp)
        .map_err(|source| SampleError::CaptureWrite {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Render `frame` offscreen and read the result back as an RGB image of the
/// viewport's size.
pub fn capture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    runtime: &tokio::runtime::Runtime,
    scene: &Scene,
    format: wgpu::TextureFormat,
    frame: &Frame,
) -> anyhow::Result<RgbImage> {
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    ensure!(width > 0 && height > 0, "cannot capture an empty viewport");
    // fail before rendering anything if the format can't be converted
    rgb_offsets(format).ok_or_else(|| {
        SampleError::CaptureRead(format!("unsupported framebuffer format {format:?}"))
    })?;

    let extent3d = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Screenshot Texture"),
        size: extent3d,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let bytes_per_row = padded_bytes_per_row(width, 4);
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Screenshot Buffer"),
        size: (bytes_per_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Screenshot Encoder"),
    });
    scene.encode(&mut encoder, &view, frame);
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent3d,
    );
    queue.submit(iter::once(encoder.finish()));

    let buffer_slice = output_buffer.slice(..);
    let rgb = runtime.block_on(async {
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .map_err(|e| SampleError::CaptureRead(e.to_string()))?;
        rx.receive()
            .await
            .ok_or_else(|| SampleError::CaptureRead("map callback was dropped".to_string()))?
            .map_err(|e| SampleError::CaptureRead(e.to_string()))?;
        let data = buffer_slice.get_mapped_range();
        rgb_from_padded(&data, width, height, bytes_per_row, format)
    })?;
    output_buffer.unmap();

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| SampleError::CaptureRead("captured pixels don't fill the image".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_and_linear_share_channel_order() {
        assert_eq!(
            rgb_offsets(wgpu::TextureFormat::Bgra8UnormSrgb),
            rgb_offsets(wgpu::TextureFormat::Bgra8Unorm)
        );
        assert_eq!(rgb_offsets(wgpu::TextureFormat::Rgba8Unorm), Some([0, 1, 2]));
        assert_eq!(rgb_offsets(wgpu::TextureFormat::R8Unorm), None);
    }
}

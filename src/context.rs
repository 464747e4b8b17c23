//! Window, surface and GPU device.
//!
//! [`Context`] owns everything that is tied to the one window the sample draws
//! into. [`request_device`] is split out so that the scene can also be built
//! against a headless device.

use std::sync::Arc;

use winit::window::Window;

use crate::{config::Settings, error::SampleError};

/// The drawable area in physical pixels. Follows the window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Adopt a new window size. A minimised window reports a zero size, which
    /// is ignored so that the last drawable size is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

pub fn create_instance() -> wgpu::Instance {
    // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    })
}

/// Pick an adapter (compatible with `surface` if one is given) and open a device on it.
pub async fn request_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), SampleError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| SampleError::AdapterUnavailable(e.to_string()))?;
    log::info!("Using adapter {:?}", adapter.get_info());

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("lod-bias device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            ..Default::default()
        })
        .await
        .map_err(|e| SampleError::DeviceRequest(e.to_string()))?;

    Ok((adapter, device, queue))
}

/// Prefer a linear surface format so colours are stored as written: a clear
/// colour of 0.2 lands in the framebuffer as the byte 51. Falls back to the
/// first supported format.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub viewport: Viewport,
    pub clear_colour: wgpu::Color,
    pub is_surface_configured: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> Result<Self, SampleError> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = create_instance();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| SampleError::SurfaceInit(e.to_string()))?;

        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&surface_caps.formats).ok_or_else(|| {
            SampleError::SurfaceInit("the surface supports no texture format".to_string())
        })?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let mut ctx = Self {
            window,
            surface,
            device,
            queue,
            config,
            viewport: Viewport::new(size.width, size.height),
            clear_colour: settings.clear_colour,
            is_surface_configured: false,
        };
        ctx.resize(size.width, size.height);
        Ok(ctx)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Reconfigure the surface for a new window size. The viewport follows
    /// immediately, so the next frame already draws at the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.viewport.resize(width, height) {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.is_surface_configured = true;
            log::debug!("Surface resized to {width}x{height}");
        }
    }
}

//! Scene configuration.
//!
//! The sample takes no command line arguments. Everything that would otherwise
//! be a magic number lives in [`Settings`], whose `Default` implementation is
//! what the binary runs with. Logging is configured separately through
//! `RUST_LOG` (see [`crate::flow::run`]).

use std::path::PathBuf;

use crate::input::ScreenshotTrigger;

/// Fixed camera the view and projection matrices are computed from once.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view.
    pub fovy: cgmath::Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            target: [0.0, 0.0, 0.0],
            fovy: cgmath::Deg(60.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Where the runtime assets are found, relative to `asset_dir`.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetSettings {
    pub asset_dir: PathBuf,
    /// Vertex stage shared by both programs.
    pub vertex_shader: String,
    pub texture_shader: String,
    pub mip_level_shader: String,
    pub texture: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("./").join("assets"),
            vertex_shader: "shaders/quad.wgsl".to_string(),
            texture_shader: "shaders/texture.wgsl".to_string(),
            mip_level_shader: "shaders/miplevel.wgsl".to_string(),
            texture: "textures/squares.png".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub title: String,
    /// Initial window width. Also fixes the projection's aspect ratio.
    pub width: u32,
    /// Initial window height. Also fixes the projection's aspect ratio.
    pub height: u32,
    pub clear_colour: wgpu::Color,
    /// Offset added to the mip level the sampler would pick on its own.
    pub lod_bias: f32,
    pub max_anisotropy: u16,
    pub camera: CameraSettings,
    pub assets: AssetSettings,
    pub screenshot_dir: PathBuf,
    pub screenshot_trigger: ScreenshotTrigger,
}

impl Settings {
    pub const WIDTH: u32 = 1280;
    pub const HEIGHT: u32 = 1024;
    pub const LOD_BIAS: f32 = 1.0;
    pub const MAX_ANISOTROPY: u16 = 8;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "LOD Bias".to_string(),
            width: Self::WIDTH,
            height: Self::HEIGHT,
            clear_colour: wgpu::Color {
                r: 0.2,
                g: 0.3,
                b: 0.3,
                a: 1.0,
            },
            lod_bias: Self::LOD_BIAS,
            max_anisotropy: Self::MAX_ANISOTROPY,
            camera: CameraSettings::default(),
            assets: AssetSettings::default(),
            screenshot_dir: PathBuf::from("."),
            screenshot_trigger: ScreenshotTrigger::default(),
        }
    }
}

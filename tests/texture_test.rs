use image::{Rgba, RgbaImage};
use lod_bias::{
    SampleError,
    data_structures::texture::{build_mip_chain, mip_level_count, sampler_descriptor},
    resources::{load_binary, load_shader_source, texture::SamplingUniform},
};

use crate::common::test_utils::{asset_dir, test_settings};

mod common;

#[test]
fn should_count_levels_down_to_one_pixel() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 2), 2);
    assert_eq!(mip_level_count(512, 512), 10);
    assert_eq!(mip_level_count(640, 480), 10);
    assert_eq!(mip_level_count(1, 300), 9);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn should_halve_every_level() {
    let levels = build_mip_chain(&RgbaImage::new(64, 16));
    let sizes: Vec<_> = levels.iter().map(|l| l.dimensions()).collect();
    assert_eq!(
        sizes,
        vec![(64, 16), (32, 8), (16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]
    );
}

#[test]
fn should_keep_a_solid_colour_on_every_level() {
    let colour = Rgba([200, 40, 90, 255]);
    let levels = build_mip_chain(&RgbaImage::from_pixel(32, 32, colour));
    assert_eq!(levels.len(), 6);
    for level in &levels {
        for pixel in level.pixels() {
            for (got, want) in pixel.0.iter().zip(colour.0) {
                assert!(got.abs_diff(want) <= 1, "{pixel:?} != {colour:?}");
            }
        }
    }
}

#[test]
fn should_filter_trilinearly_with_repeat() {
    let desc = sampler_descriptor(8);
    assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
    assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
    assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.anisotropy_clamp, 8);

    // wgpu rejects an anisotropy clamp of zero
    assert_eq!(sampler_descriptor(0).anisotropy_clamp, 1);
}

#[test]
fn should_pad_the_sampling_uniform_to_sixteen_bytes() {
    assert_eq!(std::mem::size_of::<SamplingUniform>(), 16);
    let uniform = SamplingUniform::new(1.0, 8);
    assert_eq!(uniform.lod_bias, 1.0);
    assert_eq!(uniform.max_anisotropy, 8.0);
}

#[test]
fn should_join_vertex_and_fragment_sources() {
    let assets = test_settings().assets;
    let source =
        load_shader_source(&assets.asset_dir, &assets.vertex_shader, &assets.texture_shader)
            .unwrap();
    let vs = source.find("fn vs_main").expect("vertex entry point missing");
    let fs = source.find("fn fs_main").expect("fragment entry point missing");
    assert!(vs < fs);
    assert!(source.contains("textureSampleBias"));

    let mip_source =
        load_shader_source(&assets.asset_dir, &assets.vertex_shader, &assets.mip_level_shader)
            .unwrap();
    assert!(mip_source.contains("fn vs_main"));
    assert!(mip_source.contains("fn fs_main"));
}

#[test]
fn should_report_the_missing_asset_path() {
    let err = load_shader_source(&asset_dir(), "shaders/quad.wgsl", "shaders/nope.wgsl")
        .unwrap_err();
    match err {
        SampleError::AssetLoad { path, source } => {
            assert!(path.ends_with("shaders/nope.wgsl"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn should_decode_the_bundled_texture_into_a_full_chain() {
    let settings = test_settings();
    let bytes = load_binary(&settings.assets.asset_dir, &settings.assets.texture).unwrap();
    let base = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(base.dimensions(), (512, 512));

    let levels = build_mip_chain(&base);
    assert_eq!(levels.len(), 10);
    assert_eq!(levels.last().unwrap().dimensions(), (1, 1));
}

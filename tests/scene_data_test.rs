use cgmath::{InnerSpace, Matrix4, Vector4};
use lod_bias::{
    RenderMode, ScreenshotTrigger, Settings, ShaderProgram,
    context::{Viewport, pick_surface_format},
    data_structures::{
        Vertex,
        camera::{Camera, CameraUniform, Projection},
        quad::{QUAD_INDICES, QUADS, QuadVertex},
    },
};

mod common;

#[test]
fn should_index_two_triangles_within_the_quad() {
    assert_eq!(QUAD_INDICES.len(), 6);
    assert!(QUAD_INDICES.iter().all(|&i| i < 4));
    // both triangles share the v1-v3 diagonal
    assert_eq!(&QUAD_INDICES[..3], &[0, 1, 3]);
    assert_eq!(&QUAD_INDICES[3..], &[1, 2, 3]);
}

#[test]
fn should_interleave_position_colour_and_tex_coords() {
    let layout = QuadVertex::desc();
    assert_eq!(layout.array_stride, 32);
    assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

    let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
    let locations: Vec<_> = layout.attributes.iter().map(|a| a.shader_location).collect();
    assert_eq!(offsets, vec![0, 12, 24]);
    assert_eq!(locations, vec![0, 1, 2]);
    assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
}

#[test]
fn should_define_four_distinct_quads() {
    assert_eq!(QUADS.len(), 4);
    for (i, a) in QUADS.iter().enumerate() {
        for b in QUADS.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
    // the first quad stretches from in front of the camera to far away
    assert_eq!(QUADS[0][0].position[2], 2.0);
    assert_eq!(QUADS[0][1].position[2], -10.0);
}

#[test]
fn should_share_colours_and_tex_coords_across_quads() {
    for quad in &QUADS {
        let tex_coords: Vec<_> = quad.iter().map(|v| v.tex_coords).collect();
        assert_eq!(tex_coords, vec![[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0]]);
        assert_eq!(quad[0].color, [1.0, 0.0, 0.0]);
        assert_eq!(quad[3].color, [1.0, 1.0, 0.0]);
    }
}

#[test]
fn should_derive_an_upright_camera() {
    let camera = Camera::new([0.0f32, 0.0, 3.0], [0.0, 0.0, 0.0]);
    let up = camera.up();
    assert!((up - cgmath::Vector3::unit_y()).magnitude() < 1e-6);
}

#[test]
fn should_project_the_target_to_the_centre() {
    let uniform = CameraUniform::from_settings(&Settings::default().camera, 1280, 1024);
    let view = Matrix4::from(uniform.view);
    let projection = Matrix4::from(uniform.projection);

    let clip = projection * view * Vector4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5);
    assert!(ndc.y.abs() < 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z), "depth {} outside [0, 1]", ndc.z);
}

#[test]
fn should_use_the_initial_window_aspect() {
    let projection = Projection::new(1280, 1024, cgmath::Deg(60.0), 0.1, 100.0);
    assert!((projection.aspect() - 1.25).abs() < f32::EPSILON);
}

#[test]
fn should_map_modes_to_programs() {
    assert_eq!(RenderMode::default(), RenderMode::Textured);
    assert_eq!(RenderMode::Textured.program(), ShaderProgram::Textured);
    assert_eq!(RenderMode::MipLevels.program(), ShaderProgram::MipLevels);
}

#[test]
fn should_default_to_the_sample_settings() {
    let settings = Settings::default();
    assert_eq!((settings.width, settings.height), (1280, 1024));
    assert_eq!(settings.lod_bias, 1.0);
    assert_eq!(settings.max_anisotropy, 8);
    assert_eq!(settings.screenshot_trigger, ScreenshotTrigger::Edge);
    assert_eq!(settings.clear_colour.r, 0.2);
    assert_eq!(settings.clear_colour.g, 0.3);
    assert_eq!(settings.clear_colour.b, 0.3);
    assert_eq!(settings.assets.texture, "textures/squares.png");
}

#[test]
fn should_keep_the_viewport_when_minimised() {
    let mut viewport = Viewport::new(1280, 1024);
    assert!(!viewport.resize(0, 0));
    assert!(!viewport.resize(800, 0));
    assert_eq!(viewport, Viewport::new(1280, 1024));

    assert!(viewport.resize(800, 600));
    assert_eq!(viewport, Viewport::new(800, 600));
    assert!(!viewport.is_empty());
}

#[test]
fn should_prefer_a_linear_surface_format() {
    use wgpu::TextureFormat::*;

    assert_eq!(pick_surface_format(&[Bgra8UnormSrgb, Bgra8Unorm]), Some(Bgra8Unorm));
    assert_eq!(pick_surface_format(&[Rgba8UnormSrgb, Rgba8Unorm]), Some(Rgba8Unorm));
    // nothing linear on offer
    assert_eq!(pick_surface_format(&[Bgra8UnormSrgb]), Some(Bgra8UnormSrgb));
    assert_eq!(pick_surface_format(&[]), None);
}

#[test]
fn should_upload_texels_without_srgb_decoding() {
    assert_eq!(
        lod_bias::data_structures::texture::Texture::FORMAT,
        wgpu::TextureFormat::Rgba8Unorm
    );
}

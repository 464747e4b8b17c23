/**
 * This module contains all logic for loading shaders and textures from the asset folder.
 */
pub mod texture;

use std::path::{Path, PathBuf};

use crate::error::SampleError;

pub fn asset_path(asset_dir: &Path, file_name: &str) -> PathBuf {
    asset_dir.join(file_name)
}

pub fn load_string(asset_dir: &Path, file_name: &str) -> Result<String, SampleError> {
    let path = asset_path(asset_dir, file_name);
    std::fs::read_to_string(&path).map_err(|source| SampleError::AssetLoad { path, source })
}

pub fn load_binary(asset_dir: &Path, file_name: &str) -> Result<Vec<u8>, SampleError> {
    let path = asset_path(asset_dir, file_name);
    std::fs::read(&path).map_err(|source| SampleError::AssetLoad { path, source })
}

/**
 * A shader program is a vertex and a fragment source file. WGSL has no includes,
 * so both halves are joined into a single module; the fragment half may use the
 * types declared by the vertex half.
 */
pub fn load_shader_source(
    asset_dir: &Path,
    vertex_file: &str,
    fragment_file: &str,
) -> Result<String, SampleError> {
    let vertex = load_string(asset_dir, vertex_file)?;
    let fragment = load_string(asset_dir, fragment_file)?;
    Ok(format!(
        "// {vertex_file}\n{vertex}\n// {fragment_file}\n{fragment}"
    ))
}

//! Errors the sample can run into.
//!
//! Setup code propagates these through `anyhow` with added context; only
//! [`SampleError::SurfaceInit`], [`SampleError::AdapterUnavailable`],
//! [`SampleError::DeviceRequest`] and a missing shader ([`SampleError::AssetLoad`])
//! end the process. Texture and capture failures are logged and the frame loop
//! carries on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to create the window surface: {0}")]
    SurfaceInit(String),

    #[error("no suitable GPU adapter: {0}")]
    AdapterUnavailable(String),

    #[error("failed to acquire a GPU device: {0}")]
    DeviceRequest(String),

    #[error("failed to read asset {}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture {label}")]
    TextureDecode {
        label: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read back the framebuffer: {0}")]
    CaptureRead(String),

    #[error("failed to write screenshot {}", path.display())]
    CaptureWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

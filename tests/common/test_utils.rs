use std::path::PathBuf;

use lod_bias::{
    KeyCode, KeyboardState, ScreenshotTrigger, Session, Settings, config::AssetSettings,
};

/// Drives [`Session::begin_frame`] like the window's redraw handler, counting the
/// frames that actually got drawn and the screenshots that were requested.
pub(crate) struct FrameLoop {
    pub(crate) session: Session,
    pub(crate) keys: KeyboardState,
    frames_drawn: u32,
    screenshots: u32,
}

impl FrameLoop {
    pub fn new(trigger: ScreenshotTrigger) -> Self {
        Self {
            session: Session::new(trigger),
            keys: KeyboardState::new(),
            frames_drawn: 0,
            screenshots: 0,
        }
    }

    /// Run one iteration. Returns `false` once the loop has terminated.
    pub fn step(&mut self) -> bool {
        let Some(capture) = self.session.begin_frame(&mut self.keys) else {
            return false;
        };
        self.frames_drawn += 1;
        if capture {
            self.screenshots += 1;
        }
        true
    }

    pub fn frames_drawn(&self) -> u32 {
        self.frames_drawn
    }

    pub fn screenshots(&self) -> u32 {
        self.screenshots
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(ScreenshotTrigger::default())
    }
}

pub fn held(keys: &[KeyCode]) -> KeyboardState {
    let mut state = KeyboardState::new();
    keys.iter().for_each(|key| state.press(*key));
    state
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lod-bias-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

pub fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Default settings with assets resolved from the crate root instead of the
/// working directory.
pub fn test_settings() -> Settings {
    Settings {
        assets: AssetSettings {
            asset_dir: asset_dir(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(feature = "integration-tests")]
pub(crate) struct Gpu {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
}

/// A device without any surface, or `None` on machines without a usable adapter.
#[cfg(feature = "integration-tests")]
pub(crate) fn headless_gpu() -> Option<Gpu> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");
    let instance = lod_bias::context::create_instance();
    match runtime.block_on(lod_bias::context::request_device(&instance, None)) {
        Ok((_, device, queue)) => Some(Gpu {
            runtime,
            device,
            queue,
        }),
        Err(e) => {
            println!("Skipping GPU test: {e}");
            None
        }
    }
}

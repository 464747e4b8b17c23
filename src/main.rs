//! Press 1 for the textured view, 2 for the mip level visualization, SPACE to
//! save a screenshot of the current viewport and ESC to quit.

use lod_bias::{Settings, flow};

fn main() {
    if let Err(e) = flow::run(Settings::default()) {
        log::error!("{e:#}");
        std::process::exit(-1);
    }
}

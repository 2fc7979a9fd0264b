//! Wavemark demo - segment regions and draggable boundary markers
//!
//! Shows a synthetic three minute waveform with a few segments.
//!
//! ## Command line
//!
//! - `wavemark-demo [SEGMENTS.yaml]`: load segments from a YAML list instead
//!   of the built-in ones

mod app;
mod segments_file;

use std::path::PathBuf;

use iced::{Size, Task};
use wavemark_core::config::{self, SegmentDisplayConfig};

use app::{DemoApp, Message};

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("wavemark-demo starting up");

    iced::application(boot, update, view)
        .title("Wavemark")
        .window_size(Size::new(1000.0, 480.0))
        .run()
}

/// Boot function for iced
fn boot() -> (DemoApp, Task<Message>) {
    let config_path = config::default_config_path();
    let display: SegmentDisplayConfig = config::load_config(&config_path);

    // Write defaults on first run so there is a file to edit
    if !config_path.exists() {
        if let Err(e) = config::save_config(&display, &config_path) {
            log::warn!("Could not write default config: {:#}", e);
        }
    }

    let segments_path = std::env::args().nth(1).map(PathBuf::from);
    (DemoApp::new(display, segments_path.as_deref()), Task::none())
}

/// Update function for iced
fn update(app: &mut DemoApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &DemoApp) -> iced::Element<'_, Message> {
    app.view()
}

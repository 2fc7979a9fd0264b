//! Configuration for segment display
//!
//! Provides the YAML-backed display settings shared by the widgets and the
//! demo application:
//!
//! - Generic YAML config loading/saving
//! - Default config file location
//! - Marker, color and view settings
//!
//! # Usage
//!
//! ```ignore
//! use wavemark_core::config::{default_config_path, load_config, save_config, SegmentDisplayConfig};
//!
//! let path = default_config_path();
//! let config: SegmentDisplayConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod display;
mod io;
mod paths;

pub use display::{ColorConfig, MarkerConfig, SegmentDisplayConfig, ViewConfig};
pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path, CONFIG_FILENAME};

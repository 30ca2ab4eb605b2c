//! Configuration for the observation pod viewer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, InputConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;

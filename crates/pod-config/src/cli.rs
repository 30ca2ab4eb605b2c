//! Command-line arguments for the viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Space observation pod command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "pod-viewer", about = "Space Observation Pod")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Enable or disable vsync.
    #[arg(long)]
    pub vsync: Option<bool>,

    /// Directory containing the texture images.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(vsync) = args.vsync {
            self.window.vsync = vsync;
        }
        if let Some(ref dir) = args.assets {
            self.scene.asset_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

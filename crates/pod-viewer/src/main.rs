//! Space Observation Pod viewer.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p pod-viewer -- --assets path/to/textures`.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use pod_app::PlatformDirs;
use pod_config::{CliArgs, Config, ConfigError};
use tracing::{error, info, warn};

const CONTROLS: &[(&str, &str)] = &[
    ("W/A/S/D", "move"),
    ("Mouse", "look around"),
    ("Space / Left Shift", "move up / down"),
    ("L", "toggle interior light"),
    ("E", "toggle telescope zoom"),
    ("Esc", "exit"),
];

fn log_controls() {
    info!("Controls:");
    for (keys, action) in CONTROLS {
        info!("  {keys:<20} {action}");
    }
}

/// Load `config.ron` from `config_dir` and apply CLI overrides.
///
/// A config that cannot be read or parsed is replaced by defaults; the error
/// is handed back so it can be logged once logging is up.
fn load_config(config_dir: &Path, args: &CliArgs) -> (Config, Option<ConfigError>) {
    let (mut config, failure) = match Config::load_or_create(config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(args);
    (config, failure)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let (config, load_failure) = load_config(&dirs.config_dir, &args);

    pod_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    info!("Space Observation Pod");
    match load_failure {
        None => info!(
            "  config: {}",
            dirs.config_dir.join(pod_config::CONFIG_FILE_NAME).display()
        ),
        Some(e) => warn!("Failed to load config: {e}, using defaults"),
    }
    info!("  assets: {}", config.scene.asset_dir.display());
    log_controls();

    match pod_app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Viewer exited with an error: {e}");
            ExitCode::FAILURE
        }
    }
}

mod cli;
mod error;
mod files;
mod fit;
mod loader;
mod nav;
mod prefs;
mod ui;

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;

use crate::cli::{Cli, DEFAULT_INTERVAL_SECS};
use crate::error::{Result, ViewerError};
use crate::files::{normalize_extensions, scan_images};
use crate::fit::{FitPolicy, parse_hex_color};
use crate::nav::Navigator;
use crate::prefs::Preferences;
use crate::ui::App;
use crate::ui::state::{FIT_POLICY_KEY, ViewerState};

const INTERVAL_KEY: &str = "interval_secs";

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let pad_color =
        parse_hex_color(&cli.pad_color).ok_or_else(|| ViewerError::InvalidColor(cli.pad_color.clone()))?;

    let image_dir = cli.image_dir();
    let extensions = normalize_extensions(&cli.extensions);
    let images = scan_images(&image_dir, &extensions, cli.follow_links)?;

    let prefs_path = cli.prefs_path();
    let prefs = Preferences::load(&prefs_path).unwrap_or_else(|e| {
        log::warn!("{}; continuing without saved preferences (changes will not be written)", e);
        Preferences::fallback(&prefs_path)
    });

    log::debug!("Preferences file: {:?}", prefs.path());

    let fit_policy = cli
        .fit
        .or_else(|| prefs.get_as::<FitPolicy>(FIT_POLICY_KEY))
        .unwrap_or_default();
    let interval_secs = cli
        .interval
        .or_else(|| prefs.get_as::<u64>(INTERVAL_KEY).filter(|&s| s > 0))
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    let seed = if cli.start < images.len() {
        cli.start
    } else {
        log::warn!(
            "Start index {} is past the last image ({}), starting at 0",
            cli.start,
            images.len() - 1
        );
        0
    };

    log::info!(
        "Showing {} images from {:?}, {}s per image, fit {:?}",
        images.len(),
        image_dir,
        interval_secs,
        fit_policy
    );

    let nav = Navigator::new(images.len(), seed);
    let state = ViewerState::new(
        images,
        nav,
        prefs,
        fit_policy,
        pad_color,
        Duration::from_secs(interval_secs),
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(state, LogicalSize::new(cli.width.max(1), cli.height.max(1)));
    event_loop.run_app(&mut app)?;
    Ok(())
}

//! Photo Gallery - terminal front end for the gallery core
//!
//! Main entry point.

mod app;
mod view;

use anyhow::Result;
use gallery_core::{GalleryConfig, GalleryError};
use std::path::PathBuf;

const USAGE: &str = "\
Usage: photo_gallery [OPTIONS]

Options:
  --dir <PATH>        Show images from a directory instead of the samples
  --page-size <N>     Photos per page
  --config <PATH>     Configuration file to use
  -h, --help          Print this help
";

struct Args {
    dir: Option<PathBuf>,
    page_size: Option<usize>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(None);
    }

    let parsed = Args {
        dir: args.opt_value_from_str("--dir")?,
        page_size: args.opt_value_from_str("--page-size")?,
        config: args.opt_value_from_str("--config")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        anyhow::bail!("unexpected arguments: {:?}\n\n{}", rest, USAGE);
    }
    Ok(Some(parsed))
}

/// Fall back to defaults, keeping the load error so it can be logged later
fn or_default(loaded: gallery_core::Result<GalleryConfig>) -> (GalleryConfig, Option<GalleryError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (GalleryConfig::default(), Some(e)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // Load configuration
    let (mut config, config_error) = match &args.config {
        Some(path) => (GalleryConfig::load_from(path)?, None),
        None => or_default(GalleryConfig::load()),
    };
    if let Some(dir) = args.dir {
        config.gallery.library_dir = Some(dir);
    }
    if let Some(page_size) = args.page_size {
        config.gallery.page_size = page_size;
    }
    config.validate()?;

    // Initialize logging and panic hook before anything spawns
    let _log_guard = gallery_log::init(&config.logging.level)?;

    if let Err(e) = gallery_log::cleanup_old_logs(config.logging.retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    if let Some(e) = config_error {
        tracing::warn!(
            "Ignoring unreadable configuration {:?}: {}",
            GalleryConfig::config_path(),
            e
        );
    }

    tracing::info!("Photo Gallery starting...");

    app::run(config).await
}

//! Logging setup
//!
//! Events go to `<data dir>/pagewire.log`. The filter comes from `RUST_LOG`,
//! then `PAGEWIRE_LOGLEVEL`, then [`default_filter`]. Stdout stays free for
//! the document snapshot.

use std::fs::File;
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use tracing_error::ErrorLayer;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Crate at `info`, HTTP plumbing only when it warns
pub fn default_filter() -> String {
    format!("{}=info,reqwest=warn,hyper=warn", env!("CARGO_CRATE_NAME"))
}

fn filter_directives() -> String {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.as_str()))
        .unwrap_or_else(|_| default_filter())
}

pub fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.as_str())
}

pub fn initialize_logging() -> Result<()> {
    let path = log_path();
    if let Some(directory) = path.parent() {
        std::fs::create_dir_all(directory)
            .wrap_err_with(|| format!("creating {}", directory.display()))?;
    }
    let log_file =
        File::create(&path).wrap_err_with(|| format!("creating {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new(filter_directives()));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Log to the console with `console_filter`, and everything down to DEBUG to
/// a timestamped file in `log_dir`. Returns the path of the log file.
pub fn init(console_filter: &str, log_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(format!(
        "scraper_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&path)?;

    let console_filter =
        EnvFilter::try_new(console_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_filter(console_filter);
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(console)
        .with(file_log)
        .init();
    Ok(path)
}

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LoggingSettings, default_log_path};

/// Install the global `tracing` subscriber.
///
/// The terminal belongs to the TUI, so events go to a log file. `RUST_LOG`
/// takes precedence over `logging.level`. When no log file can be opened,
/// events are discarded. Must run before the TUI takes over the terminal.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let path = settings.file.clone().or_else(default_log_path);
    let file = path.and_then(|p| {
        if let Some(parent) = p.parent() {
            let _ = fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(&p).ok()
    });

    let writer = match file {
        Some(f) => BoxMakeWriter::new(Mutex::new(f)),
        None => {
            eprintln!("tapedeck: cannot open log file, logging disabled");
            BoxMakeWriter::new(std::io::sink)
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

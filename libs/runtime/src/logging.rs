use std::{
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use file_rotate::{
    compression::Compression,
    suffix::AppendCount,
    ContentLimit, FileRotate,
};

use crate::config::LoggingConfig;

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendCount>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

fn make_rot_writer(path: &Path, max_size_mb: u64, max_backups: usize) -> RotWriter {
    let rotate = FileRotate::new(
        path,
        AppendCount::new(max_backups.max(1)),
        ContentLimit::Bytes((max_size_mb.max(1) * 1024 * 1024) as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    RotWriter(Arc::new(Mutex::new(rotate)))
}

/// Initialize the global subscriber from config: a console layer, plus a
/// rotating file layer when a file path is configured. Safe to call more
/// than once; later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) {
    let console_level = parse_tracing_level(&config.console_level);
    let file_level = parse_tracing_level(&config.file_level).or(Some(Level::DEBUG));

    let console_layer = console_level.map(|level| {
        fmt::layer()
            .with_target(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level))
    });

    let file_layer = config.file.as_ref().and_then(|file| {
        let path = Path::new(file);
        if let Some(dir) = path.parent() {
            // Best effort; logging must not take the process down.
            let _ = std::fs::create_dir_all(dir);
        }
        let writer = make_rot_writer(
            path,
            config.max_size_mb.unwrap_or(100),
            config.max_backups.unwrap_or(3),
        );
        file_level.map(|level| {
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level))
        })
    });

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

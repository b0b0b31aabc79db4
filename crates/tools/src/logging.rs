use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Errors raised while installing the log sinks.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log file path {0:?} has no file name")]
    InvalidPath(PathBuf),
    #[error("failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Split a log file path into the directory to create and the file name.
fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), LogError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

/// Owns the process-wide log sinks.
///
/// Logs always go to stderr; with a log file configured they are also written
/// through a non-blocking appender. Dropping the context flushes and closes
/// the file sink, so keep it alive for the whole of `main`.
pub struct LogContext {
    log_file: Option<PathBuf>,
    _guard: Option<WorkerGuard>,
}

impl LogContext {
    pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<Self, LogError> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        let (file_layer, guard) = match log_file {
            Some(path) => {
                let (dir, file_name) = split_log_path(path)?;
                std::fs::create_dir_all(&dir).map_err(|source| LogError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
                let appender = tracing_appender::rolling::never(&dir, &file_name);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(|_| LogError::AlreadyInstalled)?;

        if let Some(path) = log_file {
            tracing::info!("logging to {}", path.display());
        }

        Ok(Self {
            log_file: log_file.map(Path::to_path_buf),
            _guard: guard,
        })
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

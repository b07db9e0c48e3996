//! Tracing subscriber setup.

use crate::config::LogFormat;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where and how log lines are written.
#[derive(Debug, Clone, Default)]
pub struct LogOptions<'a> {
    pub level: &'a str,
    pub format: LogFormat,
    /// Daily-rotating file under `log_dir` (default `./logs`) instead of stderr.
    pub to_file: bool,
    pub log_dir: Option<&'a str>,
}

/// Initialize the global tracing subscriber. `RUST_LOG` wins over `level`.
///
/// The returned guard **must be held** for the lifetime of the process when
/// logging to a file, or buffered lines are lost on exit.
pub fn init_logging(opts: &LogOptions<'_>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(opts.level));

    if opts.to_file {
        let dir = opts.log_dir.unwrap_or("./logs");
        let file_appender = tracing_appender::rolling::daily(dir, "chat-relay.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(non_blocking)
            .with_ansi(false);
        match opts.format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Text => builder.init(),
        }

        Some(guard)
    } else {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr);
        match opts.format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Text => builder.init(),
        }

        None
    }
}

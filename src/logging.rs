use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// through the `debug_logging` settings key, in which case `RUST_LOG` may
/// override the level.
///
/// When `file` is provided, log lines are also appended to that file.
/// Calling this more than once keeps the first subscriber.
pub fn init(debug: bool, file: Option<PathBuf>) {
    // With debug logging off the level is pinned to `info` so a stray
    // `RUST_LOG` in the user's environment does not flood the console.
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let file_layer = file.and_then(|path| {
        let file_name = path.file_name()?.to_owned();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let appender = tracing_appender::rolling::never(dir, file_name);
        Some(fmt::layer().with_ansi(false).with_writer(appender).boxed())
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
}

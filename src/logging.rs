// Logging initialisation.
//
// Structured logs go to stdout and to `./logs/diary.log`.
// The level comes from `RUST_LOG` (defaults to `info` with noisy crates
// turned down).
//
// To see every query sqlx runs:  `RUST_LOG=info,sqlx=debug`

use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Initialise the global tracing subscriber.
//
// The returned [`WorkerGuard`] flushes the file writer on drop, so keep it
// alive until the server exits.
pub fn init() -> non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never("./logs", "diary.log");
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,sqlx=warn,hyper=warn,tower=warn,tower_http=info")
    });

    let stdout_layer = fmt::layer().with_target(true).with_ansi(true);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

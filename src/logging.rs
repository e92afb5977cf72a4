//! Log output for the command-line tools.

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install a subscriber writing to `stderr` and respecting `RUST_LOG`.
///
/// Reports go to `stdout`, so logs never mix into them. Without `RUST_LOG`
/// only warnings and errors are shown.
pub fn init_subscriber() {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

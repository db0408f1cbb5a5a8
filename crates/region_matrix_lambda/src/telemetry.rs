use tracing_subscriber::EnvFilter;

/// JSON log lines for CloudWatch, filtered by `RUST_LOG` (default `info`).
/// Lambda stamps each line itself, so the timestamp is left out.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

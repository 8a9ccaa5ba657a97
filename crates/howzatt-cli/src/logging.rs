use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so the scorecard output on stdout stays clean.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}

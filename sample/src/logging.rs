use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for the plugin.
///
/// `RUST_LOG` wins over `level`. When the host process already owns the
/// global subscriber this is a no-op and events go to the host's subscriber.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.parse().unwrap_or_default());

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

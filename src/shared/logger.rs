use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, `RUST_LOG` overrides the default level.
pub fn init_logger() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,staff_roster=debug")),
    )
    .with_target(false)
    .init();
}

//! Tracing initialization and subscriber setup.

use crate::SiteConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber writing formatted events to stderr.
///
/// `RUST_LOG`, when set, takes precedence over `config.trace_level`. An
/// unparsable directive falls back to `info`.
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times (only the first call takes
/// effect). A subscriber installed by someone else is left in place.
pub fn init_tracing(config: &SiteConfig) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}

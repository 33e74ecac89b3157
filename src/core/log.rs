use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber. A valid `RUST_LOG` replaces `level` entirely.
pub fn init_logging(level: LevelFilter) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (app_filter, env_filter) = filters(rust_log.as_deref(), level);

    tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}

/// Without `RUST_LOG` only our own and `tower_http` events pass, at `level`.
fn filters(rust_log: Option<&str>, level: LevelFilter) -> (Option<Targets>, EnvFilter) {
    if let Some(env_filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return (None, env_filter);
    }

    let app_filter = Targets::new()
        .with_target("globobudget", level)
        .with_target("tower_http", level);
    let env_filter = EnvFilter::new(level.to_string().to_lowercase());
    (Some(app_filter), env_filter)
}

/// Picks the log level for a run: `debug` when verbose, otherwise the command's default.
pub fn level_for(verbose: bool, default: LevelFilter) -> LevelFilter {
    if verbose { LevelFilter::DEBUG } else { default }
}

//! Log filter construction for the stderr and JSON layers.

use tracing_subscriber::EnvFilter;

/// Filter from the environment variable `var`, or `default` when it is
/// unset, empty or unparseable.
pub fn env_filter(var: &str, default: &str) -> EnvFilter {
    filter_or_default(std::env::var(var).ok().as_deref(), default)
}

/// Directives from `value` win over `default`; `default` only fills in
/// when no usable value is given.
pub fn filter_or_default(value: Option<&str>, default: &str) -> EnvFilter {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

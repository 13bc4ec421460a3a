//! Opt-in `tracing` setup for binaries and demos built on `chart-kit`.
//!
//! The library itself only emits events. Hosts that already own a subscriber
//! should skip this module entirely.

/// Default directive when `RUST_LOG` is unset: chart composition at `info`.
pub const DEFAULT_FILTER: &str = "chart_kit=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or
/// [`DEFAULT_FILTER`] when the variable is missing or malformed.
///
/// Returns `false` without the `telemetry` feature, or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        install(filter)
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Like [`init_default_tracing`] but with explicit filter directives,
/// e.g. `"chart_kit=trace"`. Invalid directives fall back to [`DEFAULT_FILTER`].
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(directives)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        install(filter)
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

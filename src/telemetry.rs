//! Opt-in tracing setup for hosts embedding `ejection-lens`.
//!
//! The crate only emits `tracing` events: load and validation results,
//! crossing mismatches, cursor transitions, stale timer fires and stale load
//! completions. Hosts either call one of the helpers below (feature
//! `telemetry`) or install their own subscriber.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "ejection_lens=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"ejection_lens=trace"` to see every cursor step.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

//! Tracing and logging configuration for the CLI
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Install the global subscriber for a `recall` invocation
///
/// `RECALL_ENV=production` switches to one JSON object per event, for
/// wrappers that capture stderr. Anything else gives pretty multi-line
/// events with source locations, and every card selection shows up at
/// DEBUG. `RUST_LOG` replaces either default filter, e.g.
/// `RUST_LOG=recall_srs=trace` to see every graded card.
pub(crate) fn init_tracing(env: Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

fn init_development_tracing() {
    let env_filter = filter_or("warn,recall=debug,recall_srs=debug");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::debug!("Logging pretty events to stderr");
}

fn init_production_tracing() {
    let env_filter = filter_or("warn");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::debug!("Logging JSON events to stderr");
}

// `RUST_LOG` wins over the per-environment default
fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

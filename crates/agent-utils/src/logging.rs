//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` for the workspace
/// crates when `verbose` is true.
pub fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize tracing for tests
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(default_filter(false))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,agent_scenario=debug,agent_runtime=debug,agent_llm=debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

//! Tracing setup for the binary.
//!
//! Logs go to stderr so they never mix with terminal output. The filter comes
//! from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (tests, embedders) keeps the first subscriber
    if json {
        let _ = registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init();
    } else {
        let _ = registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init();
    }
}

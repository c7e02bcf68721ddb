//! Structured logging setup
//!
//! One tracing-subscriber registry for the whole process, installed once.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Directive applied when neither `RUST_LOG` nor the config level is usable
const BASE_DIRECTIVES: &str = "foliochat=info,tower_http=info";

fn filter_for(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("foliochat={default_level},tower_http=info")))
        .unwrap_or_else(|_| EnvFilter::new(BASE_DIRECTIVES))
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is a no-op, which keeps test binaries that share a process from
/// panicking on double initialization.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(filter_for(default_level))
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_configured_level() {
        // A bad config value falls back to the base directives instead of
        // panicking at startup
        let _ = filter_for("debug");
        let _ = filter_for("not a level !!");
    }
}

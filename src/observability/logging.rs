//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for hosts that have none
//! - Respect `RUST_LOG`, falling back to a caller-provided directive
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Safe to call more than once; later calls are ignored

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a default subscriber: env-filtered, compact fmt output.
///
/// `default_directive` is used when `RUST_LOG` is unset, e.g.
/// `"waypoint=debug"`.
pub fn init(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

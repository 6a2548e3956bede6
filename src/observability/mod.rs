//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → Host application's subscriber (stdout, devtools bridge, file)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the host decides the subscriber
//! - logging::init is a convenience for hosts without their own setup

pub mod logging;

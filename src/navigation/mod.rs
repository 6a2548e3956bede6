//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate/replace/back/forward (or external hash change)
//!     → controller.rs (queue, resolve via routing, mutate history)
//!     → history.rs (back/forward stack, hash codec)
//!     → AddressBar (mirror into the browser location hash)
//!     → change notification to subscribers (rendering layer)
//! ```
//!
//! # Design Decisions
//! - Synchronous and non-preemptible: a navigation always completes before
//!   the next starts; reentrant requests queue FIFO
//! - The history stack is owned exclusively by the controller
//! - Resolution outcomes are values; subscribers decide how to render them

pub mod controller;
pub mod history;

pub use controller::{
    AddressBar, InMemoryAddressBar, NavOutcome, NavigationController, SubscriptionId,
};
pub use history::{from_hash, to_hash, HistoryEntry, HistoryStack};

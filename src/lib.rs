//! Client-side hash-history router engine for single-page applications.
//!
//! Given a requested path, the engine determines which view component(s) to
//! render, extracts path parameters, and keeps the browser's addressable
//! history in sync with in-app navigation. View components are opaque
//! identifiers; the rendering layer resolves them against its own registry.
//!
//! # Architecture Overview
//!
//! ```text
//!   route file / builder        navigate("/node/42")
//!          │                            │
//!          ▼                            ▼
//!   ┌─────────────┐            ┌──────────────────┐
//!   │   config    │            │    navigation    │
//!   │ load + check│            │    controller    │──▶ AddressBar (#/node/42)
//!   └──────┬──────┘            └────────┬─────────┘──▶ history stack
//!          │ Vec<RouteDefinition>       │ resolve
//!          ▼                            ▼
//!   ┌─────────────┐            ┌──────────────────┐
//!   │ RouteTable  │◀───────────│     resolver     │
//!   │ (immutable) │            │ chain + params   │
//!   └─────────────┘            └────────┬─────────┘
//!                                       │ Resolution
//!                                       ▼
//!                              change subscribers
//!                              (rendering layer)
//! ```
//!
//! # Quick start
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use waypoint::navigation::{InMemoryAddressBar, NavigationController};
//! use waypoint::routing::{RouteDefinition, RouteTable};
//!
//! let table = RouteTable::build(vec![
//!     RouteDefinition::view("/", "home", "Home"),
//!     RouteDefinition::view("/node/:id", "node-details", "NodeDetails"),
//!     RouteDefinition::redirect("*", "not-found", "/"),
//! ])?;
//!
//! let nav = NavigationController::new(Arc::new(table), Rc::new(InMemoryAddressBar::new()));
//! nav.on_change(|resolution| {
//!     // Mount the views named in the chain, outer to inner.
//!     let _ = resolution;
//! });
//! nav.navigate("/node/42");
//! # Ok::<(), waypoint::routing::TableError>(())
//! ```

// Core subsystems
pub mod config;
pub mod navigation;
pub mod routing;

// Cross-cutting concerns
pub mod observability;

pub use config::{load_routes, ConfigError};
pub use navigation::{AddressBar, InMemoryAddressBar, NavOutcome, NavigationController};
pub use routing::{
    resolve, Resolution, ResolvedRoute, RouteDefinition, RouteTable, RouteTarget, TableError,
};

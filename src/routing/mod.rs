//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route compilation (at startup):
//!     Vec<RouteDefinition>
//!     → table.rs (check names, normalize child templates)
//!     → pattern.rs (compile templates into segment matchers)
//!     → Freeze as immutable RouteTable
//!
//! Resolution (per navigation):
//!     request path
//!     → resolver.rs (depth-first walk, declaration order)
//!     → Return: ResolvedRoute (chain + params) or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex; segment-by-segment matching only
//! - Deterministic: same input always resolves the same route
//! - First declared, first tried; fallbacks are always last

pub mod pattern;
pub mod resolver;
pub mod table;

pub use pattern::{CompiledPattern, Params, PatternError};
pub use resolver::{resolve, MatchedRoute, Resolution, ResolvedRoute};
pub use table::{RouteDefinition, RouteTable, RouteTarget, TableError, ViewId};

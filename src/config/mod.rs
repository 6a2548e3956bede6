//! Route declaration subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs validation (semantic checks, all errors collected)
//!     → Vec<RouteDefinition> (typed, ready for RouteTable::build)
//! ```
//!
//! # Design Decisions
//! - The declaration is static per process lifetime; no reload
//! - Validation separates syntactic (serde) from semantic checks
//! - A declaration error aborts startup loudly

pub mod loader;
pub mod schema;

pub use loader::{load_routes, routes_from_config, ConfigError, ValidationError};
pub use schema::{RouteSpec, RoutesConfig};

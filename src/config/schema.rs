//! Route declaration schema.
//!
//! This module defines the static declaration surface consumed from the
//! host application at startup. All types derive Serde traits for
//! deserialization from TOML or JSON route files.

use serde::{Deserialize, Serialize};

/// Root of a route declaration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RoutesConfig {
    /// Route trees, in declaration order. Order is the matching tie-break.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

/// One declared route. Exactly one of `view` and `redirect` must be set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Path template: literal segments, `:name` dynamic segments, and an
    /// optional trailing `*name` (or bare `*`) catch-all.
    pub path: String,

    /// Unique route name, across the whole tree.
    pub name: String,

    /// View component to mount, resolved by the rendering layer.
    pub view: Option<String>,

    /// Fixed path to resolve instead of mounting a view.
    pub redirect: Option<String>,

    /// Nested routes under this route's path prefix.
    #[serde(default)]
    pub children: Vec<RouteSpec>,
}

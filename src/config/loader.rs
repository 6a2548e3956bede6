//! Route declaration loading from disk.
//!
//! # Responsibilities
//! - Read and parse a route file (TOML or JSON by extension)
//! - Semantic validation (serde handles syntactic), collecting every error
//! - Convert specs into typed route definitions
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - A failed load aborts startup; the application must not run with an
//!   invalid route declaration

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{RouteSpec, RoutesConfig};
use crate::routing::table::{RouteDefinition, RouteTarget, ViewId};

/// Error type for route declaration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read route file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML route file: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to parse JSON route file: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("unsupported route file extension '{0}', expected .toml or .json")]
    UnsupportedFormat(String),

    #[error("invalid route declaration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

/// One semantic problem in a route declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route '{name}' declares both a view and a redirect")]
    BothTargets { name: String },

    #[error("route '{name}' declares neither a view nor a redirect")]
    MissingTarget { name: String },

    #[error("route with path '{path}' has an empty name")]
    EmptyName { path: String },
}

/// Load route definitions from a file, validating the declaration.
pub fn load_routes(path: &Path) -> Result<Vec<RouteDefinition>, ConfigError> {
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let config: RoutesConfig = match extension {
        "toml" => toml::from_str(&content)?,
        "json" => serde_json::from_str(&content)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };

    let routes = routes_from_config(config)?;
    tracing::info!(file = %path.display(), roots = routes.len(), "Route declaration loaded");
    Ok(routes)
}

/// Validate and convert an already-deserialized declaration. Collects every
/// validation error before failing.
pub fn routes_from_config(config: RoutesConfig) -> Result<Vec<RouteDefinition>, ConfigError> {
    let mut errors = Vec::new();
    let definitions: Vec<RouteDefinition> = config
        .routes
        .into_iter()
        .filter_map(|spec| convert(spec, &mut errors))
        .collect();

    if errors.is_empty() {
        Ok(definitions)
    } else {
        Err(ConfigError::Validation(errors))
    }
}

fn convert(spec: RouteSpec, errors: &mut Vec<ValidationError>) -> Option<RouteDefinition> {
    if spec.name.is_empty() {
        errors.push(ValidationError::EmptyName {
            path: spec.path.clone(),
        });
    }

    let target = match (spec.view, spec.redirect) {
        (Some(view), None) => Some(RouteTarget::View(ViewId::new(view))),
        (None, Some(to)) => Some(RouteTarget::Redirect(to)),
        (Some(_), Some(_)) => {
            errors.push(ValidationError::BothTargets {
                name: spec.name.clone(),
            });
            None
        }
        (None, None) => {
            errors.push(ValidationError::MissingTarget {
                name: spec.name.clone(),
            });
            None
        }
    };

    let children: Vec<RouteDefinition> = spec
        .children
        .into_iter()
        .filter_map(|child| convert(child, errors))
        .collect();

    Some(RouteDefinition {
        path: spec.path,
        name: spec.name,
        target: target?,
        children,
    })
}

//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile declared route trees into an immutable table
//! - Reject duplicate route names anywhere in the tree
//! - Normalize absolute child templates to parent-relative patterns
//! - Look up routes (and their parent chains) by name
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards; shareable without locks
//! - Declaration order is preserved and is the matching tie-break
//! - A root route whose pattern matches any path is a last-resort fallback
//!   by definition, not by its declared position
//! - Redirect routes are leaves; children under one could never render

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::pattern::{split_path, CompiledPattern, PatternError};

/// Opaque identifier for a view component. The rendering layer resolves it
/// against its own registry; the router never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        ViewId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a matched route resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Mount the named view.
    View(ViewId),
    /// Resolve the given path instead and use that result.
    Redirect(String),
}

/// A declared route: template, unique name, target, nested children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub path: String,
    pub name: String,
    pub target: RouteTarget,
    pub children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    /// A route that mounts a view.
    pub fn view(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        RouteDefinition {
            path: path.into(),
            name: name.into(),
            target: RouteTarget::View(ViewId::new(view)),
            children: Vec::new(),
        }
    }

    /// A route that redirects to a fixed path.
    pub fn redirect(
        path: impl Into<String>,
        name: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        RouteDefinition {
            path: path.into(),
            name: name.into(),
            target: RouteTarget::Redirect(to.into()),
            children: Vec::new(),
        }
    }

    /// Attach nested child routes, in declaration order.
    pub fn with_children(mut self, children: Vec<RouteDefinition>) -> Self {
        self.children = children;
        self
    }
}

/// Error produced while building a [`RouteTable`]. Any error aborts the
/// build; no partial table is produced.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("route name '{name}' is declared more than once")]
    DuplicateRouteName { name: String },

    #[error("route '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("route '{child}' declares absolute path '{path}' outside its parent '{parent}'")]
    ChildOutsideParent {
        child: String,
        path: String,
        parent: String,
    },

    #[error("redirect route '{name}' must not declare children")]
    RedirectWithChildren { name: String },
}

/// A compiled route in the table. The pattern is relative to the parent
/// route, so the matcher always applies it to the unconsumed remainder of
/// the request path.
#[derive(Debug)]
pub struct RouteNode {
    pub name: String,
    pub target: RouteTarget,
    pub pattern: CompiledPattern,
    pub children: Vec<RouteNode>,
    /// Root-level last-resort rule: tried only after every sibling failed.
    pub fallback: bool,
    /// The declared (absolute) template, kept for diagnostics and links.
    pub template: String,
}

/// Immutable, ordered collection of compiled routes.
#[derive(Debug)]
pub struct RouteTable {
    roots: Vec<RouteNode>,
    // Route name -> child-index path from the roots.
    by_name: HashMap<String, Vec<usize>>,
}

impl RouteTable {
    /// Compile a declared route tree into a table.
    pub fn build(definitions: Vec<RouteDefinition>) -> Result<RouteTable, TableError> {
        let mut by_name = HashMap::new();
        let mut roots = Vec::with_capacity(definitions.len());

        for (i, def) in definitions.into_iter().enumerate() {
            let node = compile_node(def, &[], &mut by_name, &[i], true)?;
            roots.push(node);
        }

        let table = RouteTable { roots, by_name };
        tracing::debug!(
            routes = table.by_name.len(),
            roots = table.roots.len(),
            "Route table built"
        );
        Ok(table)
    }

    /// Root-level routes in declaration order.
    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// Find a route by name, returning it together with its parent chain,
    /// root first. Useful for generating links without re-resolving a path.
    pub fn lookup_by_name(&self, name: &str) -> Option<Vec<&RouteNode>> {
        let index_path = self.by_name.get(name)?;
        let mut chain = Vec::with_capacity(index_path.len());
        let mut level = &self.roots;
        for &i in index_path {
            let node = &level[i];
            chain.push(node);
            level = &node.children;
        }
        Some(chain)
    }
}

fn compile_node(
    def: RouteDefinition,
    parent_template_segments: &[&str],
    by_name: &mut HashMap<String, Vec<usize>>,
    index_path: &[usize],
    is_root: bool,
) -> Result<RouteNode, TableError> {
    if by_name
        .insert(def.name.clone(), index_path.to_vec())
        .is_some()
    {
        return Err(TableError::DuplicateRouteName { name: def.name });
    }

    if matches!(def.target, RouteTarget::Redirect(_)) && !def.children.is_empty() {
        return Err(TableError::RedirectWithChildren { name: def.name });
    }

    // Children may be declared with absolute templates that repeat the
    // parent's prefix; strip it so the stored pattern is parent-relative.
    let relative = if def.path.starts_with('/') && !parent_template_segments.is_empty() {
        let segments = split_path(&def.path);
        if segments.len() < parent_template_segments.len()
            || segments[..parent_template_segments.len()] != *parent_template_segments
        {
            return Err(TableError::ChildOutsideParent {
                child: def.name,
                path: def.path,
                parent: format!("/{}", parent_template_segments.join("/")),
            });
        }
        segments[parent_template_segments.len()..].join("/")
    } else {
        def.path.clone()
    };

    let pattern = CompiledPattern::compile(&relative).map_err(|source| TableError::Pattern {
        name: def.name.clone(),
        source,
    })?;

    let own_segments = split_path(&def.path);
    let full_segments: Vec<&str> = if def.path.starts_with('/') {
        own_segments
    } else {
        parent_template_segments
            .iter()
            .copied()
            .chain(own_segments)
            .collect()
    };

    let mut children = Vec::with_capacity(def.children.len());
    for (i, child) in def.children.into_iter().enumerate() {
        let mut child_index = index_path.to_vec();
        child_index.push(i);
        children.push(compile_node(
            child,
            &full_segments,
            by_name,
            &child_index,
            false,
        )?);
    }

    let fallback = is_root && pattern.matches_anything();

    Ok(RouteNode {
        name: def.name,
        target: def.target,
        pattern,
        children,
        fallback,
        template: def.path,
    })
}

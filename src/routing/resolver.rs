//! Path resolution against the route table.
//!
//! # Responsibilities
//! - Walk the table depth-first in declaration order
//! - Extract the matched chain (root to deepest) and captured params
//! - Apply fallback routes only after every ordinary root has failed
//! - Follow redirects, bounded, returning the target's resolution
//!
//! # Design Decisions
//! - Deterministic: same table and path always resolve identically
//! - First declared, first tried; backtracking on partial consumption
//! - NoMatch is a value, never an error; a dead path must degrade to a
//!   visible not-found state instead of failing the navigation subsystem
//! - Param capture down the chain is last-writer-wins

use crate::routing::pattern::{split_path, Params};
use crate::routing::table::{RouteNode, RouteTable, RouteTarget, ViewId};

/// Redirect chains longer than this resolve to NoMatch.
const MAX_REDIRECTS: u8 = 8;

/// One entry of a resolved chain: enough for the rendering layer to mount
/// the view and for links to name the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    pub name: String,
    pub view: ViewId,
}

/// A successful resolution: the path that finally matched (post-redirect),
/// the matched chain root-first, and the captured params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub path: String,
    pub chain: Vec<MatchedRoute>,
    pub params: Params,
}

/// Outcome of resolving a path. NoMatch carries the requested path so the
/// caller can render a not-found state for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Route(ResolvedRoute),
    NoMatch { path: String },
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Route(_))
    }

    pub fn route(&self) -> Option<&ResolvedRoute> {
        match self {
            Resolution::Route(r) => Some(r),
            Resolution::NoMatch { .. } => None,
        }
    }
}

/// Resolve a request path against the table.
pub fn resolve(table: &RouteTable, path: &str) -> Resolution {
    resolve_bounded(table, path, MAX_REDIRECTS)
}

fn resolve_bounded(table: &RouteTable, path: &str, redirects_left: u8) -> Resolution {
    let segments = split_path(path);

    // Ordinary routes first, in declaration order.
    for root in table.roots().iter().filter(|r| !r.fallback) {
        if let Some(found) = match_node(root, &segments, Params::new()) {
            return accept(table, path, found, redirects_left);
        }
    }

    // Fallbacks are last-resort rules regardless of declared position.
    for root in table.roots().iter().filter(|r| r.fallback) {
        if let Some(found) = match_node(root, &segments, Params::new()) {
            tracing::debug!(path, fallback = %root.name, "No ordinary route matched, using fallback");
            return accept(table, path, found, redirects_left);
        }
    }

    tracing::debug!(path, "No route matched");
    Resolution::NoMatch {
        path: path.to_string(),
    }
}

struct Found<'t> {
    chain: Vec<&'t RouteNode>,
    params: Params,
}

/// Turn a matched node chain into a Resolution, following a redirect on the
/// deepest node if present.
fn accept(table: &RouteTable, path: &str, found: Found<'_>, redirects_left: u8) -> Resolution {
    let deepest = found.chain.last().expect("matched chain is never empty");

    match &deepest.target {
        RouteTarget::Redirect(to) => {
            if redirects_left == 0 {
                tracing::warn!(
                    path,
                    route = %deepest.name,
                    "Redirect limit exceeded, treating as unmatched"
                );
                return Resolution::NoMatch {
                    path: path.to_string(),
                };
            }
            tracing::debug!(path, to = %to, route = %deepest.name, "Following redirect");
            resolve_bounded(table, to, redirects_left - 1)
        }
        RouteTarget::View(_) => {
            let chain = found
                .chain
                .iter()
                .map(|node| MatchedRoute {
                    name: node.name.clone(),
                    view: match &node.target {
                        RouteTarget::View(view) => view.clone(),
                        // Redirect routes are leaves by construction, so an
                        // inner chain node always carries a view.
                        RouteTarget::Redirect(_) => unreachable!("redirect route inside a chain"),
                    },
                })
                .collect();
            Resolution::Route(ResolvedRoute {
                path: normalize(path),
                chain,
                params: found.params,
            })
        }
    }
}

/// Depth-first match of one node against the unconsumed remainder.
/// Children are preferred over self-acceptance; a node that leaves part of
/// the path unconsumed without a matching child is rejected.
fn match_node<'t>(node: &'t RouteNode, remaining: &[&str], inherited: Params) -> Option<Found<'t>> {
    let (captured, consumed) = node.pattern.match_prefix(remaining)?;

    let mut params = inherited;
    params.extend(captured); // Last-writer-wins on name reuse

    let rest = &remaining[consumed..];

    for child in &node.children {
        if let Some(mut found) = match_node(child, rest, params.clone()) {
            found.chain.insert(0, node);
            return Some(found);
        }
    }

    if rest.is_empty() {
        return Some(Found {
            chain: vec![node],
            params,
        });
    }
    None
}

/// Canonical form of a path: leading separator, no trailing separator.
fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::RouteDefinition;

    fn table() -> RouteTable {
        RouteTable::build(vec![
            RouteDefinition::view("/", "nodes", "Nodes"),
            RouteDefinition::view("/node/:id", "node-details", "NodeDetails"),
            RouteDefinition::view("/provisionConfig", "provisionD", "ProvisionConfig")
                .with_children(vec![
                    RouteDefinition::view("/provisionConfig/reqDefinition", "req", "ReqDefForm"),
                    RouteDefinition::view("/provisionConfig/threadPools", "thread", "ThreadPools"),
                    RouteDefinition::view(
                        "/provisionConfig/reqDefinition/edit/:id",
                        "edit-req",
                        "EditReqDef",
                    ),
                ]),
            RouteDefinition::redirect("*", "not-found", "/"),
        ])
        .unwrap()
    }

    fn chain_names(resolution: &Resolution) -> Vec<&str> {
        resolution
            .route()
            .map(|r| r.chain.iter().map(|m| m.name.as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_single_route_with_param() {
        let t = table();
        let resolution = resolve(&t, "/node/42");
        let route = resolution.route().unwrap();
        assert_eq!(route.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(chain_names(&resolution), ["node-details"]);
    }

    #[test]
    fn test_nested_chain() {
        let t = table();
        let resolution = resolve(&t, "/provisionConfig/reqDefinition");
        assert_eq!(chain_names(&resolution), ["provisionD", "req"]);
    }

    #[test]
    fn test_parent_alone_matches_without_children() {
        let t = table();
        let resolution = resolve(&t, "/provisionConfig");
        assert_eq!(chain_names(&resolution), ["provisionD"]);
    }

    #[test]
    fn test_deep_nested_chain_with_param() {
        let t = table();
        let resolution = resolve(&t, "/provisionConfig/reqDefinition/edit/7");
        assert_eq!(chain_names(&resolution), ["provisionD", "edit-req"]);
        let route = resolution.route().unwrap();
        assert_eq!(route.params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_fallback_redirect_equals_direct_resolution() {
        let t = table();
        let via_fallback = resolve(&t, "/totally/unknown/path");
        let direct = resolve(&t, "/");
        assert_eq!(via_fallback, direct);
        assert_eq!(chain_names(&via_fallback), ["nodes"]);
    }

    #[test]
    fn test_fallback_tried_last_even_if_declared_first() {
        let t = RouteTable::build(vec![
            RouteDefinition::redirect("*", "not-found", "/home"),
            RouteDefinition::view("/home", "home", "Home"),
            RouteDefinition::view("/about", "about", "About"),
        ])
        .unwrap();
        let resolution = resolve(&t, "/about");
        assert_eq!(chain_names(&resolution), ["about"]);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let t = RouteTable::build(vec![
            RouteDefinition::view("/item/:slug", "by-slug", "BySlug"),
            RouteDefinition::view("/item/special", "special", "Special"),
        ])
        .unwrap();
        // Both siblings match; the earlier declaration wins.
        let resolution = resolve(&t, "/item/special");
        assert_eq!(chain_names(&resolution), ["by-slug"]);
    }

    #[test]
    fn test_partial_consumption_backtracks_to_next_sibling() {
        let t = RouteTable::build(vec![
            RouteDefinition::view("/a", "short", "Short"),
            RouteDefinition::view("/a/:x", "long", "Long"),
        ])
        .unwrap();
        // "short" prefix-matches /a/1 but cannot consume it fully and has no
        // children, so the search moves on to "long".
        let resolution = resolve(&t, "/a/1");
        assert_eq!(chain_names(&resolution), ["long"]);
    }

    #[test]
    fn test_no_match_without_fallback() {
        let t = RouteTable::build(vec![RouteDefinition::view("/", "home", "Home")]).unwrap();
        let resolution = resolve(&t, "/nope");
        assert_eq!(
            resolution,
            Resolution::NoMatch {
                path: "/nope".to_string()
            }
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let t = table();
        let a = resolve(&t, "/provisionConfig/reqDefinition/edit/42");
        let b = resolve(&t, "/provisionConfig/reqDefinition/edit/42");
        assert_eq!(a, b);
    }

    #[test]
    fn test_param_shadowing_is_last_writer_wins() {
        let t = RouteTable::build(vec![RouteDefinition::view("/org/:id", "org", "Org")
            .with_children(vec![RouteDefinition::view(
                "/org/:id/team/:id",
                "team",
                "Team",
            )])])
        .unwrap();
        let resolution = resolve(&t, "/org/1/team/9");
        let route = resolution.route().unwrap();
        assert_eq!(route.params.get("id").map(String::as_str), Some("9"));
    }

    #[test]
    fn test_redirect_loop_yields_no_match() {
        let t = RouteTable::build(vec![
            RouteDefinition::redirect("/a", "a", "/b"),
            RouteDefinition::redirect("/b", "b", "/a"),
        ])
        .unwrap();
        let resolution = resolve(&t, "/a");
        assert!(!resolution.is_match());
    }

    #[test]
    fn test_catch_all_view_captures_remainder() {
        let t = RouteTable::build(vec![
            RouteDefinition::view("/", "home", "Home"),
            RouteDefinition::view("*", "lost", "NotFound"),
        ])
        .unwrap();
        let resolution = resolve(&t, "/x/y");
        let route = resolution.route().unwrap();
        assert_eq!(chain_names(&resolution), ["lost"]);
        assert_eq!(route.params.get("rest").map(String::as_str), Some("x/y"));
    }

    #[test]
    fn test_resolved_path_is_normalized() {
        let t = table();
        let resolution = resolve(&t, "node/42/");
        assert_eq!(resolution.route().unwrap().path, "/node/42");
    }
}

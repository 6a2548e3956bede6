//! End-to-end resolution tests over the full application route tree,
//! including a declaration loaded from a TOML file.

use pretty_assertions::assert_eq;
use std::fs;
use waypoint::config::routes_from_config;
use waypoint::routing::{resolve, Resolution, RouteTable, TableError};

mod common;

fn chain_names(resolution: &Resolution) -> Vec<String> {
    resolution
        .route()
        .map(|r| r.chain.iter().map(|m| m.name.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_every_declared_route_is_reachable() {
    let table = common::app_table();

    for (path, expected_leaf) in [
        ("/", "nodes"),
        ("/node/7", "node-details"),
        ("/demo", "demo"),
        ("/dataTableDemo", "data-table-demo"),
        ("/provisionConfig", "provisionD"),
        ("/provisionConfig/reqDefinition", "req"),
        ("/provisionConfig/threadPools", "thread"),
        ("/provisionConfig/reqDefinition/edit/3", "edit-req"),
    ] {
        let resolution = resolve(&table, path);
        let names = chain_names(&resolution);
        assert_eq!(
            names.last().map(String::as_str),
            Some(expected_leaf),
            "path {path} should resolve to {expected_leaf}"
        );
    }
}

#[test]
fn test_nested_resolution_chain_and_views() {
    let table = common::app_table();
    let resolution = resolve(&table, "/provisionConfig/reqDefinition");
    let route = resolution.route().expect("nested path should match");

    assert_eq!(chain_names(&resolution), ["provisionD", "req"]);
    let views: Vec<&str> = route.chain.iter().map(|m| m.view.as_str()).collect();
    assert_eq!(views, ["ProvisionConfig", "ReqDefForm"]);
}

#[test]
fn test_unknown_path_redirects_to_root() {
    let table = common::app_table();
    let via_fallback = resolve(&table, "/totally/unknown/path");
    let direct = resolve(&table, "/");
    assert_eq!(via_fallback, direct);
}

#[test]
fn test_case_sensitivity_is_exact() {
    let table = common::app_table();
    // A case mismatch is not the declared route; it falls through to the
    // redirect and lands on the node list.
    let resolution = resolve(&table, "/Demo");
    assert_eq!(chain_names(&resolution), ["nodes"]);
}

#[test]
fn test_link_generation_via_name_lookup() {
    let table = common::app_table();
    let chain = table.lookup_by_name("edit-req").unwrap();
    let templates: Vec<&str> = chain.iter().map(|n| n.template.as_str()).collect();
    assert_eq!(
        templates,
        ["/provisionConfig", "/provisionConfig/reqDefinition/edit/:id"]
    );
}

#[test]
fn test_duplicate_name_fails_table_construction() {
    let mut routes = common::app_routes();
    routes.push(waypoint::routing::RouteDefinition::view(
        "/other",
        "edit-req",
        "Other",
    ));
    let err = RouteTable::build(routes).unwrap_err();
    assert!(matches!(
        err,
        TableError::DuplicateRouteName { ref name } if name == "edit-req"
    ));
}

#[test]
fn test_declaration_file_round_trip() {
    let path = std::env::temp_dir().join("waypoint_integration_routes.toml");
    fs::write(
        &path,
        r#"
        [[routes]]
        path = "/"
        name = "nodes"
        view = "Nodes"

        [[routes]]
        path = "/node/:id"
        name = "node-details"
        view = "NodeDetails"

        [[routes]]
        path = "/provisionConfig"
        name = "provisionD"
        view = "ProvisionConfig"

          [[routes.children]]
          path = "/provisionConfig/reqDefinition"
          name = "req"
          view = "ReqDefForm"

        [[routes]]
        path = "*"
        name = "not-found"
        redirect = "/"
        "#,
    )
    .unwrap();

    let routes = waypoint::load_routes(&path).unwrap();
    fs::remove_file(&path).ok();

    let table = RouteTable::build(routes).unwrap();
    let resolution = resolve(&table, "/provisionConfig/reqDefinition");
    assert_eq!(chain_names(&resolution), ["provisionD", "req"]);

    let resolution = resolve(&table, "/node/42");
    let route = resolution.route().unwrap();
    assert_eq!(route.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_json_declaration_builds_equivalent_table() {
    let json = r#"{
        "routes": [
            { "path": "/", "name": "nodes", "view": "Nodes" },
            { "path": "*", "name": "not-found", "redirect": "/" }
        ]
    }"#;
    let config: waypoint::config::RoutesConfig = serde_json::from_str(json).unwrap();
    let table = RouteTable::build(routes_from_config(config).unwrap()).unwrap();

    assert_eq!(resolve(&table, "/missing"), resolve(&table, "/"));
}

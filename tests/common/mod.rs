//! Shared fixtures for integration tests.

use std::rc::Rc;
use std::sync::Arc;

use waypoint::navigation::{AddressBar, InMemoryAddressBar, NavigationController};
use waypoint::routing::{RouteDefinition, RouteTable};

/// The full application route tree: a node list, node details with a
/// dynamic id, a nested provisioning section, and a catch-all redirect.
pub fn app_routes() -> Vec<RouteDefinition> {
    vec![
        RouteDefinition::view("/", "nodes", "Nodes"),
        RouteDefinition::view("/node/:id", "node-details", "NodeDetails"),
        RouteDefinition::view("/demo", "demo", "Demo"),
        RouteDefinition::view("/dataTableDemo", "data-table-demo", "DataTableDemo"),
        RouteDefinition::view("/provisionConfig", "provisionD", "ProvisionConfig").with_children(
            vec![
                RouteDefinition::view("/provisionConfig/reqDefinition", "req", "ReqDefForm"),
                RouteDefinition::view("/provisionConfig/threadPools", "thread", "ThreadPools"),
                RouteDefinition::view(
                    "/provisionConfig/reqDefinition/edit/:id",
                    "edit-req",
                    "EditNode",
                ),
            ],
        ),
        RouteDefinition::redirect("*", "not-found", "/"),
    ]
}

pub fn app_table() -> Arc<RouteTable> {
    Arc::new(RouteTable::build(app_routes()).expect("fixture table is valid"))
}

#[allow(dead_code)]
pub fn controller() -> (Rc<NavigationController>, Rc<InMemoryAddressBar>) {
    let bar = Rc::new(InMemoryAddressBar::new());
    let nav = Rc::new(NavigationController::new(
        app_table(),
        bar.clone() as Rc<dyn AddressBar>,
    ));
    (nav, bar)
}

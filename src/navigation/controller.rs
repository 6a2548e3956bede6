//! Stateful navigation front end.
//!
//! # Responsibilities
//! - Resolve navigation requests against the route table
//! - Mirror every completed navigation into the address bar and the
//!   back/forward stack
//! - Notify subscribers once per completed navigation, in subscription order
//! - Queue requests issued from inside a change callback (FIFO) so a
//!   navigation always runs to completion before the next one starts
//!
//! # Design Decisions
//! - Single-threaded by contract; interior mutability instead of locks
//! - A panicking subscriber is isolated and logged, never rolls back the
//!   navigation, never blocks later subscribers
//! - Unmatched paths still enter history so the address stays visible and
//!   back() works from a not-found state
//! - back()/forward() reflect into the address bar via replace; the browser
//!   stack must not grow on a cursor move

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::navigation::history::{from_hash, to_hash, HistoryEntry, HistoryStack};
use crate::routing::resolver::{resolve, Resolution, ResolvedRoute};
use crate::routing::table::RouteTable;

/// Seam to the browser's location hash. Implementations only mirror the
/// hash; the controller owns the actual history stack.
pub trait AddressBar {
    /// Show a new location, growing the browser's own stack.
    fn push(&self, hash: &str);
    /// Show a location in place of the current one.
    fn replace(&self, hash: &str);
}

/// Headless [`AddressBar`] for tests and non-browser hosts. Records every
/// hash it is shown.
#[derive(Debug, Default)]
pub struct InMemoryAddressBar {
    inner: RefCell<BarState>,
}

#[derive(Debug, Default)]
struct BarState {
    current: String,
    log: Vec<String>,
}

impl InMemoryAddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hash currently shown.
    pub fn hash(&self) -> String {
        self.inner.borrow().current.clone()
    }

    /// Mirrored entry list: push appends, replace overwrites the tail.
    pub fn log(&self) -> Vec<String> {
        self.inner.borrow().log.clone()
    }
}

impl AddressBar for InMemoryAddressBar {
    fn push(&self, hash: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.current = hash.to_string();
        inner.log.push(hash.to_string());
    }

    fn replace(&self, hash: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.current = hash.to_string();
        if let Some(last) = inner.log.last_mut() {
            *last = hash.to_string();
        } else {
            inner.log.push(hash.to_string());
        }
    }
}

/// Result of a navigation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The path resolved; the rendering layer should mount the chain.
    Resolved(ResolvedRoute),
    /// The path resolved to nothing; render a not-found state.
    NoMatch { path: String },
    /// back()/forward() at a stack boundary; nothing changed, no event.
    NoOp,
    /// Issued from inside a change callback; queued behind the navigation
    /// in flight. The outcome is observable through the subscription.
    Queued,
}

impl From<Resolution> for NavOutcome {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Route(route) => NavOutcome::Resolved(route),
            Resolution::NoMatch { path } => NavOutcome::NoMatch { path },
        }
    }
}

/// Handle for removing a change subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeCallback = dyn Fn(&Resolution);

enum Request {
    Navigate { path: String, state: Value },
    Replace { path: String, state: Value },
    Back,
    Forward,
    External { path: String },
}

/// Process-wide navigation state. Construct one at startup, pass it
/// explicitly to whatever needs to navigate or observe route changes, and
/// call [`shutdown`](NavigationController::shutdown) when tearing down.
pub struct NavigationController {
    table: Arc<RouteTable>,
    address: Rc<dyn AddressBar>,
    history: RefCell<HistoryStack>,
    current: RefCell<Resolution>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<ChangeCallback>)>>,
    next_subscription: Cell<u64>,
    queue: RefCell<VecDeque<Request>>,
    dispatching: Cell<bool>,
}

impl NavigationController {
    pub fn new(table: Arc<RouteTable>, address: Rc<dyn AddressBar>) -> Self {
        NavigationController {
            table,
            address,
            history: RefCell::new(HistoryStack::new()),
            current: RefCell::new(Resolution::NoMatch {
                path: String::new(),
            }),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    /// Resolve `path`, push a history entry, and notify subscribers.
    pub fn navigate(&self, path: &str) -> NavOutcome {
        self.navigate_with_state(path, Value::Null)
    }

    /// [`navigate`](Self::navigate) with opaque state attached to the entry.
    pub fn navigate_with_state(&self, path: &str, state: Value) -> NavOutcome {
        self.submit(Request::Navigate {
            path: path.to_string(),
            state,
        })
    }

    /// Resolve `path`, overwriting the current history entry.
    pub fn replace(&self, path: &str) -> NavOutcome {
        self.replace_with_state(path, Value::Null)
    }

    pub fn replace_with_state(&self, path: &str, state: Value) -> NavOutcome {
        self.submit(Request::Replace {
            path: path.to_string(),
            state,
        })
    }

    /// Move one entry back and re-resolve. NoOp at the boundary.
    pub fn back(&self) -> NavOutcome {
        self.submit(Request::Back)
    }

    /// Move one entry forward and re-resolve. NoOp at the boundary.
    pub fn forward(&self) -> NavOutcome {
        self.submit(Request::Forward)
    }

    /// Externally triggered hash change (browser back/forward buttons or a
    /// hand-edited fragment). Neighbor entries move the cursor; anything
    /// else is treated as a fresh navigation.
    pub fn handle_hash_change(&self, hash: &str) -> NavOutcome {
        self.submit(Request::External {
            path: from_hash(hash),
        })
    }

    /// The resolution of the current location. Before any navigation this
    /// is NoMatch with an empty path.
    pub fn current_route(&self) -> Resolution {
        self.current.borrow().clone()
    }

    /// The current history entry, if any navigation has happened.
    pub fn current_entry(&self) -> Option<HistoryEntry> {
        self.history.borrow().current().cloned()
    }

    /// Register a change callback, invoked once per completed navigation
    /// with the new resolution. Callbacks run in subscription order.
    pub fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Resolution) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() < before
    }

    /// Drop all subscribers and pending requests. Call at application
    /// shutdown.
    pub fn shutdown(&self) {
        let dropped = self.subscribers.borrow().len();
        self.subscribers.borrow_mut().clear();
        self.queue.borrow_mut().clear();
        tracing::info!(subscribers = dropped, "Navigation controller shut down");
    }

    fn submit(&self, request: Request) -> NavOutcome {
        self.queue.borrow_mut().push_back(request);
        if self.dispatching.get() {
            return NavOutcome::Queued;
        }

        self.dispatching.set(true);
        let mut first = None;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(request) = next else { break };
            let outcome = self.process(request);
            if first.is_none() {
                first = Some(outcome);
            }
        }
        self.dispatching.set(false);

        first.unwrap_or(NavOutcome::NoOp)
    }

    fn process(&self, request: Request) -> NavOutcome {
        match request {
            Request::Navigate { path, state } => {
                let resolution = resolve(&self.table, &path);
                let shown = shown_path(&resolution);
                self.history
                    .borrow_mut()
                    .push(HistoryEntry::new(shown.clone(), state));
                self.address.push(&to_hash(&shown));
                tracing::debug!(path = %shown, matched = resolution.is_match(), "Navigated");
                self.complete(resolution)
            }
            Request::Replace { path, state } => {
                let resolution = resolve(&self.table, &path);
                let shown = shown_path(&resolution);
                self.history
                    .borrow_mut()
                    .replace(HistoryEntry::new(shown.clone(), state));
                self.address.replace(&to_hash(&shown));
                tracing::debug!(path = %shown, matched = resolution.is_match(), "Replaced location");
                self.complete(resolution)
            }
            Request::Back => {
                let path = self
                    .history
                    .borrow_mut()
                    .back()
                    .map(|entry| entry.path.clone());
                match path {
                    Some(path) => {
                        let resolution = resolve(&self.table, &path);
                        self.address.replace(&to_hash(&path));
                        tracing::debug!(path = %path, "Went back");
                        self.complete(resolution)
                    }
                    None => NavOutcome::NoOp,
                }
            }
            Request::Forward => {
                let path = self
                    .history
                    .borrow_mut()
                    .forward()
                    .map(|entry| entry.path.clone());
                match path {
                    Some(path) => {
                        let resolution = resolve(&self.table, &path);
                        self.address.replace(&to_hash(&path));
                        tracing::debug!(path = %path, "Went forward");
                        self.complete(resolution)
                    }
                    None => NavOutcome::NoOp,
                }
            }
            Request::External { path } => {
                let (is_back, is_forward) = {
                    let history = self.history.borrow();
                    (
                        history.previous().is_some_and(|e| e.path == path),
                        history.next().is_some_and(|e| e.path == path),
                    )
                };
                if is_back {
                    self.process(Request::Back)
                } else if is_forward {
                    self.process(Request::Forward)
                } else {
                    self.process(Request::Navigate {
                        path,
                        state: Value::Null,
                    })
                }
            }
        }
    }

    fn complete(&self, resolution: Resolution) -> NavOutcome {
        *self.current.borrow_mut() = resolution.clone();
        self.notify(&resolution);
        NavOutcome::from(resolution)
    }

    fn notify(&self, resolution: &Resolution) {
        // Snapshot so callbacks can subscribe or unsubscribe reentrantly.
        let subscribers: Vec<(SubscriptionId, Rc<ChangeCallback>)> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(id, callback)| (*id, callback.clone()))
            .collect();

        for (id, callback) in subscribers {
            if catch_unwind(AssertUnwindSafe(|| callback(resolution))).is_err() {
                tracing::error!(subscriber = id.0, "Change subscriber panicked, continuing");
            }
        }
    }
}

/// The path reflected into history and the address bar: the post-redirect
/// resolved path on a match, the requested path verbatim otherwise.
fn shown_path(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Route(route) => route.path.clone(),
        Resolution::NoMatch { path } => path.clone(),
    }
}

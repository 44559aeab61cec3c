//! Workload definition and route resolution.

use serde::{Deserialize, Serialize};

use crate::context::{Method, RouteParams};
use crate::route::RouteConfig;

/// Workload manifest - explicit configuration for a deployable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadManifest {
    /// Unique name for this workload.
    pub name: String,
    /// Semantic version.
    pub version: String,
    /// Routes this workload handles, matched in order.
    pub routes: Vec<RouteConfig>,
}

/// Outcome of resolving a request against a manifest.
#[derive(Debug, PartialEq)]
pub enum RouteMatch<'a> {
    /// A route accepts this method and path.
    Found {
        route: &'a RouteConfig,
        params: RouteParams,
    },
    /// The path exists but not for this method.
    MethodNotAllowed,
    /// No route matches the path.
    NotFound,
}

impl WorkloadManifest {
    /// Create a new workload manifest.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            routes: Vec::new(),
        }
    }

    /// Add a route to this workload.
    pub fn with_route(mut self, route: RouteConfig) -> Self {
        self.routes.push(route);
        self
    }

    /// Find the first route matching `method` and `path`.
    ///
    /// Static routes must be registered before parameterised routes that
    /// would shadow them.
    pub fn resolve(&self, method: Method, path: &str) -> RouteMatch<'_> {
        let mut path_seen = false;
        for route in &self.routes {
            if let Some(params) = route.match_path(path) {
                if route.allows(method) {
                    return RouteMatch::Found { route, params };
                }
                path_seen = true;
            }
        }
        if path_seen {
            RouteMatch::MethodNotAllowed
        } else {
            RouteMatch::NotFound
        }
    }
}

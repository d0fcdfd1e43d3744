//! Router core module - route table and request-time lookup.

use http::Method;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::trie::TrieNode;

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The registered pattern that matched (e.g. `/user/:id`)
    pub pattern: String,
    /// Captured parameters (e.g. `:id` → `{"id": "42"}`)
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    /// Get a captured parameter by name
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Route table with one segment trie per HTTP method
///
/// Built during setup and read-only afterwards: lookups take `&self` and need
/// no locking, registration takes `&mut self`.
#[derive(Clone, Default)]
pub struct Router {
    roots: HashMap<Method, TrieNode>,
}

/// Split a route pattern into segments.
///
/// Empty segments are skipped and nothing after the first catch-all segment
/// is returned: `/assets/*filepath/x` yields `["assets", "*filepath"]`. The
/// trie node still records the pattern exactly as registered.
#[must_use]
pub fn parse_pattern(pattern: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for item in pattern.split('/').filter(|s| !s.is_empty()) {
        parts.push(item);
        if item.starts_with('*') {
            break;
        }
    }
    parts
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` under `method`.
    ///
    /// Registering the same pattern twice is harmless; a pattern that lands on
    /// a node already owned by another pattern replaces it (see the module docs
    /// of the trie for when wildcards absorb literal segments).
    pub fn add_route(&mut self, method: Method, pattern: &str) {
        let parts = parse_pattern(pattern);
        debug!(method = %method, pattern = %pattern, segments = parts.len(), "Route inserted");
        self.roots
            .entry(method)
            .or_default()
            .insert(pattern, &parts, 0);
    }

    /// Match a request to a registered route.
    ///
    /// Returns `None` when the method has no routes or no pattern matches the
    /// path; callers answer that with a 404.
    #[must_use]
    pub fn get_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let Some(root) = self.roots.get(method) else {
            warn!(method = %method, path = %path, "No routes registered for method");
            return None;
        };

        let search_parts = split_path(path);
        let Some(node) = root.search(&search_parts, 0) else {
            debug!(method = %method, path = %path, "No route matched");
            return None;
        };

        let mut params = HashMap::new();
        for (index, part) in parse_pattern(node.pattern()).into_iter().enumerate() {
            if let Some(name) = part.strip_prefix(':') {
                if let Some(value) = search_parts.get(index) {
                    params.insert(name.to_string(), (*value).to_string());
                }
            } else if let Some(name) = part.strip_prefix('*') {
                if !name.is_empty() {
                    let rest = search_parts.get(index..).unwrap_or_default();
                    params.insert(name.to_string(), rest.join("/"));
                }
                break;
            }
        }

        debug!(
            method = %method,
            path = %path,
            route_pattern = %node.pattern(),
            path_params = ?params,
            "Route matched"
        );

        Some(RouteMatch {
            pattern: node.pattern().to_string(),
            params,
        })
    }

    /// Every node registered under `method`, depth first in insertion order
    #[must_use]
    pub fn get_routes(&self, method: &Method) -> Vec<&TrieNode> {
        let mut list = Vec::new();
        if let Some(root) = self.roots.get(method) {
            root.travel(&mut list);
        }
        list
    }

    /// `(method, pattern)` for every registered route, methods sorted by name
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut methods: Vec<&Method> = self.roots.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        methods
            .into_iter()
            .flat_map(|method| {
                self.get_routes(method)
                    .into_iter()
                    .map(move |node| (method.clone(), node.pattern().to_string()))
            })
            .collect()
    }

    /// Log the route table, one line per route
    pub fn dump_routes(&self) {
        let routes = self.routes();
        info!(routes_count = routes.len(), "Routing table");
        for (method, pattern) in routes {
            info!(method = %method, pattern = %pattern, "Route");
        }
    }
}

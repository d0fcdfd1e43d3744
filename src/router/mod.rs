//! # Router Module
//!
//! Path matching and route resolution for cweb. Routes are stored in one
//! segment trie per HTTP method and looked up segment by segment.
//!
//! ## Pattern syntax
//!
//! - `/users` - static segment, matched exactly
//! - `/users/:id` - named capture, binds exactly one segment to `id`
//! - `/assets/*filepath` - catch-all, binds the rest of the path to `filepath`
//!
//! ## Example
//!
//! ```rust
//! use cweb::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.add_route(Method::GET, "/users/:id");
//! router.add_route(Method::GET, "/assets/*filepath");
//!
//! let m = router.get_route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(m.pattern, "/users/:id");
//! assert_eq!(m.param("id"), Some("42"));
//!
//! let m = router.get_route(&Method::GET, "/assets/css/a.css").unwrap();
//! assert_eq!(m.param("filepath"), Some("css/a.css"));
//!
//! assert!(router.get_route(&Method::GET, "/users/42/x").is_none());
//! ```
//!
//! ## Matching rules
//!
//! Lookups are depth first over the children that accept a segment, in the
//! order they were registered; the first subtree that reaches a registered
//! pattern wins. There is no scoring, so insertion order decides between a
//! literal and a wildcard at the same depth.

mod core;
mod trie;
#[cfg(test)]
mod tests;

pub use core::{parse_pattern, RouteMatch, Router};
pub use trie::TrieNode;

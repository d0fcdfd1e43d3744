use super::{parse_pattern, Router};
use http::Method;

fn new_test_router() -> Router {
    let mut r = Router::new();
    r.add_route(Method::GET, "/");
    r.add_route(Method::GET, "/hello/:name");
    r.add_route(Method::GET, "/hello/b/c");
    r.add_route(Method::GET, "/hi/:name");
    r.add_route(Method::GET, "/assets/*filepath");
    r
}

#[test]
fn test_parse_pattern() {
    assert_eq!(parse_pattern("/p/:name"), vec!["p", ":name"]);
    assert_eq!(parse_pattern("/p/*"), vec!["p", "*"]);
    assert_eq!(parse_pattern("/p/*name/*"), vec!["p", "*name"]);
    assert_eq!(parse_pattern("//p///q/"), vec!["p", "q"]);
    assert!(parse_pattern("/").is_empty());
}

#[test]
fn test_get_route_named() {
    let r = new_test_router();
    let m = r.get_route(&Method::GET, "/hello/geektutu").unwrap();
    assert_eq!(m.pattern, "/hello/:name");
    assert_eq!(m.param("name"), Some("geektutu"));
}

#[test]
fn test_get_route_root() {
    let r = new_test_router();
    let m = r.get_route(&Method::GET, "/").unwrap();
    assert_eq!(m.pattern, "/");
    assert!(m.params.is_empty());
}

#[test]
fn test_get_route_catch_all() {
    let r = new_test_router();
    let m = r.get_route(&Method::GET, "/assets/file1.txt").unwrap();
    assert_eq!(m.pattern, "/assets/*filepath");
    assert_eq!(m.param("filepath"), Some("file1.txt"));

    let m = r.get_route(&Method::GET, "/assets/css/test.css").unwrap();
    assert_eq!(m.param("filepath"), Some("css/test.css"));
}

#[test]
fn test_catch_all_needs_a_segment() {
    let r = new_test_router();
    assert!(r.get_route(&Method::GET, "/assets").is_none());
    assert!(r.get_route(&Method::GET, "/assets/").is_none());
}

#[test]
fn test_bare_catch_all_binds_nothing() {
    let mut r = Router::new();
    r.add_route(Method::GET, "/files/*");
    let m = r.get_route(&Method::GET, "/files/a/b").unwrap();
    assert_eq!(m.pattern, "/files/*");
    assert!(m.params.is_empty());
}

#[test]
fn test_literal_below_wild_parent() {
    let r = new_test_router();
    // "b" was absorbed by ":name", so the literal route lives below the capture
    let m = r.get_route(&Method::GET, "/hello/b/c").unwrap();
    assert_eq!(m.pattern, "/hello/b/c");
    assert!(m.params.is_empty());

    let m = r.get_route(&Method::GET, "/hello/anyone/c").unwrap();
    assert_eq!(m.pattern, "/hello/b/c");
}

#[test]
fn test_unknown_method_is_no_match() {
    let r = new_test_router();
    assert!(r.get_route(&Method::POST, "/hello/x").is_none());
}

#[test]
fn test_intermediate_node_is_not_a_match() {
    let r = new_test_router();
    // "/hello" only exists as the parent of "/hello/:name"
    assert!(r.get_route(&Method::GET, "/hello").is_none());
}

#[test]
fn test_get_routes_lists_registered_patterns() {
    let r = new_test_router();
    let patterns: Vec<&str> = r
        .get_routes(&Method::GET)
        .into_iter()
        .map(|n| n.pattern())
        .collect();
    assert_eq!(
        patterns,
        vec![
            "/",
            "/hello/:name",
            "/hello/b/c",
            "/hi/:name",
            "/assets/*filepath"
        ]
    );
    assert!(r.get_routes(&Method::DELETE).is_empty());
}

#[test]
fn test_routes_sorted_by_method() {
    let mut r = Router::new();
    r.add_route(Method::POST, "/login");
    r.add_route(Method::GET, "/");
    r.add_route(Method::DELETE, "/item/:id");

    let routes = r.routes();
    assert_eq!(
        routes,
        vec![
            (Method::DELETE, "/item/:id".to_string()),
            (Method::GET, "/".to_string()),
            (Method::POST, "/login".to_string()),
        ]
    );
}

#[test]
fn test_methods_have_disjoint_trees() {
    let mut r = Router::new();
    r.add_route(Method::GET, "/x/:id");
    r.add_route(Method::POST, "/x/literal");

    assert_eq!(r.get_route(&Method::GET, "/x/literal").unwrap().pattern, "/x/:id");
    assert_eq!(
        r.get_route(&Method::POST, "/x/literal").unwrap().pattern,
        "/x/literal"
    );
    assert!(r.get_route(&Method::POST, "/x/other").is_none());
}

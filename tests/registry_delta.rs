//! Change tracking of the host registry across rebuild cycles.

use ingress_registry::backends::Backends;
use ingress_registry::hosts::{Hosts, DEFAULT_HOST};
use ingress_registry::MatchType;

mod common;

/// Rebuild `a.com` the way a config reparse would.
fn build_a(hosts: &mut Hosts, backends: &mut Backends, extra_path: bool) {
    let host = hosts.acquire("a.com");
    host.add_path(Some(backends.acquire("default", "api", "8080")), "/api", MatchType::Prefix);
    host.add_path(Some(backends.acquire("default", "web", "80")), "/", MatchType::Prefix);
    if extra_path {
        host.add_path(None, "/static", MatchType::Begin);
    }
    host.tls.tls_filename = "/certs/a.pem".to_string();
    host.tls.tls_hash = "5d41402a".to_string();
}

#[test]
fn test_spec_example_path_order() {
    let mut backends = Backends::new();
    let mut hosts = Hosts::new();
    build_a(&mut hosts, &mut backends, false);

    let paths: Vec<&str> = hosts
        .find("a.com")
        .unwrap()
        .paths()
        .iter()
        .map(|p| p.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/api", "/"]);
}

#[test]
fn test_reparse_without_change_is_not_reported() {
    let mut backends = Backends::new();
    let mut hosts = Hosts::new();
    build_a(&mut hosts, &mut backends, false);
    hosts.acquire("b.com");
    hosts.shrink();
    hosts.commit();

    hosts.remove_all(["a.com"]);
    build_a(&mut hosts, &mut backends, false);
    hosts.shrink();

    assert!(!hosts.changed());
    assert_eq!(hosts.len(), 2);
    // backend reverse index wasn't duplicated by the reparse
    let web = backends.acquire("default", "web", "80");
    assert_eq!(web.paths().len(), 1);
}

#[test]
fn test_reparse_with_change_is_reported() {
    let mut backends = Backends::new();
    let mut hosts = Hosts::new();
    build_a(&mut hosts, &mut backends, false);
    hosts.commit();

    hosts.remove_all(["a.com"]);
    build_a(&mut hosts, &mut backends, true);
    hosts.shrink();

    assert!(hosts.changed());
    assert_eq!(common::sorted(hosts.items_add()), vec!["a.com"]);
    assert_eq!(common::sorted(hosts.items_del()), vec!["a.com"]);
    assert_eq!(hosts.find("a.com").unwrap().paths().len(), 3);

    hosts.commit();
    assert!(!hosts.changed());
    assert_eq!(hosts.find("a.com").unwrap().paths().len(), 3);
}

#[test]
fn test_commit_lifecycle() {
    let mut hosts = Hosts::new();
    hosts.commit();
    assert!(hosts.has_commit());

    hosts.acquire("x");
    hosts.shrink();
    assert!(hosts.changed());
    hosts.commit();
    assert!(!hosts.changed());
    assert!(hosts.has_commit());
}

#[test]
fn test_no_duplicates_after_mixed_cycle() {
    let mut hosts = Hosts::new();
    for hostname in ["a.com", "b.com", "c.com"] {
        hosts.acquire(hostname);
    }
    hosts.commit();

    hosts.remove_all(["a.com", "b.com", "zzz.com"]);
    hosts.acquire("a.com");
    hosts.acquire("a.com");
    hosts.acquire("d.com");
    hosts.remove_all(["d.com"]);
    hosts.shrink();

    assert_eq!(common::sorted(hosts.items()), vec!["a.com", "c.com"]);
    assert_eq!(common::sorted(hosts.items_del()), vec!["b.com"]);
    assert!(hosts.items_add().next().is_none());
}

#[test]
fn test_default_host_is_a_regular_entry() {
    let mut hosts = Hosts::new();
    hosts.acquire(DEFAULT_HOST).add_path(None, "/", MatchType::Begin);
    hosts.acquire("a.com");

    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts.build_sorted_items().unwrap().len(), 1);
    assert_eq!(hosts.default_host().unwrap().paths().len(), 1);

    hosts.remove_all([DEFAULT_HOST]);
    assert!(hosts.default_host().is_none());
}

#[test]
fn test_passthrough_aggregate_across_cycles() {
    let mut hosts = Hosts::new();
    hosts.acquire("a.com").set_ssl_passthrough(true);
    hosts.acquire("b.com");
    hosts.commit();
    assert!(hosts.has_ssl_passthrough());

    // reparse drops the flag
    hosts.remove_all(["a.com"]);
    hosts.acquire("a.com");
    hosts.shrink();
    assert!(hosts.changed());
    assert!(!hosts.has_ssl_passthrough());

    // and a later reparse restores it
    hosts.commit();
    hosts.remove_all(["a.com"]);
    hosts.acquire("a.com").set_ssl_passthrough(true);
    hosts.shrink();
    assert_eq!(hosts.ssl_passthrough_count(), 1);
}

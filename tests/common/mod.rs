//! Shared utilities for integration tests.

use ingress_registry::config::{BackendRef, HostConfig, PathConfig, RegistryConfig};
use ingress_registry::MatchType;

/// A path routed to `default/<service>:80`.
#[allow(dead_code)]
pub fn path_to(path: &str, service: &str) -> PathConfig {
    PathConfig {
        path: path.to_string(),
        match_type: MatchType::Prefix,
        backend: Some(BackendRef {
            namespace: "default".to_string(),
            name: service.to_string(),
            port: "80".to_string(),
        }),
    }
}

/// A host with the given paths and no flags.
#[allow(dead_code)]
pub fn host(hostname: &str, paths: Vec<PathConfig>) -> HostConfig {
    HostConfig {
        hostname: hostname.to_string(),
        paths,
        ..Default::default()
    }
}

/// A snapshot made of the given hosts.
#[allow(dead_code)]
pub fn snapshot(hosts: Vec<HostConfig>) -> RegistryConfig {
    RegistryConfig {
        hosts,
        ..Default::default()
    }
}

/// Hostnames of a registry view, sorted.
#[allow(dead_code)]
pub fn sorted<'a>(iter: impl Iterator<Item = (&'a str, &'a ingress_registry::Host)>) -> Vec<String> {
    let mut names: Vec<String> = iter.map(|(hostname, _)| hostname.to_string()).collect();
    names.sort();
    names
}

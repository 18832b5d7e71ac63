//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject duplicated hostnames and duplicated paths within a host
//! - Validate backend references and observability values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RegistryConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::{HostConfig, RegistryConfig};
use crate::hosts::MatchType;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("host #{index} has an empty hostname")]
    EmptyHostname { index: usize },

    #[error("hostname {hostname} is declared more than once")]
    DuplicateHostname { hostname: String },

    #[error("host {hostname} has an empty path")]
    EmptyPath { hostname: String },

    #[error("path {path} of host {hostname} must start with '/'")]
    RelativePath { hostname: String, path: String },

    #[error("path {path} of host {hostname} is declared more than once")]
    DuplicatePath { hostname: String, path: String },

    #[error("path {path} of host {hostname} references a backend without {field}")]
    IncompleteBackend {
        hostname: String,
        path: String,
        field: &'static str,
    },

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut hostnames = HashSet::new();
    for (index, host) in config.hosts.iter().enumerate() {
        if host.hostname.is_empty() {
            errors.push(ValidationError::EmptyHostname { index });
            continue;
        }
        if !hostnames.insert(host.hostname.as_str()) {
            errors.push(ValidationError::DuplicateHostname {
                hostname: host.hostname.clone(),
            });
        }
        validate_paths(host, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_paths(host: &HostConfig, errors: &mut Vec<ValidationError>) {
    let mut paths = HashSet::new();
    for path in &host.paths {
        if path.path.is_empty() {
            errors.push(ValidationError::EmptyPath {
                hostname: host.hostname.clone(),
            });
            continue;
        }
        if path.match_type != MatchType::Regex && !path.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                hostname: host.hostname.clone(),
                path: path.path.clone(),
            });
        }
        // the registry doesn't deduplicate paths
        if !paths.insert(path.path.as_str()) {
            errors.push(ValidationError::DuplicatePath {
                hostname: host.hostname.clone(),
                path: path.path.clone(),
            });
        }
        if let Some(backend) = &path.backend {
            let missing = if backend.name.is_empty() {
                Some("name")
            } else if backend.port.is_empty() {
                Some("port")
            } else {
                None
            };
            if let Some(field) = missing {
                errors.push(ValidationError::IncompleteBackend {
                    hostname: host.hostname.clone(),
                    path: path.path.clone(),
                    field,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{BackendRef, PathConfig};

    fn path(p: &str) -> PathConfig {
        PathConfig {
            path: p.to_string(),
            match_type: MatchType::Begin,
            backend: None,
        }
    }

    fn host(hostname: &str, paths: Vec<PathConfig>) -> HostConfig {
        HostConfig {
            hostname: hostname.to_string(),
            paths,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RegistryConfig::default();
        config.hosts.push(host("a.com", vec![path("/"), path("/api")]));
        config.hosts.push(host("b.com", vec![path("/")]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RegistryConfig::default();
        config.observability.log_level = "verbose".to_string();
        config.hosts.push(host("", vec![]));
        config.hosts.push(host("a.com", vec![path("/"), path("/")]));
        config.hosts.push(host("a.com", vec![path("api")]));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::UnknownLogLevel("verbose".into())));
        assert!(errors.contains(&ValidationError::EmptyHostname { index: 0 }));
        assert!(errors.contains(&ValidationError::DuplicatePath {
            hostname: "a.com".into(),
            path: "/".into(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateHostname {
            hostname: "a.com".into(),
        }));
        assert!(errors.contains(&ValidationError::RelativePath {
            hostname: "a.com".into(),
            path: "api".into(),
        }));
    }

    #[test]
    fn test_regex_path_may_be_relative() {
        let mut config = RegistryConfig::default();
        let mut p = path("^/api/v[0-9]+");
        p.match_type = MatchType::Regex;
        config.hosts.push(host("a.com", vec![p]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_incomplete_backend() {
        let mut config = RegistryConfig::default();
        let mut p = path("/");
        p.backend = Some(BackendRef {
            namespace: "default".into(),
            name: "web".into(),
            port: String::new(),
        });
        config.hosts.push(host("a.com", vec![p]));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("without port"));
    }
}

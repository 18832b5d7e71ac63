//! Ingress host registry.
//!
//! In-memory registry of virtual hosts and their routing rules, rebuilt on
//! every configuration cycle, with the bookkeeping needed to report only the
//! hosts that really changed since the last proxy reload.

// Core
pub mod backends;
pub mod hosts;

// Driver
pub mod config;
pub mod sync;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::RegistryConfig;
pub use hosts::{Host, HostPath, Hosts, MatchType, PathLink};
pub use sync::{ChangeSet, Converter, ReloadKind};

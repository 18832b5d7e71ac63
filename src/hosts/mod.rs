//! Host registry subsystem.
//!
//! # Data Flow
//! ```text
//! Sync cycle (one per configuration change):
//!     remove_all(reparsed hostnames)
//!     → acquire(hostname) + add_path / flags for every desired host
//!     → shrink() cancels add/remove pairs with identical content
//!     → items_add() / items_del() drive the proxy reload
//!     → commit() closes the cycle
//! ```
//!
//! # Design Decisions
//! - The registry is the sole owner of hosts
//! - Hosts reach registry aggregates through a weak handle only
//! - Paths are ordered by descending path so sub-paths never shadow longer ones
//! - Lookups return `Option`; nothing in this module fails

pub mod host;
pub mod link;
pub mod registry;

pub use host::{Host, HostAlias, HostBackend, HostPath, HostTlsConfig, MatchType, ERROR_404_BACKEND};
pub use link::PathLink;
pub use registry::{Hosts, DEFAULT_HOST};

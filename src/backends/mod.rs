//! Backend subsystem.
//!
//! # Data Flow
//! ```text
//! Sync cycle reads a path's backend reference
//!     → pool.rs (find or create the backend)
//!     → Host::add_path snapshots it into a HostBackend
//!     → backend.rs records the PathLink in its reverse index
//! ```
//!
//! # Design Decisions
//! - Hosts keep value snapshots, never references, of backends
//! - Backend lifecycle belongs to the caller; the pool is rebuilt per cycle

pub mod backend;
pub mod pool;

pub use backend::{Backend, BackendId};
pub use pool::Backends;

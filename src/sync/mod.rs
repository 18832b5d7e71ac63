//! Sync cycle subsystem.
//!
//! # Data Flow
//! ```text
//! RegistryConfig snapshot
//!     → converter.rs (remove + reacquire every host, shrink)
//!     → change.rs (ChangeSet: added / removed / updated + ReloadKind)
//!     → caller reloads the proxy
//!     → Converter::commit closes the cycle
//! ```
//!
//! # Design Decisions
//! - One converter per registry; cycles never overlap
//! - A failed reload simply skips `commit`, so the next cycle reports the
//!   accumulated delta

pub mod change;
pub mod converter;

pub use change::{ChangeSet, ReloadKind};
pub use converter::Converter;

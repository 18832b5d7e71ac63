//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop the watch loop
//!     SIGHUP → reload the desired state and resync
//! ```
//!
//! # Design Decisions
//! - The watch loop owns the registry; signals only produce events
//! - A sync cycle in progress always runs to completion

pub mod signals;

pub use signals::{SignalEvent, SignalListener};

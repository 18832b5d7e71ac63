//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! desired-state file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RegistryConfig (validated, immutable)
//!     → sync::Converter applies it to the host registry
//!
//! On change (watch mode):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → snapshot sent to the sync loop over a channel
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes go through a new sync cycle
//! - All optional fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::RegistryConfig;
pub use schema::HostConfig;
pub use schema::PathConfig;
pub use schema::BackendRef;
pub use schema::{LogFormat, ObservabilityConfig};

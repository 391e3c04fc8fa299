//! The incident domain: entities, policies, ports and errors.
//!
//! Nothing in this crate performs I/O; services and adapters build on it.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;

//! Server core functionality
//!
//! The accept loop of the query service.

pub mod core;

pub use self::core::Server;

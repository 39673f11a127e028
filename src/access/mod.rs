//! Access control
//!
//! Per-directory access declarations and the upward search that finds the
//! one in force.

pub mod declaration;
pub mod permissions;

pub use declaration::{ALL, PermissionSet, parse_declaration};
pub use permissions::{Access, PermissionResolver};

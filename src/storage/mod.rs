//! File system storage access
//!
//! Handles extension expansion, metadata lookups and path validation.

pub mod extensions;
pub mod filesystem;
pub mod validation;

pub use extensions::ExtensionResolver;
pub use validation::{is_within_root, normalize_lexically, normalize_logical_path};

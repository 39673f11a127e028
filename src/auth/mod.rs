//! Principals and roles
//!
//! Represents who a page is being resolved for.

pub mod directory;
pub mod principal;

pub use directory::{PersonDirectory, PersonRecord};
pub use principal::{ANONYMOUS, Principal};

//! Course page server
//!
//! Resolves logical page paths to files and folders under a course tree and
//! decides whether a principal may read or write them.

pub mod access;
pub mod auth;
pub mod client;
pub mod config;
pub mod course;
pub mod error;
pub mod page;
pub mod protocol;
pub mod server;
pub mod storage;

pub use access::{Access, PermissionResolver, PermissionSet};
pub use auth::Principal;
pub use config::ResolverConfig;
pub use course::{Course, CourseCatalog, CourseRegistry};
pub use error::{CourseError, PageError, PermissionError};
pub use page::{PageKind, PageResolver, PageTarget, RequestContext};
pub use server::Server;

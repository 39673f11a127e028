//! Pages
//!
//! A page is both a URL and a file or folder under the configured root.

pub mod context;
pub mod resolver;
pub mod target;
pub mod time;

pub use context::RequestContext;
pub use resolver::{PageResolver, basename};
pub use target::{PageKind, PageTarget};

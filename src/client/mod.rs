//! Client management
//!
//! Handles client connections, session state, and session lifecycle.

pub mod handler;
pub mod registry;
pub mod session;

pub use handler::{ClientContext, handle_client};
pub use registry::ClientRegistry;
pub use session::Session;

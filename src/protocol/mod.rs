//! Query-service protocol
//!
//! Handles command parsing, dispatch, and response generation.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus};
pub use handlers::{handle_cmd_page, handle_command};
pub use parser::parse_command;

//! Module `commands`
//!
//! Defines the query-service commands and their results.

/// A command received from a client.
///
/// Commands that require arguments store them in their variants.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Act as the named principal
    User(String),
    /// Act as the anonymous principal
    Anon,
    WhoAmI,
    /// Set the request context host and scheme
    Host { host: String, secure: bool },
    /// Drop the request context
    Clear,
    /// Resolve a logical path
    Page(String),
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message),
        }
    }

    pub fn failure(reason: &str, message: String) -> Self {
        Self {
            status: CommandStatus::Failure(reason.to_string()),
            message: Some(message),
        }
    }
}

//! Command handlers for the query service.
//!
//! Session commands only touch the client's [`Session`]; `PAGE` runs a full
//! resolution and is called off the async runtime by the client handler.

use log::{info, warn};

use crate::auth::{PersonDirectory, Principal};
use crate::client::Session;
use crate::error::handlers::error_to_status_code;
use crate::page::{PageResolver, RequestContext};
use crate::protocol::responses::{
    GOODBYE, OK, UNKNOWN_COMMAND, format_page, format_response,
};
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a session command.
///
/// `PAGE` is not handled here; see [`handle_cmd_page`].
pub fn handle_command(
    session: &mut Session,
    command: &Command,
    people: &PersonDirectory,
) -> CommandResult {
    match command {
        Command::Quit => handle_cmd_quit(session),
        Command::User(username) => handle_cmd_user(session, username, people),
        Command::Anon => handle_cmd_anon(session),
        Command::WhoAmI => handle_cmd_whoami(session),
        Command::Host { host, secure } => handle_cmd_host(session, host, *secure),
        Command::Clear => handle_cmd_clear(session),
        Command::Page(_) => CommandResult::failure(
            "Page lookups are asynchronous",
            format_response(UNKNOWN_COMMAND, "PAGE must be dispatched by the client handler"),
        ),
        Command::Unknown(raw) => handle_cmd_unknown(raw),
    }
}

fn handle_cmd_quit(session: &mut Session) -> CommandResult {
    session.reset();

    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(GOODBYE, "Goodbye")),
    }
}

fn handle_cmd_user(session: &mut Session, username: &str, people: &PersonDirectory) -> CommandResult {
    let principal = people.principal(username);
    let message = match &principal {
        Principal::User { roles, .. } if !roles.is_empty() => {
            format!("Acting as {} (roles: {})", username, roles.join(","))
        }
        _ => format!("Acting as {}", username),
    };
    session.set_principal(principal);
    CommandResult::success(format_response(OK, &message))
}

fn handle_cmd_anon(session: &mut Session) -> CommandResult {
    session.set_principal(Principal::Anonymous);
    CommandResult::success(format_response(OK, "Acting as anonymous"))
}

fn handle_cmd_whoami(session: &Session) -> CommandResult {
    CommandResult::success(format_response(OK, session.principal().username()))
}

fn handle_cmd_host(session: &mut Session, host: &str, secure: bool) -> CommandResult {
    session.set_host(host.to_string(), secure);
    let scheme = if secure { "https" } else { "http" };
    CommandResult::success(format_response(OK, &format!("Host set to {} ({})", host, scheme)))
}

fn handle_cmd_clear(session: &mut Session) -> CommandResult {
    session.clear_host();
    CommandResult::success(format_response(OK, "Request context cleared"))
}

fn handle_cmd_unknown(raw: &str) -> CommandResult {
    CommandResult::failure(
        "Unknown command",
        format_response(UNKNOWN_COMMAND, &format!("Unknown command: {}", raw)),
    )
}

/// Resolves `path` and formats the page, or the error with its reply code.
pub fn handle_cmd_page(
    resolver: &PageResolver,
    path: &str,
    principal: &Principal,
    context: Option<&RequestContext>,
) -> CommandResult {
    match resolver.resolve(path, principal, context) {
        Ok(page) => {
            info!("Page {} resolved as {}", path, page);
            CommandResult::success(format_page(&page))
        }
        Err(e) => {
            warn!("Failed to resolve {:?}: {}", path, e);
            CommandResult::failure(
                "Resolution failed",
                format_response(error_to_status_code(&e), &e.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PersonRecord;

    fn people() -> PersonDirectory {
        PersonDirectory::from_records(vec![PersonRecord {
            username: "mahoney".into(),
            roles: vec!["faculty".into()],
        }])
    }

    #[test]
    fn test_user_and_anon() {
        let mut session = Session::default();
        let result = handle_command(&mut session, &Command::User("mahoney".into()), &people());
        assert_eq!(result.status, CommandStatus::Success);
        assert_eq!(
            result.message.as_deref(),
            Some("200 Acting as mahoney (roles: faculty)\r\n")
        );
        assert_eq!(
            session.principal(),
            &Principal::with_roles("mahoney", &["faculty"])
        );

        handle_command(&mut session, &Command::Anon, &people());
        assert!(session.principal().is_anonymous());
    }

    #[test]
    fn test_host_and_clear() {
        let mut session = Session::default();
        let host = Command::Host {
            host: "localhost:8443".into(),
            secure: true,
        };
        handle_command(&mut session, &host, &people());
        assert!(session.request_context("demo/home").unwrap().is_secure);

        handle_command(&mut session, &Command::Clear, &people());
        assert!(session.request_context("demo/home").is_none());
    }

    #[test]
    fn test_quit_closes_connection() {
        let mut session = Session::default();
        let result = handle_command(&mut session, &Command::Quit, &people());
        assert_eq!(result.status, CommandStatus::CloseConnection);
        assert_eq!(result.message.as_deref(), Some("221 Goodbye\r\n"));
    }

    #[test]
    fn test_unknown() {
        let mut session = Session::default();
        let result = handle_command(&mut session, &Command::Unknown("FOO".into()), &people());
        assert_eq!(
            result.message.as_deref(),
            Some("502 Unknown command: FOO\r\n")
        );
    }
}

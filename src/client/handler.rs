//! Client session handler
//!
//! Reads command lines from one connection and writes replies.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::auth::PersonDirectory;
use crate::client::ClientRegistry;
use crate::config::StartupConfig;
use crate::page::PageResolver;
use crate::protocol::responses::{
    COMMAND_TOO_LONG, INTERNAL_ERROR, SERVICE_UNAVAILABLE, format_response,
};
use crate::protocol::{
    Command, CommandResult, CommandStatus, handle_cmd_page, handle_command, parse_command,
};

/// Shared collaborators handed to every client task
#[derive(Clone)]
pub struct ClientContext {
    pub clients: Arc<Mutex<ClientRegistry>>,
    pub resolver: Arc<PageResolver>,
    pub people: Arc<PersonDirectory>,
    pub config: Arc<StartupConfig>,
}

/// Handles a client session using the Tokio runtime.
///
/// - Reads command lines with a `BufReader`, never buffering more than
///   `max_command_length + 1` bytes of one line.
/// - Session commands update the client's entry in the registry.
/// - `PAGE` lookups run on the blocking pool, outside the registry lock.
pub async fn handle_client(cmd_stream: TcpStream, client_addr: SocketAddr, ctx: ClientContext) {
    let (read_half, mut write_half) = cmd_stream.into_split();
    let mut reader = BufReader::new(read_half);
    let max_len = ctx.config.max_command_length;
    let mut buf = Vec::with_capacity(max_len + 1);

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(max_len as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await;
        match read {
            Ok(0) => {
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(_) => {
                if buf.len() > max_len {
                    warn!("Command from {} exceeds {} bytes", client_addr, max_len);
                    let reply = format_response(COMMAND_TOO_LONG, "Command too long");
                    if write_half.write_all(reply.as_bytes()).await.is_err() {
                        break;
                    }
                    if !buf.ends_with(b"\n") {
                        if let Err(e) = discard_line(&mut reader).await {
                            error!("Failed to read from {}: {}", client_addr, e);
                            break;
                        }
                    }
                    continue;
                }

                let line = String::from_utf8_lossy(&buf);
                let command = parse_command(&line);
                info!("Received from {}: {:?}", client_addr, &command);

                let result = match dispatch(&command, client_addr, &ctx).await {
                    Some(result) => result,
                    None => {
                        error!("Client {} not found in registry", client_addr);
                        let reply = format_response(SERVICE_UNAVAILABLE, "Client session not found");
                        let _ = write_half.write_all(reply.as_bytes()).await;
                        break;
                    }
                };

                if let Some(msg) = &result.message {
                    if let Err(e) = write_half.write_all(msg.as_bytes()).await {
                        error!("Failed to write to {}: {}", client_addr, e);
                        break;
                    }
                }

                match result.status {
                    CommandStatus::CloseConnection => {
                        info!("Client {} requested to quit", client_addr);
                        break;
                    }
                    CommandStatus::Failure(reason) => {
                        warn!("Command from {} failed: {}", client_addr, reason);
                    }
                    CommandStatus::Success => {}
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                break;
            }
        }
    }

    let mut clients = ctx.clients.lock().await;
    clients.remove(&client_addr);
    info!("Client {} disconnected", client_addr);
}

/// Skip input up to and including the next newline, holding at most one
/// buffer's worth of it.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let (consumed, found) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(consumed);
        if found {
            return Ok(());
        }
    }
}

/// Run one command; `None` if the client has no registered session.
async fn dispatch(
    command: &Command,
    client_addr: SocketAddr,
    ctx: &ClientContext,
) -> Option<CommandResult> {
    match command {
        Command::Page(path) => {
            let (principal, context) = {
                let clients = ctx.clients.lock().await;
                let session = clients.get(&client_addr)?;
                (session.principal().clone(), session.request_context(path))
            };

            let resolver = Arc::clone(&ctx.resolver);
            let path = path.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                handle_cmd_page(&resolver, &path, &principal, context.as_ref())
            })
            .await;

            Some(outcome.unwrap_or_else(|e| {
                error!("Page lookup task failed: {}", e);
                CommandResult::failure(
                    "Lookup task failed",
                    format_response(INTERNAL_ERROR, "Internal error"),
                )
            }))
        }
        _ => {
            let mut clients = ctx.clients.lock().await;
            let session = clients.get_mut(&client_addr)?;
            Some(handle_command(session, command, &ctx.people))
        }
    }
}

//! Query service accept loop

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::auth::PersonDirectory;
use crate::client::{ClientContext, ClientRegistry, Session, handle_client};
use crate::config::StartupConfig;
use crate::page::PageResolver;
use crate::protocol::responses::{READY, SERVICE_UNAVAILABLE, format_response};

pub struct Server {
    listener: TcpListener,
    ctx: ClientContext,
}

impl Server {
    /// Bind the service socket.
    pub async fn bind(
        config: StartupConfig,
        resolver: PageResolver,
        people: PersonDirectory,
    ) -> std::io::Result<Self> {
        let socket = config.service_socket();
        let listener = TcpListener::bind(&socket).await.map_err(|e| {
            error!("Failed to bind to {}: {}", socket, e);
            e
        })?;
        info!("Server bound to {}", listener.local_addr()?);

        let root = resolver.config().root();
        if !root.is_dir() {
            warn!("Course root {} is not a directory", root.display());
        } else {
            info!("Course root directory: {}", root.display());
        }

        Ok(Self {
            listener,
            ctx: ClientContext {
                clients: Arc::new(Mutex::new(ClientRegistry::default())),
                resolver: Arc::new(resolver),
                people: Arc::new(people),
                config: Arc::new(config),
            },
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting course page server on {} (max {} clients)",
            self.ctx.config.service_socket(),
            self.ctx.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let ctx = self.ctx.clone();

                    // One task per client so the accept loop never blocks
                    tokio::spawn(async move {
                        if let Err(e) = handle_new_client(stream, addr, ctx).await {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Greets and registers a new client, then hands off to the session handler.
async fn handle_new_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    ctx: ClientContext,
) -> Result<(), std::io::Error> {
    {
        let mut clients = ctx.clients.lock().await;

        if clients.len() >= ctx.config.max_clients {
            let reply =
                format_response(SERVICE_UNAVAILABLE, "Too many connections. Try again later.");
            stream.write_all(reply.as_bytes()).await?;
            return Ok(());
        }

        clients.insert(client_addr, Session::default());
        info!(
            "Registered client: {} ({}/{} clients)",
            client_addr,
            clients.len(),
            ctx.config.max_clients
        );
    }

    let greeting = format_response(READY, "Course page server ready");
    if let Err(e) = send_greeting(&mut stream, &greeting).await {
        ctx.clients.lock().await.remove(&client_addr);
        return Err(e);
    }

    handle_client(stream, client_addr, ctx).await;
    Ok(())
}

async fn send_greeting(stream: &mut TcpStream, greeting: &str) -> std::io::Result<()> {
    stream.write_all(greeting.as_bytes()).await?;
    stream.flush().await
}

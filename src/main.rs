//! Course Page Server - Entry Point
//!
//! Answers page lookups: which file or folder a logical path names, and who
//! may read or write it.

use log::info;
use std::process::ExitCode;
use std::sync::Arc;

use course_page_server::config::ServerConfig;
use course_page_server::error::PageServerError;
use course_page_server::error::handlers::handle_error;
use course_page_server::{PageResolver, Server};

#[tokio::main]
async fn main() -> ExitCode {
    // env_logger picks up RUST_LOG
    env_logger::init();

    info!("Launching course page server...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PageServerError> {
    let (startup, resolver_config, courses, people) = ServerConfig::load()?.split()?;
    info!(
        "Loaded {} courses and {} people",
        courses.len(),
        people.len()
    );

    let resolver = PageResolver::new(resolver_config, Arc::new(courses));
    let server = Server::bind(startup, resolver, people).await?;
    server.start().await;
    Ok(())
}

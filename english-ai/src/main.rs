//! # english-ai entry point
//!
//! Runs one of the english-ai gRPC servers:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Binding**: Starts the selected service, with server reflection, through
//!    [`english_ai_core::RpcServer`]. A port that cannot be bound aborts the process.
//! 3. **Self-test** (`ielts` only): Evaluates the built-in sample submission and prints it.
//! 4. **Serving**: Blocks until Ctrl-C, then drains in-flight calls and exits.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, ECHO_PORT, IELTS_PORT};
use echo_service::{EchoHandler, EchoServiceServer};
use english_ai_core::{RpcServer, ServerConfig};
use ielts_service::{IeltsEvaluation, IeltsServiceServer, RubricEvaluator, self_test};
use tonic::service::Routes;
use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level);

    match args.command {
        Commands::Echo { server } => serve_echo(server.config(ECHO_PORT)).await,
        Commands::Ielts {
            server,
            skip_self_test,
        } => serve_ielts(server.config(IELTS_PORT), skip_self_test).await,
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve_echo(config: ServerConfig) -> anyhow::Result<()> {
    let routes = Routes::new(EchoServiceServer::new(EchoHandler))
        .add_service(reflection_service(echo_service::FILE_DESCRIPTOR_SET)?);

    let handle = RpcServer::new(config, routes)
        .start()
        .await
        .context("Failed to start the echo server")?;

    handle
        .run_until(shutdown_signal())
        .await
        .context("Echo server failed")
}

async fn serve_ielts(config: ServerConfig, skip_self_test: bool) -> anyhow::Result<()> {
    let service = IeltsEvaluation::new(RubricEvaluator);
    let routes = Routes::new(IeltsServiceServer::new(service.clone()))
        .add_service(reflection_service(ielts_service::FILE_DESCRIPTOR_SET)?);

    let handle = RpcServer::new(config, routes)
        .start()
        .await
        .context("Failed to start the evaluation server")?;
    println!("Server starting on port {}...", handle.local_addr().port());

    if skip_self_test {
        tracing::info!("Startup self-test skipped");
    } else {
        self_test::run(&service, &mut std::io::stdout().lock())
            .context("Startup self-test failed")?;
    }

    handle
        .run_until(shutdown_signal())
        .await
        .context("Evaluation server failed")
}

fn reflection_service(
    descriptor_set: &'static [u8],
) -> anyhow::Result<ServerReflectionServer<impl ServerReflection>> {
    tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(descriptor_set)
        .build_v1()
        .context("Failed to build the reflection service")
}

/// Resolves on Ctrl-C. If the handler cannot be installed the server runs until killed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }

    tracing::info!("Ctrl-C received");
}

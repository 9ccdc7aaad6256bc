//! # CLI
//!
//! This module defines the command-line interface of `english-ai` using `clap`.
//!
//! Every flag is optional: `english-ai echo` and `english-ai ielts` alone serve on the default
//! ports with the default worker count.
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use clap::{Args, Parser, Subcommand};
use english_ai_core::{DEFAULT_MAX_WORKERS, ServerConfig};

/// Default port of `echo.EchoService`.
pub const ECHO_PORT: u16 = 50051;
/// Default port of `ielts.IELTSService`.
pub const IELTS_PORT: u16 = 50052;

#[derive(Parser)]
#[command(name = "english-ai", version, about = "gRPC servers of the english-ai backend")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve echo.EchoService
    ///
    /// ProcessData answers every input with "Processed: " followed by the input.
    Echo {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Serve ielts.IELTSService
    ///
    /// Once listening, the server evaluates a built-in sample submission and prints the
    /// response before serving traffic.
    Ielts {
        #[command(flatten)]
        server: ServerArgs,

        /// Do not run the startup self-test
        #[arg(long)]
        skip_self_test: bool,
    },
}

#[derive(Args)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V6(Ipv6Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on (50051 for echo, 50052 for ielts)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Maximum number of calls served at the same time
    #[arg(short = 'w', long, default_value_t = DEFAULT_MAX_WORKERS, value_parser = parse_max_workers)]
    pub max_workers: usize,
}

impl ServerArgs {
    pub fn config(&self, default_port: u16) -> ServerConfig {
        let addr = SocketAddr::new(self.host, self.port.unwrap_or(default_port));

        ServerConfig::new(addr.port())
            .with_addr(addr)
            .with_max_workers(self.max_workers)
    }
}

fn parse_max_workers(value: &str) -> Result<usize, String> {
    let workers: usize = value
        .parse()
        .map_err(|e| format!("Invalid worker count '{value}': {e}"))?;

    if workers == 0 {
        return Err("At least one worker is required".to_string());
    }

    Ok(workers)
}

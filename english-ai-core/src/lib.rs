//! # english-ai core
//!
//! Server bootstrap shared by the `echo` and `ielts` gRPC services.
//!
//! ## Key Components
//!
//! * **[`ServerConfig`]:** The address to bind and the number of calls that may run at once.
//! * **[`RpcServer`]:** Owns a config and a type-erased routing table. Starting it binds the
//!   listener and spawns the accept loop.
//! * **[`ServerHandle`]:** The owned handle of a running server, used to stop it and to wait
//!   for it to terminate.
//!
//! ## Re-exports
//!
//! This crate re-exports `tonic` so services and binaries build their [`tonic::service::Routes`]
//! against the same version the server runs.
pub mod server;

pub use server::{DEFAULT_MAX_WORKERS, RpcServer, ServerConfig, ServerError, ServerHandle};

// Re-exports
pub use tonic;

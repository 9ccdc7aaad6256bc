//! # Server bootstrap
//!
//! Binds a plaintext HTTP/2 listener, wires a [`Routes`] table behind a global concurrency
//! limit and runs the accept loop on the Tokio runtime.
//!
//! ## Lifecycle
//!
//! 1. [`RpcServer::start`] binds the socket. A taken port is reported immediately as
//!    [`ServerError::Bind`], nothing is retried.
//! 2. The returned [`ServerHandle`] keeps the shutdown trigger and the server task.
//! 3. [`ServerHandle::stop`] asks the server to drain; [`ServerHandle::await_termination`]
//!    waits until it is gone.
use std::future::Future;
use std::io;
use std::net::{Ipv6Addr, SocketAddr};

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::service::Routes;
use tonic::transport::Server;
use tower::limit::GlobalConcurrencyLimitLayer;

/// Number of calls served concurrently when the config does not say otherwise.
pub const DEFAULT_MAX_WORKERS: usize = 10;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind '{addr}': '{source}'")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read the bound address: '{0}'")]
    LocalAddr(#[source] io::Error),
    #[error("Transport error: '{0}'")]
    Transport(#[from] tonic::transport::Error),
    #[error("Server task failed: '{0}'")]
    Join(#[from] JoinError),
}

/// Where to listen and how many calls to run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_workers: usize,
}

impl ServerConfig {
    /// Listen on every interface (`[::]`) at `port` with [`DEFAULT_MAX_WORKERS`].
    pub fn new(port: u16) -> Self {
        Self {
            addr: SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// A limit of zero would never admit a call, so it is raised to one.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }
}

/// A gRPC server that has not been started yet.
pub struct RpcServer {
    config: ServerConfig,
    routes: Routes,
}

impl RpcServer {
    pub fn new(config: ServerConfig, routes: Routes) -> Self {
        Self { config, routes }
    }

    /// Binds the listener and spawns the server onto the current Tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(ServerHandle)` - The server is accepting connections.
    /// * `Err(ServerError::Bind)` - The address is taken or not permitted.
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let Self { config, routes } = self;

        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.addr,
                source,
            })?;

        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tracing::info!(
            addr = %local_addr,
            max_workers = config.max_workers,
            "gRPC server listening"
        );

        let task = tokio::spawn(async move {
            Server::builder()
                .layer(GlobalConcurrencyLimitLayer::new(config.max_workers))
                .add_routes(routes)
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    // A dropped sender means the handle is gone, which also ends the server.
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// The owned handle of a running server.
///
/// Dropping the handle shuts the server down.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), tonic::transport::Error>>,
}

impl ServerHandle {
    /// The address actually bound, useful when the config asked for port `0`.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Asks the server to stop accepting connections and drain in-flight calls.
    ///
    /// Calling it more than once has no further effect.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            tracing::info!(addr = %self.local_addr, "gRPC server stopping");
            let _ = shutdown.send(());
        }
    }

    /// Waits until the server task has finished.
    ///
    /// Without a prior [`stop`](Self::stop) this only returns if the server fails.
    pub async fn await_termination(self) -> Result<(), ServerError> {
        self.task.await??;
        tracing::info!(addr = %self.local_addr, "gRPC server terminated");
        Ok(())
    }

    /// Serves until `signal` resolves, then stops and waits for termination.
    ///
    /// Returns early if the server ends on its own.
    pub async fn run_until<F>(mut self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let finished = tokio::select! {
            _ = signal => None,
            result = &mut self.task => Some(result),
        };

        match finished {
            Some(result) => {
                result??;
                Ok(())
            }
            None => {
                self.stop();
                self.await_termination().await
            }
        }
    }
}

use crate::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::sync::{broadcast, watch};

/// Common interface for the UDP servers
///
/// Both the echo server and the command server bind one socket, loop over
/// inbound datagrams until shut down, and report where they actually bound
/// (which matters when configured with port 0).
#[async_trait]
pub trait DatagramServer {
    /// Binds the socket and serves datagrams until shutdown or a fatal
    /// transport error.
    async fn run(&self) -> Result<()>;

    /// Returns a sender that gracefully stops the serve loop.
    fn shutdown_signal(&self) -> broadcast::Sender<()>;

    /// Watch channel carrying the bound address once `run` has bound.
    ///
    /// Starts as `None`; becomes `Some(addr)` after a successful bind.
    fn bound_addr(&self) -> watch::Receiver<Option<SocketAddr>>;
}

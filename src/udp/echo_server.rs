use super::config::UdpConfig;
use crate::common::DatagramServer;
use crate::{ExchangeError, Result, protocol};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{
    net::UdpSocket,
    signal,
    sync::{broadcast, watch},
    time::timeout,
};
use tracing::{info, warn};

/// UDP echo server: acknowledges every datagram with a fixed payload
///
/// Single-tasked by design: one datagram is handled fully before the next is
/// read. There is no validation stage, so no datagram is ever dropped by the
/// application layer.
///
/// # Examples
///
/// Basic server setup and running:
///
/// ```no_run
/// use cmdsrv::udp::{UdpConfig, EchoServer};
/// use cmdsrv::common::DatagramServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = UdpConfig {
///         bind_addr: "127.0.0.1:8080".parse()?,
///         ..Default::default()
///     };
///
///     let server = EchoServer::new(config);
///     server.run().await?;
///     Ok(())
/// }
/// ```
///
/// Server with graceful shutdown:
///
/// ```no_run
/// use cmdsrv::udp::{UdpConfig, EchoServer};
/// use cmdsrv::common::DatagramServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = EchoServer::new(UdpConfig::default());
///     let shutdown_signal = server.shutdown_signal();
///
///     let server_handle = tokio::spawn(async move { server.run().await });
///
///     // Do other work...
///
///     let _ = shutdown_signal.send(());
///     server_handle.await??;
///     Ok(())
/// }
/// ```
pub struct EchoServer {
    config: UdpConfig,
    shutdown_signal: Arc<broadcast::Sender<()>>,
    bound_addr: watch::Sender<Option<SocketAddr>>,
}

impl EchoServer {
    /// Creates a new echo server with the given configuration
    pub fn new(config: UdpConfig) -> Self {
        let (shutdown_signal, _) = broadcast::channel(1);
        let (bound_addr, _) = watch::channel(None);
        Self {
            config,
            shutdown_signal: Arc::new(shutdown_signal),
            bound_addr,
        }
    }
}

#[async_trait]
impl DatagramServer for EchoServer {
    /// Binds the socket and acknowledges datagrams until shutdown.
    ///
    /// Transport failures (bind, receive, send) are fatal and surface as
    /// `Err`; a receive timeout just re-enters the loop.
    async fn run(&self) -> Result<()> {
        let socket = UdpSocket::bind(self.config.bind_addr)
            .await
            .map_err(ExchangeError::Bind)?;
        let local_addr = socket.local_addr().map_err(ExchangeError::Bind)?;
        self.bound_addr.send_replace(Some(local_addr));

        info!(address = %local_addr, "UDP echo server listening");

        let mut buffer = vec![0; self.config.recv_buffer_size];
        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            tokio::select! {
                res = timeout(self.config.read_timeout, socket.recv_from(&mut buffer)) => {
                    match res {
                        Ok(Ok((n, addr))) => {
                            let text = String::from_utf8_lossy(&buffer[..n]);
                            info!(%addr, size = n, payload = %text, "Received datagram");
                            socket
                                .send_to(protocol::ECHO_ACK, addr)
                                .await
                                .map_err(ExchangeError::Send)?;
                            info!(%addr, "Sent acknowledgment");
                        }
                        Ok(Err(e)) => {
                            return Err(ExchangeError::Recv(e));
                        }
                        Err(_) => {
                            warn!("Receive timeout");
                        }
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping server");
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("Received internal shutdown signal, stopping server");
                    break;
                }
            }
        }

        info!("UDP echo server stopped");
        Ok(())
    }

    fn shutdown_signal(&self) -> broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }

    fn bound_addr(&self) -> watch::Receiver<Option<SocketAddr>> {
        self.bound_addr.subscribe()
    }
}

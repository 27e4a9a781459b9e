use super::config::CommandConfig;
use crate::common::DatagramServer;
use crate::security::{CommandValidator, Verdict};
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

/// UDP server that only answers whitelisted commands
///
/// Each inbound datagram runs through the validation pipeline (length check,
/// sanitize, whitelist match). Only an accepted command earns a reply;
/// rejected datagrams are logged and dropped, and the loop continues.
///
/// # Examples
///
/// ```no_run
/// use cmdsrv::udp::{CommandConfig, CommandServer};
/// use cmdsrv::common::DatagramServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut config = CommandConfig::default();
///     config.udp.bind_addr = "127.0.0.1:8080".parse()?;
///
///     let server = CommandServer::new(config);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct CommandServer {
    config: CommandConfig,
    validator: CommandValidator,
    shutdown_signal: Arc<broadcast::Sender<()>>,
    bound_addr: watch::Sender<Option<SocketAddr>>,
}

impl CommandServer {
    /// Creates a new command server with the given configuration
    pub fn new(config: CommandConfig) -> Self {
        let (shutdown_signal, _) = broadcast::channel(1);
        let (bound_addr, _) = watch::channel(None);
        let validator = CommandValidator::new(
            config.max_payload_bytes,
            config.allowed_commands.iter().cloned(),
            protocol::command_response(),
        );
        Self {
            config,
            validator,
            shutdown_signal: Arc::new(shutdown_signal),
            bound_addr,
        }
    }
}

#[async_trait]
impl DatagramServer for CommandServer {
    /// Binds the socket and serves validated commands until shutdown.
    ///
    /// Verdicts are control flow: oversized or unrecognized datagrams log a
    /// warning and the loop continues without replying. Transport failures
    /// are fatal and surface as `Err`.
    async fn run(&self) -> Result<()> {
        let socket = UdpSocket::bind(self.config.udp.bind_addr)
            .await
            .map_err(ExchangeError::Bind)?;
        let local_addr = socket.local_addr().map_err(ExchangeError::Bind)?;
        self.bound_addr.send_replace(Some(local_addr));

        info!(address = %local_addr, "UDP command server listening");

        let mut buffer = vec![0; self.config.udp.recv_buffer_size];
        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            tokio::select! {
                res = timeout(self.config.udp.read_timeout, socket.recv_from(&mut buffer)) => {
                    match res {
                        Ok(Ok((n, addr))) => {
                            match self.validator.check(&buffer[..n]) {
                                Verdict::Accepted { command, response } => {
                                    info!(%addr, %command, "Accepted command");
                                    socket
                                        .send_to(&response, addr)
                                        .await
                                        .map_err(ExchangeError::Send)?;
                                    info!(%addr, "Sent response");
                                }
                                Verdict::Oversized { size, limit } => {
                                    warn!(%addr, size, limit, "Dropped oversized datagram");
                                }
                                Verdict::Unrecognized { command } => {
                                    warn!(%addr, %command, "Dropped unrecognized command");
                                }
                            }
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

        info!("UDP command server stopped");
        Ok(())
    }

    fn shutdown_signal(&self) -> broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }

    fn bound_addr(&self) -> watch::Receiver<Option<SocketAddr>> {
        self.bound_addr.subscribe()
    }
}

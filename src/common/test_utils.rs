use crate::common::DatagramServer;
use crate::udp::{CommandConfig, CommandServer, EchoServer, UdpConfig};
use crate::{ExchangeError, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Spawns an echo server on a background task and waits until it has bound.
///
/// Configure `bind_addr` with port 0 to get an ephemeral port; the returned
/// address is the one the socket actually bound to.
pub async fn spawn_echo_server(config: UdpConfig) -> Result<(JoinHandle<Result<()>>, SocketAddr)> {
    let server = EchoServer::new(config);
    let addr_rx = server.bound_addr();
    let handle = tokio::spawn(async move { server.run().await });
    let addr = wait_for_bind(addr_rx).await?;
    Ok((handle, addr))
}

/// Spawns a command server on a background task and waits until it has bound.
pub async fn spawn_command_server(
    config: CommandConfig,
) -> Result<(JoinHandle<Result<()>>, SocketAddr)> {
    let server = CommandServer::new(config);
    let addr_rx = server.bound_addr();
    let handle = tokio::spawn(async move { server.run().await });
    let addr = wait_for_bind(addr_rx).await?;
    Ok((handle, addr))
}

async fn wait_for_bind(mut addr_rx: watch::Receiver<Option<SocketAddr>>) -> Result<SocketAddr> {
    let bound = timeout(Duration::from_secs(5), async {
        loop {
            if let Some(addr) = *addr_rx.borrow() {
                return Ok::<_, ExchangeError>(addr);
            }
            addr_rx
                .changed()
                .await
                .map_err(|_| ExchangeError::Config("server exited before binding".to_string()))?;
        }
    })
    .await
    .map_err(|_| ExchangeError::Timeout("server did not bind within 5s".to_string()))??;

    Ok(bound)
}

use crate::{ExchangeError, Result, protocol};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::time::{Duration, timeout};

/// One-shot UDP exchange client
///
/// Sends a single datagram and waits (bounded) for a single reply. The wait
/// is bounded so a server that drops the request (as the command server does
/// for rejected payloads) surfaces as [`ExchangeError::Timeout`] instead of
/// blocking forever.
///
/// # Examples
///
/// ```no_run
/// use cmdsrv::udp::ExchangeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let addr = "127.0.0.1:8080".parse()?;
///     let mut client = ExchangeClient::connect(addr).await?;
///
///     let (reply, from) = client.exchange_string("COMMAND_A").await?;
///     println!("Reply from {from}: {reply}");
///     Ok(())
/// }
/// ```
pub struct ExchangeClient {
    socket: UdpSocket,
    server_addr: SocketAddr,
    reply_timeout: Duration,
}

impl ExchangeClient {
    /// Binds an ephemeral local socket aimed at the given server address
    pub async fn connect(server_addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .map_err(ExchangeError::Bind)?;

        Ok(Self {
            socket,
            server_addr,
            reply_timeout: Duration::from_millis(500),
        })
    }

    /// Overrides how long [`exchange`](Self::exchange) waits for the reply
    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    /// Sends one datagram and waits for one reply.
    ///
    /// Returns the reply payload together with the address it came from.
    pub async fn exchange(&mut self, data: &[u8]) -> Result<(Vec<u8>, SocketAddr)> {
        self.socket
            .send_to(data, self.server_addr)
            .await
            .map_err(ExchangeError::Send)?;

        let mut buffer = vec![0; protocol::RECV_BUFFER_BYTES];
        let (n, from) = timeout(self.reply_timeout, self.socket.recv_from(&mut buffer))
            .await
            .map_err(|_| ExchangeError::Timeout("no reply datagram received".to_string()))?
            .map_err(ExchangeError::Recv)?;

        Ok((buffer[..n].to_vec(), from))
    }

    /// Sends a string and decodes the reply as UTF-8
    pub async fn exchange_string(&mut self, data: &str) -> Result<(String, SocketAddr)> {
        let (reply, from) = self.exchange(data.as_bytes()).await?;
        Ok((String::from_utf8(reply)?, from))
    }

    /// Sends the canned request payload and returns the reply
    pub async fn send_test_data(&mut self) -> Result<(Vec<u8>, SocketAddr)> {
        self.exchange(protocol::REQUEST_PAYLOAD).await
    }
}

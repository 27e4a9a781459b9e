use thiserror::Error;

/// Error types for the cmdsrv library
///
/// Only transport-level failures live here. Validation outcomes (oversized
/// payload, unrecognized command) are not errors; they are represented by
/// [`security::Verdict`] and keep the server loop running.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Failed to bind a UDP socket
    #[error("bind error: {0}")]
    Bind(std::io::Error),

    /// Failed to send a datagram
    #[error("send error: {0}")]
    Send(std::io::Error),

    /// Failed to receive a datagram
    #[error("receive error: {0}")]
    Recv(std::io::Error),

    /// A bounded wait elapsed without a datagram arriving
    #[error("timeout: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// UTF-8 decoding errors on a reply payload
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for the cmdsrv library
pub type Result<T> = std::result::Result<T, ExchangeError>;

pub mod common;
pub mod protocol;
pub mod security;
pub mod udp;

// Re-export main types for convenience
pub use common::DatagramServer;
pub use security::{CommandValidator, Verdict, sanitize};
pub use udp::{CommandConfig, CommandServer, EchoServer, ExchangeClient, UdpConfig};

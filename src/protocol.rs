//! Wire literals and default limits shared by the client and both servers
//!
//! The exchange has no framing: payloads are raw UDP datagrams interpreted as
//! UTF-8 text by the application layer. Both ends agree on these literals
//! out-of-band.

use bytes::Bytes;

/// Payload the client sends on a plain exchange.
pub const REQUEST_PAYLOAD: &[u8] = b"This is test data. Please ignore.";

/// Fixed acknowledgment the echo server returns for every datagram.
pub const ECHO_ACK: &[u8] = b"Data received";

/// Response the command server returns for an accepted command.
pub const COMMAND_RESPONSE: &[u8] = b"This is test data. Please ignore.";

/// The single command accepted by the default whitelist.
pub const DEFAULT_COMMAND: &str = "COMMAND_A";

/// Port both ends use when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// Receive buffer size for all sockets.
pub const RECV_BUFFER_BYTES: usize = 4096;

/// Payload ceiling enforced by the command server before any processing.
pub const MAX_PAYLOAD_BYTES: usize = 1024;

/// The echo acknowledgment as an owned, cheaply-clonable payload.
pub fn echo_ack() -> Bytes {
    Bytes::from_static(ECHO_ACK)
}

/// The command-accepted response as an owned, cheaply-clonable payload.
pub fn command_response() -> Bytes {
    Bytes::from_static(COMMAND_RESPONSE)
}

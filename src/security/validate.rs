use crate::protocol;
use bytes::Bytes;
use std::collections::HashSet;

/// Retains only letters, digits, underscore, space, period, comma, question
/// mark and exclamation mark; every other character is silently removed.
///
/// The filter is strict: the output is a subsequence of the input and never
/// contains characters absent from it. Two different inputs can collapse to
/// the same sanitized form.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | ' ' | '.' | ',' | '?' | '!'))
        .collect()
}

/// Outcome of running one datagram through the validation pipeline
///
/// Verdicts are expected control flow, not errors: a rejecting verdict logs
/// and the server loop continues without replying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The sanitized, trimmed payload matched the whitelist; reply with `response`.
    Accepted { command: String, response: Bytes },
    /// Raw payload exceeded the size ceiling; rejected before sanitization.
    Oversized { size: usize, limit: usize },
    /// Sanitized, trimmed payload matched no whitelisted command.
    Unrecognized { command: String },
}

/// The three-stage pipeline applied to each inbound datagram:
/// length check, sanitize, whitelist match.
///
/// The whitelist holds already-trimmed command strings and the input is
/// compared after sanitizing and trimming, so padding on either side never
/// affects the match.
///
/// # Examples
///
/// ```
/// use cmdsrv::security::{CommandValidator, Verdict};
///
/// let validator = CommandValidator::default();
/// assert!(matches!(validator.check(b"  COMMAND_A  "), Verdict::Accepted { .. }));
/// assert!(matches!(validator.check(b"DROP TABLE users;"), Verdict::Unrecognized { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct CommandValidator {
    max_payload_bytes: usize,
    allowed_commands: HashSet<String>,
    response: Bytes,
}

impl CommandValidator {
    /// Creates a validator with a normalized whitelist.
    ///
    /// Each allowed command is trimmed on the way in so the stored set only
    /// ever contains canonical forms.
    pub fn new(
        max_payload_bytes: usize,
        allowed_commands: impl IntoIterator<Item = String>,
        response: Bytes,
    ) -> Self {
        Self {
            max_payload_bytes,
            allowed_commands: allowed_commands
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect(),
            response,
        }
    }

    /// Runs the full pipeline over a raw payload.
    ///
    /// The length check uses the raw byte count and fires before any
    /// decoding. Invalid UTF-8 is decoded lossily; the replacement character
    /// falls outside the allowed class and is stripped by [`sanitize`].
    pub fn check(&self, payload: &[u8]) -> Verdict {
        if payload.len() > self.max_payload_bytes {
            return Verdict::Oversized {
                size: payload.len(),
                limit: self.max_payload_bytes,
            };
        }

        let sanitized = sanitize(&String::from_utf8_lossy(payload));
        let command = sanitized.trim();

        if self.allowed_commands.contains(command) {
            Verdict::Accepted {
                command: command.to_string(),
                response: self.response.clone(),
            }
        } else {
            Verdict::Unrecognized {
                command: command.to_string(),
            }
        }
    }

    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }
}

impl Default for CommandValidator {
    fn default() -> Self {
        Self::new(
            protocol::MAX_PAYLOAD_BYTES,
            [protocol::DEFAULT_COMMAND.to_string()],
            protocol::command_response(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_allowed_class() {
        assert_eq!(sanitize("Hello, world! 123_?"), "Hello, world! 123_?");
    }

    #[test]
    fn sanitize_strips_everything_else() {
        assert_eq!(sanitize("DROP TABLE users;"), "DROP TABLE users");
        assert_eq!(sanitize("a<b>&c\"d'e"), "abcde");
        assert_eq!(sanitize("\x00\x1b[2J"), "2J");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize("rm -rf / #oops");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn accepts_exact_command() {
        let validator = CommandValidator::default();
        match validator.check(b"COMMAND_A") {
            Verdict::Accepted { command, response } => {
                assert_eq!(command, "COMMAND_A");
                assert_eq!(response, protocol::command_response());
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn accepts_padded_command_after_trim() {
        let validator = CommandValidator::default();
        assert!(matches!(
            validator.check(b"   COMMAND_A   "),
            Verdict::Accepted { .. }
        ));
    }

    #[test]
    fn accepts_command_whose_junk_sanitizes_away() {
        // Stripped characters collapse onto the whitelisted form.
        let validator = CommandValidator::default();
        assert!(matches!(
            validator.check(b"COMMAND_A\r\n"),
            Verdict::Accepted { .. }
        ));
    }

    #[test]
    fn rejects_unknown_command() {
        let validator = CommandValidator::default();
        match validator.check(b"COMMAND_B") {
            Verdict::Unrecognized { command } => assert_eq!(command, "COMMAND_B"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_oversized_before_sanitizing() {
        let validator = CommandValidator::default();
        // A payload that would match the whitelist if it were ever sanitized.
        let mut payload = vec![b' '; 2000];
        payload.extend_from_slice(b"COMMAND_A");
        match validator.check(&payload) {
            Verdict::Oversized { size, limit } => {
                assert_eq!(size, 2009);
                assert_eq!(limit, protocol::MAX_PAYLOAD_BYTES);
            }
            other => panic!("expected oversize rejection, got {other:?}"),
        }
    }

    #[test]
    fn boundary_payload_is_not_oversized() {
        let validator = CommandValidator::default();
        let payload = vec![b'a'; protocol::MAX_PAYLOAD_BYTES];
        assert!(matches!(
            validator.check(&payload),
            Verdict::Unrecognized { .. }
        ));
    }

    #[test]
    fn invalid_utf8_is_stripped_not_fatal() {
        let validator = CommandValidator::default();
        let mut payload = b"COMMAND_A".to_vec();
        payload.push(0xff);
        assert!(matches!(validator.check(&payload), Verdict::Accepted { .. }));
    }

    #[test]
    fn whitelist_is_normalized_on_construction() {
        let validator = CommandValidator::new(
            64,
            ["  STATUS  ".to_string()],
            Bytes::from_static(b"ok"),
        );
        assert!(matches!(validator.check(b"STATUS"), Verdict::Accepted { .. }));
    }
}

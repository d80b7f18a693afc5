use thiserror::Error;

/// Any failure surfaced by the external API.
///
/// Validation performed by the remote service (including an item deleted
/// concurrently on the server) arrives here, never as a domain error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteOperationError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// Non-2xx HTTP response.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered `success: false` with a rejection message.
    #[error("remote operation rejected: {0}")]
    Rejected(String),

    /// The response body did not match the contract.
    #[error("malformed response: {0}")]
    Parse(String),
}

use thiserror::Error;

/// Per-call failure taxonomy for the NapCat HTTP API.
///
/// Every variant is recoverable: the batch runner logs the failure and moves
/// on; nothing here ever terminates the scheduling loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("cannot connect to the NapCat service; check host/port and that its HTTP server is enabled")]
    Unreachable,

    #[error("NapCat service returned unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("NapCat service returned a non-JSON response")]
    MalformedResponse,

    /// HTTP 200 but the payload signalled failure; carries the service's
    /// own `message` text.
    #[error("NapCat service rejected the request: {0}")]
    Rejected(String),

    #[error("NapCat request failed: {0}")]
    Other(String),
}

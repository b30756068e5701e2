use std::time::Duration;

/// Everything that can go wrong talking to the daemon.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Connect, send or receive failed at the socket level
    #[error("connection to {endpoint} failed: {source}")]
    Connection {
        endpoint: String,
        source: std::io::Error,
    },
    /// The reply could not be understood
    #[error("malformed reply from daemon: {0}")]
    Protocol(String),
    /// The daemon understood the request and refused it
    #[error("daemon refused request (tag {tag}): {result}")]
    Application { tag: i64, result: String },
    #[error("gave up waiting for {what} after {waited:?}")]
    Timeout {
        what: &'static str,
        waited: Duration,
    },
}

impl RpcError {
    /// Connection and protocol faults end the session; a refused request
    /// is retried on its next cadence tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RpcError::Connection { .. } | RpcError::Protocol(_))
    }
}

pub type RpcResult<T> = Result<T, RpcError>;

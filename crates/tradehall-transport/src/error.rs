/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Dialing the server failed (unreachable, refused, DNS).
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] std::io::Error),

    /// Writing a line failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading a line failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Shutting the connection down failed.
    #[error("close failed: {0}")]
    CloseFailed(#[source] std::io::Error),
}

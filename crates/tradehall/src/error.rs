//! Unified error type for the Tradehall client.

use tradehall_protocol::ProtocolError;
use tradehall_session::SessionError;
use tradehall_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tradehall` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TradehallError {
    /// A transport-level error (connect, send, receive, close).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (truncated or malformed response).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (login, refusal, wrong phase).
    #[error(transparent)]
    Session(#[from] SessionError),
}

//! Error types for the session layer.

use tradehall_protocol::ProtocolError;

/// Errors that can occur while driving a session.
///
/// Every public operation on a [`Session`](crate::Session) returns one
/// of these instead of panicking or logging-and-lying: transport and
/// decode failures arrive as [`SessionError::Protocol`], server refusals
/// as [`SessionError::Rejected`], and local admission-control refusals
/// as [`SessionError::InsufficientCredits`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Login did not produce an authenticated session.
    ///
    /// Deliberately coarse: the wire protocol gives a client no way to
    /// tell "server unreachable" from "bad credentials", and this type
    /// does not pretend otherwise. The underlying cause is logged.
    #[error("login failed")]
    LoginFailed,

    /// The operation requires a logged-in session.
    #[error("not logged in")]
    NotLoggedIn,

    /// The session is already authenticated; a second login on the same
    /// session is not supported.
    #[error("already logged in")]
    AlreadyLoggedIn,

    /// The session has been closed; no further operations are possible.
    #[error("session closed")]
    Closed,

    /// A purchase was refused locally before contacting the server.
    #[error("insufficient credits: have {have}, need {need}")]
    InsufficientCredits {
        /// Credits currently available.
        have: u64,
        /// The price of the card.
        need: u64,
    },

    /// The server answered a command with something other than `OK`.
    #[error("server rejected command: {response:?}")]
    Rejected {
        /// The server's response line, verbatim.
        response: String,
    },

    /// A two-line response wasn't terminated with `OK`.
    #[error("malformed response: {first:?} then {second:?}")]
    UnexpectedResponse {
        /// The first response line.
        first: String,
        /// The line that should have been `OK`.
        second: String,
    },

    /// A transport or decode failure below the session layer.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

//! # Tradehall
//!
//! Client for a line-oriented card-trading protocol: log in to a remote
//! server, check your credit balance, list the cards you own and the
//! cards on offer, and buy or sell them — over one persistent TCP
//! connection, one request/response exchange at a time.
//!
//! The workspace is layered: `tradehall-transport` frames the socket
//! into text lines, `tradehall-protocol` decodes lines into [`Card`]
//! records, and `tradehall-session` sequences the exchanges. This
//! meta-crate re-exports the public surface and adds a one-call
//! [`connect`] for the common case.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tradehall::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TradehallError> {
//!     let (mut session, cards) =
//!         tradehall::connect("cards.example.com", 1812, "alice", "secret").await?;
//!     println!("you own {} cards", cards.len());
//!     println!("balance: {} credits", session.credits().await?);
//!     for offer in session.offers().await? {
//!         println!("{offer}");
//!     }
//!     session.close().await;
//!     Ok(())
//! }
//! ```

mod error;

pub use error::TradehallError;
pub use tradehall_protocol::{Card, CardId, Command, ProtocolError, Rank};
pub use tradehall_session::{Session, SessionError, SessionPhase};
pub use tradehall_transport::{Connector, LineStream, TransportError};
#[cfg(feature = "tcp")]
pub use tradehall_transport::TcpConnector;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{Card, CardId, Rank, Session, SessionError, TradehallError};
    #[cfg(feature = "tcp")]
    pub use crate::TcpConnector;
}

/// Dials the server over TCP and logs in, in one call.
///
/// Returns the authenticated [`Session`] together with the card listing
/// the server sends after a successful login.
///
/// # Errors
///
/// Returns [`SessionError::LoginFailed`] (wrapped in
/// [`TradehallError::Session`]) when the server is unreachable or the
/// credentials are rejected — the protocol does not distinguish the two.
#[cfg(feature = "tcp")]
pub async fn connect(
    host: impl Into<String>,
    port: u16,
    username: &str,
    password: &str,
) -> Result<(Session<TcpConnector>, Vec<Card>), TradehallError> {
    let mut session = Session::new(TcpConnector::new(host, port));
    let cards = session.login(username, password).await?;
    Ok((session, cards))
}

//! Transport abstraction layer for Tradehall.
//!
//! Provides the [`Connector`] and [`LineStream`] traits that abstract over
//! how the client reaches the card server and how newline-delimited text
//! travels back and forth. The card protocol is strictly line-oriented, so
//! this layer speaks in whole lines, never raw bytes: one call to
//! [`LineStream::send_line`] is one request line on the wire, one call to
//! [`LineStream::recv_line`] is one response line with the terminator
//! already stripped.
//!
//! # Feature Flags
//!
//! - `tcp` (default) — TCP transport via `tokio::net::TcpStream`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::TransportError;
#[cfg(feature = "tcp")]
pub use tcp::{TcpConnector, TcpLineStream};

/// Opens a connection to the card server.
///
/// This is the "connection factory" seam: the session layer dials through
/// a `Connector` rather than naming a socket type, so tests can substitute
/// an in-memory stream and production code can use [`TcpConnector`].
pub trait Connector: Send + 'static {
    /// The stream type produced by a successful dial.
    type Stream: LineStream;

    /// Establishes a fresh connection to the server.
    async fn connect(&self) -> Result<Self::Stream, TransportError>;
}

/// A single connection that sends and receives text lines.
///
/// Implementations own the underlying socket (or an in-memory stand-in)
/// exclusively; there is no internal locking, and callers must not issue
/// a second operation while one is in flight.
pub trait LineStream: Send + 'static {
    /// Writes one line followed by the line terminator, then flushes.
    ///
    /// The protocol is request/response, so every request must actually
    /// reach the server before the caller starts reading — hence the
    /// unconditional flush.
    async fn send_line(&mut self, line: &str) -> Result<(), TransportError>;

    /// Reads the next line, blocking until one is available.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly (EOF). The line
    /// terminator is stripped before the line is returned.
    async fn recv_line(&mut self) -> Result<Option<String>, TransportError>;

    /// Closes the connection, flushing any buffered output first.
    async fn close(&mut self) -> Result<(), TransportError>;
}

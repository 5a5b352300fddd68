//! Error types for the protocol layer.
//!
//! Each crate in Tradehall defines its own error enum. A
//! `ProtocolError` always means the response text didn't decode — the
//! connection itself may be fine (and when it isn't, the wrapped
//! [`TransportError`] says so).

use tradehall_transport::TransportError;

/// Errors that can occur while decoding server responses.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The underlying transport failed mid-read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The stream ended where the protocol required another line —
    /// either at a listing discriminator or inside a card block.
    #[error("stream ended mid-response")]
    UnexpectedEof,

    /// A line that must be an integer (card id, price) wasn't one.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Which card field was being parsed.
        field: &'static str,
        /// The offending line, verbatim.
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A rank line didn't match any of the four known ranks.
    #[error("unknown rank: {0:?}")]
    UnknownRank(String),
}

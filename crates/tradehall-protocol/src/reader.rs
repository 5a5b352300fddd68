//! [`CardStream`]: typed decoding layered on a line stream.
//!
//! The card stream has exactly one job — turn response lines into either
//! raw text or decoded [`Card`] records — keeping the wire format
//! isolated from the session's command semantics. It owns the connection
//! for the life of the session, so the outbound passthroughs
//! ([`CardStream::send`], [`CardStream::send_line`]) live here too.

use std::str::FromStr;

use tradehall_transport::LineStream;

use crate::{Card, CardId, Command, ProtocolError, Rank, CARD_HEADER, OK_LINE};

/// Decodes cards from a line-oriented connection.
pub struct CardStream<S> {
    stream: S,
}

impl<S: LineStream> CardStream<S> {
    /// Wraps a connected line stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Sends one command line.
    pub async fn send(&mut self, command: &Command) -> Result<(), ProtocolError> {
        self.send_line(&command.to_string()).await
    }

    /// Sends one raw line (used for the username/password exchange,
    /// which predates the command vocabulary).
    pub async fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.stream.send_line(line).await?;
        Ok(())
    }

    /// Reads the next raw response line; `Ok(None)` on clean EOF.
    pub async fn recv_line(&mut self) -> Result<Option<String>, ProtocolError> {
        Ok(self.stream.recv_line().await?)
    }

    /// Reads one card from a listing, or `Ok(None)` at the terminator.
    ///
    /// The first line read is the discriminator:
    ///
    /// - `CARD` — exactly four more lines follow (id, name, rank,
    ///   price) and make one [`Card`]. A malformed field or an EOF
    ///   inside the block is an error.
    /// - `OK` — the listing is over.
    /// - anything else — the offending line is logged and the listing is
    ///   treated as over. Lenient on purpose: a desynced listing still
    ///   lets the caller's accumulate loop terminate instead of wedging
    ///   the connection.
    pub async fn read_card(&mut self) -> Result<Option<Card>, ProtocolError> {
        let header = self.next_line().await?;
        if header == CARD_HEADER {
            let id = CardId(self.next_number("card id").await?);
            let name = self.next_line().await?;
            let rank = Rank::from_str(&self.next_line().await?)?;
            let price = self.next_number("price").await?;
            return Ok(Some(Card::new(id, name, rank, price)));
        }
        if header != OK_LINE {
            tracing::warn!(line = %header, "malformed card listing, treating as end of list");
        }
        Ok(None)
    }

    /// Closes the underlying connection.
    pub async fn close(&mut self) -> Result<(), ProtocolError> {
        self.stream.close().await?;
        Ok(())
    }

    /// Reads a line that the protocol requires to exist.
    async fn next_line(&mut self) -> Result<String, ProtocolError> {
        self.stream
            .recv_line()
            .await?
            .ok_or(ProtocolError::UnexpectedEof)
    }

    /// Reads a line and parses it as an unsigned integer.
    async fn next_number(&mut self, field: &'static str) -> Result<u64, ProtocolError> {
        let line = self.next_line().await?;
        line.parse()
            .map_err(|source| ProtocolError::InvalidNumber {
                field,
                value: line,
                source,
            })
    }
}

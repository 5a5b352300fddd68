//! Wire protocol for the Tradehall card server.
//!
//! This crate defines the "language" the client and server speak:
//!
//! - **Types** ([`Card`], [`CardId`], [`Rank`]) — the records that come
//!   off the wire.
//! - **Commands** ([`Command`]) — the request lines the client sends.
//! - **Reader** ([`CardStream`]) — how response lines are decoded into
//!   typed records.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (text lines) and session
//! (command sequencing). It doesn't know which command produced a
//! response or what the caller will do with it — it only knows how one
//! card is spelled on the wire.
//!
//! ```text
//! Transport (lines) → Protocol (Card) → Session (login, buy, sell)
//! ```
//!
//! # Wire format
//!
//! Every response is newline-delimited text. A card listing is zero or
//! more five-line blocks, each introduced by the literal `CARD` and
//! followed by id, name, rank, and price on their own lines, terminated
//! by a single `OK`:
//!
//! ```text
//! CARD
//! 12345
//! Butler
//! COMMON
//! 20
//! OK
//! ```

mod card;
mod command;
mod error;
mod reader;

pub use card::{Card, CardId, Rank};
pub use command::Command;
pub use error::ProtocolError;
pub use reader::CardStream;

/// Discriminator line that introduces one card block in a listing.
pub const CARD_HEADER: &str = "CARD";

/// Status line the server sends to terminate a listing or confirm a
/// command.
pub const OK_LINE: &str = "OK";

/// The exact line the server sends after a successful login.
pub fn login_success_line(username: &str) -> String {
    format!("User {username} logged in successfully.")
}

//! Outbound request lines.
//!
//! Every request the client can make is a single text line. [`Command`]
//! enumerates them so the session layer never concatenates wire strings
//! by hand, and `Display` is the one place the spelling lives.

use std::fmt;

use crate::CardId;

/// A request line sent to the card server.
///
/// The two login lines (username and password) are not commands — they
/// are raw values sent before the session speaks the command vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask for the user's credit balance.
    Credits,
    /// Ask for the cards the user owns.
    Cards,
    /// Ask for the cards currently on offer.
    Offers,
    /// Buy the card with the given id.
    Buy(CardId),
    /// Offer the card with the given id for sale at the given price.
    Sell(CardId, u64),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Credits => f.write_str("CREDITS"),
            Command::Cards => f.write_str("CARDS"),
            Command::Offers => f.write_str("OFFERS"),
            Command::Buy(id) => write!(f, "BUY {id}"),
            Command::Sell(id, price) => write!(f, "SELL {id} {price}"),
        }
    }
}

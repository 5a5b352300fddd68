//! Card types: the records that travel on the wire.
//!
//! A card is a named, ranked, priced item in the server's catalog. The
//! types here carry no I/O — they are pure values with the comparison
//! semantics the rest of the client relies on:
//!
//! - identity is `(id, name, rank)` — price is excluded, so the same
//!   card listed at two different prices is one logical item;
//! - ordering is rarity-first (`rank`, then `name`, then `id`), which is
//!   the order every listing is returned in.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a card within the catalog.
///
/// Newtype over `u64` so an id can't be confused with a price — both are
/// bare integers on the wire. `Display` prints the raw number because the
/// id appears verbatim in `BUY` and `SELL` request lines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// The rarity of a card.
///
/// A closed set with a fixed order: rarer ranks sort first. The derived
/// `Ord` follows declaration order, so `Unique < Rare < Uncommon <
/// Common` — a listing sorted ascending puts the rarest cards at the top.
///
/// On the wire a rank is its uppercase name (`UNIQUE`, `RARE`,
/// `UNCOMMON`, `COMMON`), matched case-sensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rank {
    Unique,
    Rare,
    Uncommon,
    Common,
}

impl Rank {
    /// Returns the wire spelling of this rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Unique => "UNIQUE",
            Rank::Rare => "RARE",
            Rank::Uncommon => "UNCOMMON",
            Rank::Common => "COMMON",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = ProtocolError;

    /// Parses the exact wire spelling. Case-sensitive: `common` is not a
    /// rank, only `COMMON` is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNIQUE" => Ok(Rank::Unique),
            "RARE" => Ok(Rank::Rare),
            "UNCOMMON" => Ok(Rank::Uncommon),
            "COMMON" => Ok(Rank::Common),
            other => Err(ProtocolError::UnknownRank(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A single tradeable card.
///
/// Immutable once constructed: cards are created when a response is
/// parsed and never mutated. The price is how many credits the card is
/// offered for; cards the user already owns aren't for sale, so their
/// price defaults to 0 (see [`Card::unpriced`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    rank: Rank,
    price: u64,
}

impl Card {
    /// Creates a card with an explicit price.
    pub fn new(id: CardId, name: impl Into<String>, rank: Rank, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            rank,
            price,
        }
    }

    /// Creates a card with no sale price; the price is 0.
    pub fn unpriced(id: CardId, name: impl Into<String>, rank: Rank) -> Self {
        Self::new(id, name, rank, 0)
    }

    /// Returns the card's unique id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the card's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the card's rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card's sale price in credits.
    pub fn price(&self) -> u64 {
        self.price
    }
}

/// Two cards are equal iff id, name, and rank all match. Price is
/// deliberately excluded — it varies between listings of the same card.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.rank == other.rank
    }
}

impl Eq for Card {}

/// Hash over the same fields as equality, so cards deduplicate correctly
/// in hash-based sets regardless of price.
impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.rank.hash(state);
    }
}

/// Total order: rank (rarity first), then name, then id. Consistent with
/// equality — `Ordering::Equal` exactly when the cards compare equal.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fixed diagnostic form: `[RANK] NAME {ID:id} price credits`.
///
/// Example: `[COMMON] Butler {ID:12345} 20 credits`. Used for terminal
/// output, never parsed back.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {{ID:{}}} {} credits",
            self.rank, self.name, self.id, self.price
        )
    }
}

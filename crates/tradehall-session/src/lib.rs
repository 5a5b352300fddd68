//! Session management for Tradehall.
//!
//! This crate owns the request/response state machine: one [`Session`]
//! holds one connection and drives it through login, balance queries,
//! listings, and buy/sell exchanges — strictly one exchange at a time.
//!
//! # How it fits in the stack
//!
//! ```text
//! Caller (above)  ← CLI, tests; checks each Result
//!     ↕
//! Session Layer (this crate)  ← sequences commands and responses
//!     ↕
//! Protocol Layer (below)  ← provides Card, Command, CardStream
//! ```

mod error;
mod session;

pub use error::SessionError;
pub use session::{Session, SessionPhase};

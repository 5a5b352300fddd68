//! The session controller: one connection, five operations.
//!
//! A [`Session`] owns its connection exclusively and walks a small state
//! machine:
//!
//! ```text
//!   Disconnected ──(login ok)──→ Authenticated ──(close)──→ Closed
//!        │                            │
//!        └──(login failed)── stays ───┘ (exchanges never change state)
//! ```
//!
//! Only `login` moves the session into `Authenticated` and only `close`
//! moves it into `Closed`; every other operation is a leaf exchange that
//! writes one request, reads its full response, and returns. The state
//! lives in a tagged enum that carries the connection, so there is no
//! "stream but not logged in" representation to misuse.
//!
//! # Concurrency
//!
//! One exchange at a time. Every operation takes `&mut self` and awaits
//! its response to completion before returning, so the borrow checker
//! enforces the serialization the wire protocol requires. There are no
//! timeouts and no retries: a read waits until the server answers or the
//! stream dies, and a failed exchange is final for that call.

use tradehall_protocol::{
    login_success_line, Card, CardStream, Command, ProtocolError, OK_LINE,
};
use tradehall_transport::{Connector, LineStream};

use crate::SessionError;

/// Where a session is in its lifecycle. Returned by [`Session::phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No connection yet (or the last login attempt failed).
    Disconnected,
    /// Logged in; exchanges are available.
    Authenticated,
    /// Closed; the session is spent.
    Closed,
}

/// Internal state, holding the connection only while it exists.
enum State<S> {
    Disconnected,
    Authenticated { stream: CardStream<S> },
    Closed,
}

/// A client session with the card server.
///
/// Dials through the given [`Connector`] on [`login`](Session::login)
/// and owns the resulting stream until [`close`](Session::close). Not
/// thread-shared; the caller serializes access by holding the only
/// `&mut Session`.
pub struct Session<C: Connector> {
    connector: C,
    state: State<C::Stream>,
}

impl<C: Connector> Session<C> {
    /// Creates a disconnected session. Nothing is dialed until `login`.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            state: State::Disconnected,
        }
    }

    /// Returns the session's current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        match self.state {
            State::Disconnected => SessionPhase::Disconnected,
            State::Authenticated { .. } => SessionPhase::Authenticated,
            State::Closed => SessionPhase::Closed,
        }
    }

    /// True once `login` has succeeded and `close` has not been called.
    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    /// Connects and logs in, returning the user's cards.
    ///
    /// Writes the username and password as two lines and expects the
    /// exact greeting `User {username} logged in successfully.`; the
    /// server follows a successful greeting with a listing of the user's
    /// cards, which is drained and returned sorted.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LoginFailed`] — the server was unreachable, the
    ///   exchange failed, or the greeting didn't match. These cases are
    ///   intentionally not distinguished (the protocol doesn't let us);
    ///   the session stays `Disconnected` and may try again.
    /// - [`SessionError::AlreadyLoggedIn`] / [`SessionError::Closed`] —
    ///   called in the wrong phase. A session logs in at most once.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Vec<Card>, SessionError> {
        match self.state {
            State::Disconnected => {}
            State::Authenticated { .. } => return Err(SessionError::AlreadyLoggedIn),
            State::Closed => return Err(SessionError::Closed),
        }

        let mut stream = self.authenticate(username, password).await?;
        let cards = read_card_list(&mut stream).await;
        self.state = State::Authenticated { stream };
        tracing::info!(username, "logged in");
        Ok(cards?)
    }

    /// Dials and runs the credential exchange. Any failure along the way
    /// is logged with its cause and collapsed into `LoginFailed`.
    async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<CardStream<C::Stream>, SessionError> {
        let raw = self.connector.connect().await.map_err(|err| {
            tracing::warn!(error = %err, "could not reach server");
            SessionError::LoginFailed
        })?;
        let mut stream = CardStream::new(raw);

        let exchange = async {
            stream.send_line(username).await?;
            stream.send_line(password).await?;
            stream.recv_line().await
        };
        let response = match exchange.await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::warn!("server closed the connection during login");
                return Err(SessionError::LoginFailed);
            }
            Err(err) => {
                tracing::warn!(error = %err, "login exchange failed");
                return Err(SessionError::LoginFailed);
            }
        };

        if response != login_success_line(username) {
            tracing::warn!(response = %response, "login rejected");
            return Err(SessionError::LoginFailed);
        }
        Ok(stream)
    }

    /// Queries the user's credit balance.
    ///
    /// Sends `CREDITS` and reads two lines: the balance and an `OK`
    /// terminator. A missing terminator fails the whole call with
    /// [`SessionError::UnexpectedResponse`] naming both lines.
    pub async fn credits(&mut self) -> Result<u64, SessionError> {
        let stream = self.stream_mut()?;
        stream.send(&Command::Credits).await?;

        let value = stream.recv_line().await?.ok_or(ProtocolError::UnexpectedEof)?;
        let status = stream.recv_line().await?.ok_or(ProtocolError::UnexpectedEof)?;
        if status != OK_LINE {
            tracing::warn!(value = %value, status = %status, "credits response not terminated with OK");
            return Err(SessionError::UnexpectedResponse {
                first: value,
                second: status,
            });
        }

        Ok(value
            .parse()
            .map_err(|source| ProtocolError::InvalidNumber {
                field: "credits",
                value,
                source,
            })?)
    }

    /// Lists the cards the user owns, sorted rarity-first.
    ///
    /// Owned cards carry no sale price, so their price reads as 0.
    pub async fn cards(&mut self) -> Result<Vec<Card>, SessionError> {
        self.listing(Command::Cards).await
    }

    /// Lists the cards currently on offer, sorted rarity-first.
    pub async fn offers(&mut self) -> Result<Vec<Card>, SessionError> {
        self.listing(Command::Offers).await
    }

    async fn listing(&mut self, command: Command) -> Result<Vec<Card>, SessionError> {
        let stream = self.stream_mut()?;
        stream.send(&command).await?;
        Ok(read_card_list(stream).await?)
    }

    /// Buys a card.
    ///
    /// Queries the balance first and refuses locally — nothing written
    /// for the purchase — when it doesn't cover the card's price. Only
    /// then sends `BUY {id}` and expects `OK`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InsufficientCredits`] — refused before any
    ///   purchase round trip.
    /// - [`SessionError::Rejected`] — the server answered with something
    ///   other than `OK` (card gone, price changed, etc.).
    pub async fn buy(&mut self, card: &Card) -> Result<(), SessionError> {
        let have = self.credits().await?;
        if have < card.price() {
            tracing::debug!(card = %card, have, "refusing purchase locally");
            return Err(SessionError::InsufficientCredits {
                have,
                need: card.price(),
            });
        }

        self.command_expecting_ok(Command::Buy(card.id())).await
    }

    /// Offers a card for sale at the given price.
    ///
    /// Sends `SELL {id} {price}` and expects `OK`.
    pub async fn sell(&mut self, card: &Card, price: u64) -> Result<(), SessionError> {
        self.command_expecting_ok(Command::Sell(card.id(), price)).await
    }

    /// Runs one command whose entire response is a single status line.
    async fn command_expecting_ok(&mut self, command: Command) -> Result<(), SessionError> {
        let stream = self.stream_mut()?;
        stream.send(&command).await?;
        let response = stream.recv_line().await?.ok_or(ProtocolError::UnexpectedEof)?;
        if response == OK_LINE {
            Ok(())
        } else {
            Err(SessionError::Rejected { response })
        }
    }

    /// Closes the session.
    ///
    /// Best-effort: a failure shutting the connection down is logged,
    /// never returned. Afterwards the session is `Closed` and every
    /// operation returns [`SessionError::Closed`]. Idempotent.
    pub async fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Closed);
        if let State::Authenticated { mut stream } = state {
            if let Err(err) = stream.close().await {
                tracing::warn!(error = %err, "failed to close connection");
            }
            tracing::debug!("session closed");
        }
    }

    fn stream_mut(&mut self) -> Result<&mut CardStream<C::Stream>, SessionError> {
        match &mut self.state {
            State::Authenticated { stream } => Ok(stream),
            State::Disconnected => Err(SessionError::NotLoggedIn),
            State::Closed => Err(SessionError::Closed),
        }
    }
}

/// Drains one listing: reads cards until the terminator, then sorts by
/// the card total order (rarity, name, id). Zero cards before the
/// terminator is an empty listing, not a failure.
async fn read_card_list<S: LineStream>(
    stream: &mut CardStream<S>,
) -> Result<Vec<Card>, ProtocolError> {
    let mut cards = Vec::new();
    while let Some(card) = stream.read_card().await? {
        cards.push(card);
    }
    cards.sort();
    Ok(cards)
}

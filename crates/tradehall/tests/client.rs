//! End-to-end tests against a scripted card server.
//!
//! These tests spin up a real TCP server speaking the line protocol and
//! drive a full client session against it: login, balance, listings,
//! buy, sell, close. Unlike the unit tests (which script individual
//! streams), everything here crosses a real socket, so the line framing,
//! the flush-before-read discipline, and the session state machine are
//! exercised together.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use tradehall::{Session, SessionError, SessionPhase, TcpConnector, TradehallError};

const USERNAME: &str = "alice";
const PASSWORD: &str = "secret";

/// One server-side connection, line by line.
struct Peer {
    reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl Peer {
    fn new(stream: TcpStream) -> Self {
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer: write,
        }
    }

    async fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await.expect("server read");
        if n == 0 {
            return None;
        }
        Some(line.trim_end_matches('\n').to_string())
    }

    async fn send_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.writer
                .write_all(format!("{line}\n").as_bytes())
                .await
                .expect("server write");
        }
        self.writer.flush().await.expect("server flush");
    }
}

/// Spawns a scripted card server for one connection and returns its
/// address.
///
/// The fixture knows one user (`alice`/`secret` with 100 credits and two
/// owned cards), offers two cards (one affordable, one not), accepts
/// `BUY 1` and any `SELL`, and refuses `BUY 99`.
async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut peer = Peer::new(stream);

        // Login exchange: two credential lines.
        let username = peer.read_line().await.expect("username line");
        let password = peer.read_line().await.expect("password line");
        if username != USERNAME || password != PASSWORD {
            peer.send_lines(&["Login failed."]).await;
            return;
        }

        // Greeting plus the owned-card listing, deliberately unsorted.
        peer.send_lines(&[
            "User alice logged in successfully.",
            "CARD", "2", "Butler", "COMMON", "0",
            "CARD", "1", "Gate Lodge", "RARE", "0",
            "OK",
        ])
        .await;

        // Command loop until the client hangs up.
        while let Some(command) = peer.read_line().await {
            match command.as_str() {
                "CREDITS" => peer.send_lines(&["100", "OK"]).await,
                "CARDS" => {
                    peer.send_lines(&[
                        "CARD", "2", "Butler", "COMMON", "0",
                        "CARD", "1", "Gate Lodge", "RARE", "0",
                        "OK",
                    ])
                    .await
                }
                "OFFERS" => {
                    peer.send_lines(&[
                        "CARD", "10", "Attic", "UNIQUE", "5000",
                        "CARD", "11", "Scullery", "UNCOMMON", "40",
                        "OK",
                    ])
                    .await
                }
                "BUY 11" => peer.send_lines(&["OK"]).await,
                "SELL 2 75" => peer.send_lines(&["OK"]).await,
                _ => peer.send_lines(&["No."]).await,
            }
        }
    });

    addr
}

fn session_for(addr: SocketAddr) -> Session<TcpConnector> {
    Session::new(TcpConnector::new(addr.ip().to_string(), addr.port()))
}

#[tokio::test]
async fn test_login_returns_owned_cards_sorted() {
    let addr = spawn_server().await;
    let mut session = session_for(addr);

    let cards = session.login(USERNAME, PASSWORD).await.expect("login");

    // Wire order was Butler then Gate Lodge; rarity sorts first.
    let names: Vec<_> = cards.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Gate Lodge", "Butler"]);
    assert!(session.is_authenticated());

    session.close().await;
}

#[tokio::test]
async fn test_login_with_bad_credentials_fails() {
    let addr = spawn_server().await;
    let mut session = session_for(addr);

    let result = session.login("alice", "wrong").await;

    assert!(matches!(result, Err(SessionError::LoginFailed)));
    assert_eq!(session.phase(), SessionPhase::Disconnected);
}

#[tokio::test]
async fn test_full_trading_scenario() {
    let addr = spawn_server().await;
    let mut session = session_for(addr);

    let owned = session.login(USERNAME, PASSWORD).await.expect("login");
    assert_eq!(owned.len(), 2);

    assert_eq!(session.credits().await.expect("credits"), 100);

    let offers = session.offers().await.expect("offers");
    assert_eq!(offers.len(), 2);
    // Rarest first: the unaffordable Attic, then the Scullery.
    assert_eq!(offers[0].name(), "Attic");
    assert_eq!(offers[1].name(), "Scullery");

    // 5000 credits needed, 100 available: refused locally.
    let result = session.buy(&offers[0]).await;
    assert!(matches!(
        result,
        Err(SessionError::InsufficientCredits { have: 100, need: 5000 })
    ));

    // 40 credits is affordable; server accepts BUY 11.
    session.buy(&offers[1]).await.expect("buy");

    // Sell an owned card back at a profit.
    let butler = owned.iter().find(|c| c.name() == "Butler").expect("owned");
    session.sell(butler, 75).await.expect("sell");

    session.close().await;
    assert_eq!(session.phase(), SessionPhase::Closed);
}

#[tokio::test]
async fn test_server_refusal_surfaces_as_rejected() {
    let addr = spawn_server().await;
    let mut session = session_for(addr);
    session.login(USERNAME, PASSWORD).await.expect("login");

    let offers = session.offers().await.expect("offers");
    let scullery = offers.iter().find(|c| c.name() == "Scullery").expect("offer");

    // The fixture only accepts SELL 2 75; anything else is refused.
    let result = session.sell(scullery, 10).await;

    assert!(matches!(
        result,
        Err(SessionError::Rejected { ref response }) if response == "No."
    ));

    session.close().await;
}

#[tokio::test]
async fn test_connect_helper_logs_in() {
    let addr = spawn_server().await;

    let (mut session, cards) = tradehall::connect(
        addr.ip().to_string(),
        addr.port(),
        USERNAME,
        PASSWORD,
    )
    .await
    .expect("connect");

    assert_eq!(cards.len(), 2);
    assert!(session.is_authenticated());
    session.close().await;
}

#[tokio::test]
async fn test_connect_helper_against_dead_port_fails_like_bad_login() {
    // Bind-then-drop guarantees a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = tradehall::connect(
        addr.ip().to_string(),
        addr.port(),
        USERNAME,
        PASSWORD,
    )
    .await;

    // Unreachable server and bad credentials are indistinguishable by
    // design: both are LoginFailed.
    assert!(matches!(
        result,
        Err(TradehallError::Session(SessionError::LoginFailed))
    ));
}

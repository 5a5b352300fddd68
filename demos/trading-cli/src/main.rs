//! Manual smoke-test CLI for the Tradehall client.
//!
//! Logs in, prints the credit balance, the cards you own, and the cards
//! on offer, then closes the session. Usage:
//!
//! ```text
//! trading-cli HOST PORT USERNAME PASSWORD
//! ```
//!
//! Set `RUST_LOG=debug` to watch the exchanges.

use std::process::ExitCode;

use tradehall::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [host, port, username, password] = args.as_slice() else {
        eprintln!("usage: trading-cli HOST PORT USERNAME PASSWORD");
        return ExitCode::FAILURE;
    };
    let port: u16 = match port.parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("invalid port: {port}");
            return ExitCode::FAILURE;
        }
    };

    match run(host, port, username, password).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    host: &str,
    port: u16,
    username: &str,
    password: &str,
) -> Result<(), TradehallError> {
    let (mut session, owned) = tradehall::connect(host, port, username, password).await?;

    println!("Credits: {}", session.credits().await?);

    println!("\nOwned cards ({}):", owned.len());
    for card in &owned {
        println!("  {card}");
    }

    let offers = session.offers().await?;
    println!("\nCards on offer ({}):", offers.len());
    for card in &offers {
        println!("  {card}");
    }

    session.close().await;
    Ok(())
}

//! TCP transport implementation using `tokio::net::TcpStream`.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::{Connector, LineStream, TransportError};

/// A [`Connector`] that dials the card server over plain TCP.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
}

impl TcpConnector {
    /// Creates a connector for the given host and port. Nothing is dialed
    /// until [`Connector::connect`] is called.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the host this connector dials.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port this connector dials.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Connector for TcpConnector {
    type Stream = TcpLineStream;

    async fn connect(&self) -> Result<Self::Stream, TransportError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(TransportError::ConnectFailed)?;
        tracing::debug!(host = %self.host, port = self.port, "connected");

        // Split so the read half can sit behind a BufReader while the
        // write half stays directly writable.
        let (read, write) = stream.into_split();
        Ok(TcpLineStream {
            reader: BufReader::new(read),
            writer: write,
        })
    }
}

/// A single TCP connection framed into text lines.
pub struct TcpLineStream {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl LineStream for TcpLineStream {
    async fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(TransportError::SendFailed)?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(TransportError::SendFailed)?;
        self.writer
            .flush()
            .await
            .map_err(TransportError::SendFailed)
    }

    async fn recv_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            return Ok(None);
        }
        // Strip the terminator; tolerate CRLF servers.
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.writer
            .shutdown()
            .await
            .map_err(TransportError::CloseFailed)
    }
}

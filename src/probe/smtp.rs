//! SMTP liveness probe.
//!
//! Reads the server greeting, sends the configured command (`HELP` by
//! default), and expects one reply line; the whole exchange shares a
//! single deadline.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;

use crate::error::CheckFailure;
use crate::probe::{ProbeKind, ProbeTarget};

pub async fn probe(
    target: &ProbeTarget,
    command: &str,
    timeout: Duration,
) -> Result<(), CheckFailure> {
    tracing::info!(url = %target.url, command, "checking {} via 127.0.0.1", target.url);

    let failed = |message: String| CheckFailure::ProbeFailed {
        kind: ProbeKind::Smtp,
        message,
    };

    let loopback = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), target.port);
    time::timeout(timeout, exchange(loopback, command))
        .await
        .map_err(|_| failed(format!("timed out after {}ms", timeout.as_millis())))?
        .map_err(|e| failed(e.to_string()))
}

async fn exchange(addr: SocketAddr, command: &str) -> io::Result<()> {
    let stream = TcpStream::connect(addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut greeting = String::new();
    if reader.read_line(&mut greeting).await? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before greeting",
        ));
    }

    write_half.write_all(command.as_bytes()).await?;
    write_half.write_all(b"\r\n").await?;

    let mut reply = String::new();
    if reader.read_line(&mut reply).await? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before reply",
        ));
    }

    tracing::debug!(
        greeting = greeting.trim(),
        reply = reply.trim(),
        "smtp probe answered"
    );
    Ok(())
}

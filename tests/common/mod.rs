//! Shared mock endpoints for probe integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Start a minimal HTTP responder that answers every connection with a
/// fixed 200 response.
pub async fn start_mock_http(addr: SocketAddr, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(&mut socket);
                        let mut line = String::new();
                        // Consume the request head before replying.
                        loop {
                            line.clear();
                            match reader.read_line(&mut line).await {
                                Ok(0) => return,
                                Ok(_) if line == "\r\n" => break,
                                Ok(_) => continue,
                                Err(_) => return,
                            }
                        }
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a minimal SMTP server: greet, read one command, reply once.
#[allow(dead_code)]
pub async fn start_mock_smtp(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = socket.write_all(b"220 mock ESMTP\r\n").await;
                        let mut reader = BufReader::new(&mut socket);
                        let mut command = String::new();
                        if reader.read_line(&mut command).await.unwrap_or(0) == 0 {
                            return;
                        }
                        let _ = socket.write_all(b"214 nothing to see here\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a listener that accepts connections and never sends a byte,
/// for timeout assertions.
#[allow(dead_code)]
pub async fn start_silent_listener(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        // Hold the connection open without responding.
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });
}

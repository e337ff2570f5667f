//! Liveness endpoint for external uptime monitors
//!
//! Answers every GET with `200 OK` and a fixed body. Holds no state.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time;
use tracing::{debug, info};

use crate::common::errors::Result;

/// Body returned to monitors
pub const ALIVE_BODY: &str = "Bot is alive!";

/// Largest request head read before answering
const MAX_HEAD_BYTES: usize = 1024;

/// Connections that send no complete head within this time are dropped
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind `0.0.0.0:port` and serve until the task is dropped
pub async fn serve(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    serve_listener(listener).await
}

/// Serve on an already bound listener
pub async fn serve_listener(listener: TcpListener) -> Result<()> {
    info!("Liveness server started on {}", listener.local_addr()?);

    loop {
        let (mut stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(e) = respond(&mut stream, READ_TIMEOUT).await {
                debug!(%peer, "Liveness connection failed: {}", e);
            }
        });
    }
}

async fn respond<S>(stream: &mut S, read_timeout: Duration) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let head = time::timeout(read_timeout, read_head(stream))
        .await
        .map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::TimedOut, "no request head received")
        })??;
    let response = response_for(&head);
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Read until the blank line ending the head, EOF or `MAX_HEAD_BYTES`
async fn read_head<R>(reader: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::with_capacity(MAX_HEAD_BYTES);
    let mut buf = [0u8; 256];

    while head.len() < MAX_HEAD_BYTES && !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buf[..read]);
    }
    Ok(head)
}

/// Raw HTTP response for a raw request head
fn response_for(request: &[u8]) -> String {
    if request.starts_with(b"GET ") {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            ALIVE_BODY.len(),
            ALIVE_BODY
        )
    } else {
        "HTTP/1.1 405 Method Not Allowed\r\nAllow: GET\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_ok() {
        let response = response_for(b"GET /health HTTP/1.1\r\nHost: x\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with(ALIVE_BODY));
    }

    #[tokio::test]
    async fn test_head_split_across_writes() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let writer = tokio::spawn(async move {
            client.write_all(b"GE").await.unwrap();
            time::sleep(Duration::from_millis(20)).await;
            client.write_all(b"T / HTTP/1.1\r\nHost: x\r\n\r\n").await.unwrap();
            client
        });

        let head = read_head(&mut server).await.unwrap();
        writer.await.unwrap();

        assert!(head.starts_with(b"GET / HTTP/1.1"));
        assert!(response_for(&head).starts_with("HTTP/1.1 200 OK"));
    }

    #[tokio::test]
    async fn test_silent_client_times_out() {
        let (_client, mut server) = tokio::io::duplex(64);

        let result = respond(&mut server, Duration::from_millis(50)).await;

        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_other_methods_rejected() {
        let response = response_for(b"POST / HTTP/1.1\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 405"));
    }
}

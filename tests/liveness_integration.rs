//! Integration tests for the liveness endpoint

use sora_bot::liveness::{serve_listener, ALIVE_BODY};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(serve_listener(listener));
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_get_returns_alive_body() {
    let base = spawn_server().await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), ALIVE_BODY);
}

#[tokio::test]
async fn test_any_path_is_alive() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for path in ["/health", "/status?verbose=1"] {
        let response = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert!(response.status().is_success(), "path {} failed", path);
    }
}

#[tokio::test]
async fn test_get_sent_in_pieces_is_alive() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(listener));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.set_nodelay(true).unwrap();
    stream.write_all(b"GE").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream
        .write_all(b"T / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"), "got: {}", response);
    assert!(response.ends_with(ALIVE_BODY));
}

//! Shared utilities for integration tests.

use status_poller::client::HttpStatusProbe;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

/// What a programmable backend does with one connection.
#[allow(dead_code)]
pub enum Reply {
    /// Write a response with this status code and body.
    Http(u16, String),
    /// Close the connection without answering.
    Hangup,
}

#[allow(dead_code)]
pub fn json_status(result: &str) -> Reply {
    Reply::Http(200, format!(r#"{{"result":"{}"}}"#, result))
}

/// Read until the end of the request headers.
#[allow(dead_code)]
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// Start a programmable backend on an ephemeral port.
///
/// `f` is called once per connection, in arrival order.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                read_request(&mut socket).await;
                match f().await {
                    Reply::Http(status, body) => {
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                    Reply::Hangup => drop(socket),
                }
            });
        }
    });

    addr
}

/// Probe that bypasses any proxy configured in the environment.
#[allow(dead_code)]
pub fn local_probe(base_url: &str) -> HttpStatusProbe {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    HttpStatusProbe::with_client(base_url, client).unwrap()
}

/// Address that refuses connections.
///
/// The socket is bound but never listens, so connects are reset and no other
/// test can claim the port while the returned socket is alive.
#[allow(dead_code)]
pub fn closed_port() -> (TcpSocket, SocketAddr) {
    let socket = TcpSocket::new_v4().unwrap();
    socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

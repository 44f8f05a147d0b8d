use std::net::SocketAddr;

use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use melosync::{management::TokenManager, types::Token};

// Helper that serves the same canned HTTP response to every connection
async fn spawn_stub_server(response: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         content-type: application/json\r\n\
         content-length: {}\r\n\
         connection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

#[tokio::test]
async fn test_short_lived_token_refreshes_without_panicking() {
    // a token whose lifetime is shorter than the 4 minute refresh margin
    // must be treated as expired and refreshed, not trip the expiry math
    let body = r#"{"access_token":"fresh","refresh_token":"r2","scope":"s","expires_in":3600}"#;
    let addr = spawn_stub_server(json_response(body)).await;

    unsafe {
        std::env::set_var("SPOTIFY_API_TOKEN_URL", format!("http://{}", addr));
        std::env::set_var("SPOTIFY_API_AUTH_CLIENT_ID", "test-client");
    }

    let short_lived = Token {
        access_token: "stale".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "s".to_string(),
        expires_in: 60,
        obtained_at: Utc::now().timestamp() as u64,
    };

    let mut manager = TokenManager::new(short_lived);
    let access_token = manager.get_valid_token().await;

    assert_eq!(access_token, "fresh");
}

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use melosync::soundstat;

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

#[tokio::test]
async fn test_persistent_rate_limiting_fails_instead_of_retrying_forever() {
    // a server that answers every request with 429 and a retryable
    // Retry-After must exhaust the retry budget and surface the error
    let addr = spawn_stub_server(
        "HTTP/1.1 429 Too Many Requests\r\n\
         retry-after: 0\r\n\
         content-length: 0\r\n\
         connection: close\r\n\r\n"
            .to_string(),
    )
    .await;

    unsafe {
        std::env::set_var("SOUNDSTAT_API_URL", format!("http://{}", addr));
        std::env::set_var("SOUNDSTAT_API_KEY", "test-key");
    }

    let result = soundstat::get_track_info("always429").await;

    let err = result.expect_err("fetch against a perpetual 429 must error");
    assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
}

use std::time::Duration;

use assembly_exec::{HttpClient, HttpError, HttpRequestParts, ReqwestHttpClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one connection with `reply`, then closes it.
async fn serve_once(reply: &'static [u8]) -> url::Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = sock.read(&mut buf).await;
        sock.write_all(reply).await.unwrap();
        sock.shutdown().await.ok();
    });
    url::Url::parse(&format!("http://{addr}/data")).unwrap()
}

#[tokio::test]
async fn body_cut_short_is_a_retryable_network_error() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nabc").await;
    let client = ReqwestHttpClient::new("assembly-test").unwrap();

    let err = client
        .send(HttpRequestParts::get(url), Duration::from_secs(5), 1 << 20)
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Network(_)), "{err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn complete_response_is_returned() {
    let url = serve_once(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\n\r\nbusy").await;
    let client = ReqwestHttpClient::new("assembly-test").unwrap();

    let resp = client
        .send(HttpRequestParts::get(url), Duration::from_secs(5), 1 << 20)
        .await
        .unwrap();

    assert_eq!(resp.status, 503);
    assert_eq!(resp.body, b"busy");
    assert!(!resp.is_success());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n0123456789").await;
    let client = ReqwestHttpClient::new("assembly-test").unwrap();

    let err = client
        .send(HttpRequestParts::get(url), Duration::from_secs(5), 4)
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::ResponseTooLarge { max_bytes: 4 }));
    assert!(!err.is_retryable());
}

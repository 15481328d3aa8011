use std::time::Duration;

use cinelight_core::{CatalogClient, DetailError, SearchError};
use cinelight_interaction::{OmdbApiClient, OmdbConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one HTTP exchange with a canned response and reports the
/// request line it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let request = String::from_utf8_lossy(&buf).to_string();
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{}/", addr), rx)
}

fn client_for(base_url: String, timeout: Duration) -> OmdbApiClient {
    let config = OmdbConfig {
        api_key: "test-key".to_string(),
        base_url,
        timeout,
    };
    OmdbApiClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn test_search_sends_title_and_page() {
    let body = r#"{"Search":[{"Title":"Star Wars","Year":"1977","imdbID":"tt0076759","Type":"movie","Poster":"N/A"}],"totalResults":"57","Response":"True"}"#;
    let (base_url, request_rx) = serve_once("200 OK", body).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let page = client.search("star wars", 2).await.expect("search should succeed");
    assert_eq!(page.total_results, 57);
    assert_eq!(page.items[0].imdb_id, "tt0076759");
    assert_eq!(page.items[0].poster_url, None);

    let request_line = request_rx.await.unwrap();
    assert!(request_line.starts_with("GET /?"), "{}", request_line);
    assert!(request_line.contains("apikey=test-key"), "{}", request_line);
    assert!(request_line.contains("s=star+wars"), "{}", request_line);
    assert!(request_line.contains("page=2"), "{}", request_line);
}

#[tokio::test]
async fn test_search_not_found() {
    let (base_url, _rx) = serve_once("200 OK", r#"{"Response":"False","Error":"Too many results."}"#).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let err = client.search("a", 1).await.unwrap_err();
    assert_eq!(err, SearchError::NotFound("Too many results.".to_string()));
}

#[tokio::test]
async fn test_details_request_uses_id() {
    let body = r#"{"Title":"Pulp Fiction","Year":"1994","imdbID":"tt0110912","Type":"movie","Ratings":[],"Response":"True"}"#;
    let (base_url, request_rx) = serve_once("200 OK", body).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let detail = client.fetch_details("tt0110912").await.expect("details should load");
    assert_eq!(detail.title, "Pulp Fiction");
    assert!(detail.ratings.is_empty());

    let request_line = request_rx.await.unwrap();
    assert!(request_line.contains("i=tt0110912"), "{}", request_line);
}

#[tokio::test]
async fn test_server_error_is_transport() {
    let (base_url, _rx) = serve_once("503 Service Unavailable", "upstream down").await;
    let client = client_for(base_url, Duration::from_secs(5));

    let err = client.fetch_details("tt0110912").await.unwrap_err();
    assert!(matches!(err, DetailError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unreachable_server_is_transport() {
    // Bind and immediately drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/", addr), Duration::from_secs(5));
    let err = client.search("batman", 1).await.unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = client_for(format!("http://{}/", addr), Duration::from_millis(200));
    let err = client.search("batman", 1).await.unwrap_err();
    match err {
        SearchError::Transport(detail) => assert!(detail.contains("timed out"), "{}", detail),
        other => panic!("expected transport error, got {:?}", other),
    }
}

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;

use crate::error::NetworkError;
use crate::settings::Settings;

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
    pub latency_ms: i64,
}

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, NetworkError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .build()?;
        Ok(Self { client })
    }

    #[cfg(test)]
    fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, NetworkError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| NetworkError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let latency_ms = start.elapsed().as_millis() as i64;

        debug!("Fetched {} ({} bytes, {}ms)", final_url, body.len(), latency_ms);

        Ok(Page {
            url: final_url,
            status: status.as_u16(),
            body,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn fetcher() -> HttpFetcher {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpFetcher::with_client(client)
    }

    /// Serve a single canned HTTP response, returning the URL to request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/investor", addr)
    }

    #[tokio::test]
    async fn success_returns_body() {
        let url = serve_once("200 OK", "<a href=\"/q1\">Q1 2025 Earnings Call</a>").await;
        let page = fetcher().fetch(&url).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.url, url);
        assert!(page.body.contains("Q1 2025 Earnings Call"));
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let url = serve_once("404 Not Found", "missing").await;
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 404, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn server_error_is_network_error() {
        let url = serve_once("503 Service Unavailable", "").await;
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 503, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher()
            .fetch(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Request { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = HttpFetcher::with_client(client)
            .fetch(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Timeout { .. }), "{err:?}");
    }

    #[test]
    fn builds_from_settings() {
        let settings = Settings {
            timeout_secs: 1,
            user_agent: "earnings-test".into(),
            max_redirects: 0,
        };
        assert!(HttpFetcher::new(&settings).is_ok());
    }
}

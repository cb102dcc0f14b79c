//! HTTP client wrapper - user lookups against the GitHub-style users API

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

use crate::constants::USER_AGENT;
use crate::models::User;

/// Why a lookup failed. The `Display` text is what the user view shows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// Non-2xx response; the message is the status text
    #[error("{reason}")]
    Status { status: u16, reason: String },
    #[error("Request timed out ({0}s)")]
    Timeout(u64),
    #[error("Connection failed: {0}")]
    Transport(String),
    #[error("Malformed user record: {0}")]
    Decode(String),
    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),
}

impl LookupError {
    fn from_status(status: StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        LookupError::Status {
            status: status.as_u16(),
            reason,
        }
    }
}

/// Client for `GET {base}/users/{username}`
#[derive(Clone, Debug)]
pub struct UserClient {
    http: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl UserClient {
    pub fn new(api_base: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_http(http, api_base, timeout)
    }

    /// Wrap an existing reqwest client; `timeout` is only used for messages
    pub fn with_http(http: reqwest::Client, api_base: &str, timeout: Duration) -> Self {
        UserClient {
            http,
            base: api_base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// URL of the user record; the username is percent-encoded as one segment
    pub fn user_url(&self, username: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base.clone()))?
            .pop_if_empty()
            .push("users")
            .push(username);
        Ok(url)
    }

    /// Fetch one user. Only 2xx responses with a JSON object carrying a
    /// `login` count as success.
    pub async fn fetch_user(&self, username: &str) -> Result<User, LookupError> {
        let url = self.user_url(username)?;
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::from_status(status));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;
        User::from_json(body).ok_or_else(|| LookupError::Decode(String::from("missing login")))
    }

    fn transport_error(&self, e: reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout(self.timeout.as_secs())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Client for a loopback test server, bypassing any proxy from the environment
    pub(crate) fn local_client(base: &str) -> UserClient {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        UserClient::with_http(http, base, Duration::from_secs(5))
    }

    /// Serve one canned HTTP response; yields the request line received
    pub(crate) async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn test_user_url_encodes_username() {
        let client = UserClient::new("https://api.github.com/", Duration::from_secs(1));
        assert_eq!(client.user_url("octocat").unwrap().as_str(), "https://api.github.com/users/octocat");
        assert_eq!(client.user_url("a b/c").unwrap().as_str(), "https://api.github.com/users/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = UserClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(client.user_url("x"), Err(LookupError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_user_success() {
        let (base, request_line) = serve_once("200 OK", r#"{"login":"octocat","id":583231}"#).await;
        let client = local_client(&base);

        let user = client.fetch_user("octocat").await.unwrap();
        assert_eq!(user.login(), "octocat");
        assert!(user.to_pretty().contains("\"id\": 583231"));
        assert_eq!(request_line.await.unwrap(), "GET /users/octocat HTTP/1.1");
    }

    #[tokio::test]
    async fn test_fetch_user_not_found_uses_status_text() {
        let (base, _) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;
        let client = local_client(&base);

        let err = client.fetch_user("nobody-here").await.unwrap_err();
        assert_eq!(err, LookupError::Status { status: 404, reason: String::from("Not Found") });
        assert_eq!(err.to_string(), "Not Found");
    }

    #[tokio::test]
    async fn test_fetch_user_rejects_record_without_login() {
        let (base, _) = serve_once("200 OK", r#"{"message":"hi"}"#).await;
        let client = local_client(&base);
        assert!(matches!(client.fetch_user("x").await, Err(LookupError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_user_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(&format!("http://{}", addr));
        assert!(matches!(client.fetch_user("x").await, Err(LookupError::Transport(_))));
    }
}

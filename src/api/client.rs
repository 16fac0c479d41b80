use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ApiErrorKind};
use crate::config::ApiConfig;
use crate::storage::local_storage::LocalStorage;

pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn takes_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking JSON client for the demo REST service.
///
/// Sends `Authorization: Bearer <token>` while `authToken` is in storage and
/// drops the token when the server answers 401. No retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    storage: LocalStorage,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, storage: LocalStorage) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, None)
    }

    pub fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::Post, path, body)
    }

    pub fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::Put, path, body)
    }

    pub fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::Patch, path, body)
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, None)
    }

    fn request_with_body<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::new(method, path, e))?;
        self.request(method, path, Some(body))
    }

    /// Send one request and decode the JSON response body.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut builder = self.http.request(method.to_reqwest(), &url);

        if let Some(token) = self.storage.get(AUTH_TOKEN_KEY) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body.as_ref() {
            builder = builder.json(body);
        }

        tracing::info!(%method, %url, "making request");

        let response = builder.send().map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "request error");
            ApiError::new(method, path, err)
        })?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), %url, "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.clear_token();
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "response error");
            return Err(ApiError::new(method, path, ApiErrorKind::Status(status)));
        }

        response
            .json::<T>()
            .map_err(|err| ApiError::new(method, path, err))
    }

    fn clear_token(&self) {
        match self.storage.remove(AUTH_TOKEN_KEY) {
            Ok(Some(_)) => tracing::info!("auth token cleared after 401"),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "could not clear auth token"),
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// One-shot HTTP server. Answers a single request with `status` and
    /// `body`, then hands back the raw request it received.
    pub fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];

            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if let Some(end) = find_header_end(&raw) {
                    let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (base_url, handle)
    }

    fn find_header_end(raw: &[u8]) -> Option<usize> {
        raw.windows(4).position(|w| w == b"\r\n\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn client(base_url: &str, dir: &TempDir) -> (ApiClient, LocalStorage) {
        let storage = LocalStorage::open(dir.path()).unwrap();
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        (ApiClient::new(&config, storage.clone()).unwrap(), storage)
    }

    #[test]
    fn joins_paths_onto_base_url() {
        let dir = TempDir::new().unwrap();
        let (client, _) = client("https://example.test/", &dir);

        assert_eq!(client.url("/users/1"), "https://example.test/users/1");
        assert_eq!(client.url("posts"), "https://example.test/posts");
    }

    #[test]
    fn sends_bearer_token_when_stored() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once("200 OK", r#"{"id": 1}"#);
        let (client, storage) = client(&base_url, &dir);
        storage.set(AUTH_TOKEN_KEY, "secret-token").unwrap();

        let body: Value = client.get("/users/1").unwrap();
        assert_eq!(body["id"], 1);

        let request = server.join().unwrap().to_lowercase();
        assert!(request.starts_with("get /users/1 "));
        assert!(request.contains("authorization: bearer secret-token"));
        assert!(request.contains("content-type: application/json"));
    }

    #[test]
    fn unauthorized_clears_the_stored_token() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once("401 Unauthorized", "{}");
        let (client, storage) = client(&base_url, &dir);
        storage.set(AUTH_TOKEN_KEY, "expired").unwrap();

        let err = client.get::<Value>("/users/1").unwrap_err();
        server.join().unwrap();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            err.to_string(),
            "GET /users/1 failed: request failed with status code 401 Unauthorized"
        );
        assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn post_sends_json_body() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once("201 Created", r#"{"id": 101}"#);
        let (client, _) = client(&base_url, &dir);

        let created: Value = client
            .post("/posts", &serde_json::json!({"title": "Slay the dragon"}))
            .unwrap();
        assert_eq!(created["id"], 101);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /posts "));
        assert!(request.contains(r#""title":"Slay the dragon""#));
    }
}

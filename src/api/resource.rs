use std::collections::BTreeMap;
use std::thread;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::client::{ApiClient, Method};
use crate::api::error::ApiError;

/// One remote call plus the state a screen renders around it: the last
/// data, whether a call is in flight, and the last error message.
#[derive(Debug, Clone)]
pub struct ApiResource<T> {
    method: Method,
    path: String,
    payload: Option<Value>,

    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T: DeserializeOwned> ApiResource<T> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark the call as in flight and clear the previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record the result of a call started with `begin`.
    pub fn finish(&mut self, result: Result<T, ApiError>) -> Result<&T, ApiError> {
        self.loading = false;
        match result {
            Ok(data) => Ok(&*self.data.insert(data)),
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Run the call with the configured payload.
    pub fn execute(&mut self, client: &ApiClient) -> Result<&T, ApiError> {
        let payload = self.payload.clone();
        self.execute_with(client, payload)
    }

    /// Run the call with a one-off payload. GET and DELETE ignore it.
    pub fn execute_with(
        &mut self,
        client: &ApiClient,
        payload: Option<Value>,
    ) -> Result<&T, ApiError> {
        self.begin();
        let body = if self.method.takes_body() {
            Some(payload.unwrap_or(Value::Object(Default::default())))
        } else {
            None
        };
        let result = client.request::<T>(self.method, &self.path, body);
        self.finish(result)
    }

    pub fn refetch(&mut self, client: &ApiClient) -> Result<&T, ApiError> {
        self.execute(client)
    }
}

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub key: String,
    pub method: Method,
    pub path: String,
    pub payload: Option<Value>,
}

impl BatchRequest {
    pub fn get(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            method: Method::Get,
            path: path.into(),
            payload: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub data: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, String>,
}

/// Run every request concurrently. Each one settles on its own: a failure
/// lands in `errors` under its key and does not affect the others.
pub fn fetch_all(client: &ApiClient, requests: &[BatchRequest]) -> BatchResult {
    let settled: Vec<(String, Result<Value, ApiError>)> = thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|req| {
                scope.spawn(move || {
                    let body = if req.method.takes_body() {
                        Some(req.payload.clone().unwrap_or(Value::Object(Default::default())))
                    } else {
                        None
                    };
                    (req.key.clone(), client.request::<Value>(req.method, &req.path, body))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    let mut result = BatchResult::default();
    for (key, outcome) in settled {
        match outcome {
            Ok(value) => {
                result.data.insert(key, value);
            }
            Err(err) => {
                result.errors.insert(key, err.to_string());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::stub;
    use crate::config::ApiConfig;
    use crate::storage::local_storage::LocalStorage;
    use tempfile::TempDir;

    fn client_for(base_url: String, dir: &TempDir) -> ApiClient {
        let config = ApiConfig {
            base_url,
            timeout_secs: 2,
        };
        ApiClient::new(&config, LocalStorage::open(dir.path()).unwrap()).unwrap()
    }

    #[test]
    fn execute_records_data() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once("200 OK", r#"[{"id": 1, "title": "Potion"}]"#);
        let client = client_for(base_url, &dir);

        let mut resource: ApiResource<Vec<Value>> = ApiResource::get("/users/1/albums");
        let items = resource.execute(&client).unwrap();
        assert_eq!(items.len(), 1);

        server.join().unwrap();
        assert!(!resource.is_loading());
        assert!(resource.error().is_none());
        assert_eq!(resource.data().unwrap()[0]["title"], "Potion");
    }

    #[test]
    fn execute_records_error_message() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once("404 Not Found", "{}");
        let client = client_for(base_url, &dir);

        let mut resource: ApiResource<Value> = ApiResource::get("/posts/9999");
        assert!(resource.execute(&client).is_err());
        server.join().unwrap();

        assert!(!resource.is_loading());
        assert!(resource.data().is_none());
        assert_eq!(
            resource.error(),
            Some("GET /posts/9999 failed: request failed with status code 404 Not Found")
        );
    }

    #[test]
    fn fetch_all_settles_each_request() {
        let dir = TempDir::new().unwrap();
        // Nothing listens on port 1, every request fails on its own.
        let client = client_for("http://127.0.0.1:1".to_string(), &dir);

        let result = fetch_all(
            &client,
            &[
                BatchRequest::get("player", "/users/1"),
                BatchRequest::get("quests", "/posts"),
            ],
        );

        assert!(result.data.is_empty());
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors["player"].starts_with("GET /users/1 failed:"));
        assert!(result.errors["quests"].starts_with("GET /posts failed:"));
    }
}

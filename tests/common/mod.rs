//! In-process mock registry for integration tests
//!
//! Serves canned responses keyed by method and path below
//! `/repository/{NAMESPACE}/v2/` and records every request it receives.

#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use nexus_registry_client::{Logger, RegistryClient, RegistryConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const NAMESPACE: &str = "docker-private";
pub const USERNAME: &str = "deployer";
pub const PASSWORD: &str = "s3cret";

pub const V1_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v1+json";
pub const V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Canned {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub accept: Vec<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockRegistry {
    pub base_url: String,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockRegistry {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            server,
        }
    }

    /// Register a response for `method` on `{base}/repository/{NAMESPACE}/v2/{path}`
    pub fn route(&self, method: Method, path: &str, response: Canned) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), api_path(path)), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> RegistryClient {
        let config = RegistryConfig::new(&self.base_url, USERNAME, PASSWORD, NAMESPACE).unwrap();
        RegistryClient::builder(config)
            .with_output(Logger::new_quiet())
            .build()
            .unwrap()
    }
}

impl Drop for MockRegistry {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn api_path(path: &str) -> String {
    format!("/repository/{}/v2/{}", NAMESPACE, path.trim_start_matches('/'))
}

/// `Authorization` value the client must send for the test credentials
pub fn expected_basic_auth() -> String {
    // base64("deployer:s3cret")
    "Basic ZGVwbG95ZXI6czNjcmV0".to_string()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        accept: headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_string))
            .collect(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some(canned) => {
            let mut response_headers = HeaderMap::new();
            for (name, value) in &canned.headers {
                response_headers.insert(
                    HeaderName::from_bytes(name.as_bytes()).unwrap(),
                    HeaderValue::from_str(value).unwrap(),
                );
            }
            let status = StatusCode::from_u16(canned.status).unwrap();
            (status, response_headers, canned.body).into_response()
        }
        None => (StatusCode::NOT_FOUND, r#"{"errors":[{"code":"NAME_UNKNOWN"}]}"#).into_response(),
    }
}

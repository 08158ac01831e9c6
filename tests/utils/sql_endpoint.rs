use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::post,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// Request received by the fake endpoint.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl CapturedRequest {
    /// Value of the given header, when present once and readable as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        let mut values = self.headers.get_all(name).iter();

        match (values.next(), values.next()) {
            (Some(value), None) => value.to_str().ok(),
            _ => None,
        }
    }
}

#[derive(Clone)]
struct EndpointState {
    status: StatusCode,
    payload: Value,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// SQL-over-HTTP endpoint answering every query with the same payload.
pub struct FakeSqlEndpoint {
    port: u16,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeSqlEndpoint {
    pub async fn start(status: u16, payload: Value) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = EndpointState {
            status: StatusCode::from_u16(status).unwrap(),
            payload,
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/sql", post(answer))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { port, requests }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn answer(
    State(state): State<EndpointState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(CapturedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });

    (state.status, Json(state.payload))
}

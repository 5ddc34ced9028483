//! Common test utilities

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use azsample::{build_router, AppState, Context, Error, HttpSend, Result, StaticEnv};
use bytes::Bytes;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TOKEN_RESPONSE: &str =
    r#"{"token_type":"Bearer","expires_in":3599,"access_token":"eyJ0eXAi"}"#;

pub const VCAP_SERVICES: &str = r#"{
    "azure-storage": [{
        "name": "storage",
        "credentials": {
            "storage_account_name": "myaccount",
            "primary_access_key": "bXlrZXk="
        }
    }]
}"#;

/// Every env value a sample route reads.
pub const FULL_ENV: &[(&str, &str)] = &[
    ("VCAP_SERVICES", VCAP_SERVICES),
    ("STORAGE_CONTAINER_NAME", "samples"),
    ("AZURE_SUBSCRIPTION_ID", "sub"),
    ("AZURE_TENANT_ID", "tenant"),
    ("AZURE_CLIENT_ID", "client"),
    ("AZURE_CLIENT_SECRET", "secret"),
    ("REDIS_RESOURGE_GROUP", "redis-rg"),
    ("REDIS_NAME", "cache1"),
    ("DOCUMENTDB_RESOURGE_GROUP", "docs-rg"),
    ("DOCUMENTDB_ACCOUNT_NAME", "docs"),
    ("COSMOSDB_RESOURCE_GROUP", "cosmos-rg"),
    ("COSMOSDB_ACCOUNT_NAME", "cosmos"),
    ("SQL_RESOURCE_GROUP", "sql-rg"),
    ("SQL_SERVER_NAME", "sqlsrv"),
    ("SQL_DATABASE_NAME", "inventory"),
    ("MYSQL_RESOURCE_GROUP", "mysql-rg"),
    ("POSTGRESQL_RESOURCE_GROUP", "pg-rg"),
    ("SERVICEBUS_RESOURGE_GROUP", "bus-rg"),
    ("SERVICEBUS_NAME", "bus"),
    ("SERVICEBUS_QUEUE_NAME", "orders"),
];

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

/// A request observed by [`MockHttpSend`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub body: String,
}

/// Answers outbound calls from registered routes and records them.
///
/// A route matches when the method is equal and the uri contains its path;
/// the first registered match wins.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that already answers token requests.
    pub fn with_token() -> Self {
        let http = Self::new();
        http.on(Method::POST, "/oauth2/v2.0/token", 200, TOKEN_RESPONSE);
        http
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: &str) {
        self.on_with_headers(method, path, status, &[], body);
    }

    pub fn on_with_headers(
        &self,
        method: Method,
        path: &str,
        status: u16,
        headers: &[(&str, &str)],
        body: &str,
    ) {
        self.routes.lock().unwrap().push(Route {
            method,
            path: path.to_string(),
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.uri.contains("/oauth2/"))
            .count()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        assert!(
            uri.contains("/oauth2/") || req.headers().contains_key(http::header::AUTHORIZATION),
            "unsigned request to {uri}"
        );
        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().clone(),
            uri: uri.clone(),
            body: String::from_utf8_lossy(req.body()).to_string(),
        });

        let route = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.method == req.method() && uri.contains(&r.path))
            .cloned()
            .ok_or_else(|| Error::unexpected(format!("connection refused: {uri}")))?;

        let mut builder = http::Response::builder().status(route.status);
        for (k, v) in &route.headers {
            builder = builder.header(k, v);
        }
        Ok(builder.body(Bytes::from(route.body)).unwrap())
    }
}

/// Env with every value set, except those listed in `unset`.
pub fn env_without(unset: &[&str]) -> StaticEnv {
    StaticEnv::from_pairs(
        FULL_ENV
            .iter()
            .filter(|(k, _)| !unset.contains(k))
            .map(|(k, v)| (*k, *v)),
    )
}

/// Create the production router on top of a mocked context.
pub fn create_app(http: &MockHttpSend, env: StaticEnv) -> Router {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(http.clone()).with_env(env);
    build_router(AppState::new(ctx))
}

/// Send a request and parse the JSON response body.
pub async fn send(app: &Router, method: Method, path: &str) -> (StatusCode, Option<Value>) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if body_bytes.is_empty() {
        return (status, None);
    }

    match serde_json::from_slice(&body_bytes) {
        Ok(data) => (status, Some(data)),
        Err(_) => (status, None),
    }
}

/// Make a GET request and parse the JSON response body.
pub async fn get_json(app: &Router, path: &str) -> (StatusCode, Option<Value>) {
    send(app, Method::GET, path).await
}

//! HTTP client for the Brigade API server.
//!
//! One [`ApiClient`] owns a pooled hyper connection and hands out the two
//! API facets: [`CoreClient`] for projects and events, [`AuthnClient`] for
//! users and service accounts. Facets are cheap to clone and share the
//! underlying transport.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::authn::{ServiceAccount, ServiceAccountsSelector, User, UsersSelector};
use crate::core::{Event, EventsSelector, Project, ProjectsSelector, WorkerPhase};
use crate::error::ApiError;
use crate::meta::{List, ListOptions};

/// Entry point for talking to a Brigade API server.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
}

impl ApiClient {
    /// Create a client for the API server at `address` (a base URL such as
    /// `http://brigade-apiserver:8080`), authenticating with the given
    /// bearer token.
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            transport: Arc::new(Transport {
                http: Client::builder(TokioExecutor::new()).build_http(),
                address: address.trim_end_matches('/').to_string(),
                token: token.into(),
            }),
        }
    }

    /// The core facet: projects and events.
    pub fn core(&self) -> CoreClient {
        CoreClient {
            transport: self.transport.clone(),
        }
    }

    /// The authn facet: users and service accounts.
    pub fn authn(&self) -> AuthnClient {
        AuthnClient {
            transport: self.transport.clone(),
        }
    }
}

/// Client facet for core API resources.
#[derive(Clone)]
pub struct CoreClient {
    transport: Arc<Transport>,
}

impl CoreClient {
    /// List projects matching the selector, one page at a time.
    pub async fn list_projects(
        &self,
        _selector: &ProjectsSelector,
        opts: &ListOptions,
    ) -> Result<List<Project>, ApiError> {
        let mut query = Vec::new();
        push_list_options(&mut query, opts);
        self.transport.get_json("/v2/projects", &query).await
    }

    /// List events matching the selector, one page at a time.
    pub async fn list_events(
        &self,
        selector: &EventsSelector,
        opts: &ListOptions,
    ) -> Result<List<Event>, ApiError> {
        let mut query = Vec::new();
        if !selector.worker_phases.is_empty() {
            let phases = selector
                .worker_phases
                .iter()
                .map(WorkerPhase::as_str)
                .collect::<Vec<_>>()
                .join(",");
            query.push(("workerPhases", phases));
        }
        push_list_options(&mut query, opts);
        self.transport.get_json("/v2/events", &query).await
    }
}

/// Client facet for authn API resources.
#[derive(Clone)]
pub struct AuthnClient {
    transport: Arc<Transport>,
}

impl AuthnClient {
    /// List users, one page at a time.
    pub async fn list_users(
        &self,
        _selector: &UsersSelector,
        opts: &ListOptions,
    ) -> Result<List<User>, ApiError> {
        let mut query = Vec::new();
        push_list_options(&mut query, opts);
        self.transport.get_json("/v2/users", &query).await
    }

    /// List service accounts, one page at a time.
    pub async fn list_service_accounts(
        &self,
        _selector: &ServiceAccountsSelector,
        opts: &ListOptions,
    ) -> Result<List<ServiceAccount>, ApiError> {
        let mut query = Vec::new();
        push_list_options(&mut query, opts);
        self.transport.get_json("/v2/service-accounts", &query).await
    }
}

/// Shared HTTP transport: pooled connections, base address, bearer token.
struct Transport {
    http: Client<HttpConnector, Empty<Bytes>>,
    address: String,
    token: String,
}

impl Transport {
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let uri = self.build_uri(path, query);
        debug!(%uri, "GET");

        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri(uri.as_str())
            .header(http::header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(http::header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn build_uri(&self, path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return format!("{}{}", self.address, path);
        }
        let qs = query
            .iter()
            .map(|(k, v)| format!("{k}={}", encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}?{}", self.address, path, qs)
    }
}

fn push_list_options(query: &mut Vec<(&str, String)>, opts: &ListOptions) {
    if let Some(token) = opts.continue_token.as_deref()
        && !token.is_empty()
    {
        query.push(("continue", token.to_string()));
    }
    if let Some(limit) = opts.limit {
        query.push(("limit", limit.to_string()));
    }
}

/// Percent-encode a query component. Unreserved characters pass through,
/// everything else becomes %XX byte escapes.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

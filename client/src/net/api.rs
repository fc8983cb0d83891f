//! HTTP calls to the Orbi backend — one method per endpoint, no state.
//!
//! CREDENTIALS
//! ===========
//! The backend uses dual carriage: an HttpOnly session cookie for page-data
//! reads and a bearer token (the value of the non-HttpOnly `token` cookie)
//! for the optimize call. Both are explicit parameters here, never ambient
//! browser state, so each call site names exactly what it sends.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{LoginRequest, RegisterRequest, RouteResponse, Stop};
use crate::util::cookie::{set_cookie_pair, set_cookie_value};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Name of the readable cookie carrying the optimize bearer token.
pub const TOKEN_COOKIE_NAME: &str = "token";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the optimizer starts the reordered route.
const OPTIMIZE_START_INDEX: &str = "0";

// =============================================================================
// CREDENTIALS
// =============================================================================

/// The HttpOnly session cookie, stored as the full `name=value` pair and sent
/// verbatim in the `Cookie` header on page-data reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie(String);

impl SessionCookie {
    pub fn new(pair: impl Into<String>) -> Self {
        Self(pair.into())
    }

    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

/// The bearer token for the optimize endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Credentials harvested from login's `Set-Cookie` headers. Either half may
/// be absent when the backend withholds it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub session: Option<SessionCookie>,
    pub token: Option<BearerToken>,
}

/// Split login's `Set-Cookie` headers into the two credential halves: the
/// `token` cookie becomes the bearer token, the first other cookie is kept
/// whole as the session pair.
fn credentials_from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Credentials {
    let mut credentials = Credentials::default();
    for header in headers {
        if let Some(token) = set_cookie_value(header, TOKEN_COOKIE_NAME) {
            credentials.token = Some(BearerToken::new(token));
        } else if credentials.session.is_none() {
            if let Some((name, value)) = set_cookie_pair(header) {
                credentials.session = Some(SessionCookie::new(format!("{name}={value}")));
            }
        }
    }
    credentials
}

// =============================================================================
// CLIENT
// =============================================================================

/// Stateless typed client for the Orbi backend. One method per endpoint;
/// auth failures, server failures, timeouts and transport failures come back
/// as distinct [`ApiError`] variants.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the given base URL (trailing slash tolerated).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/auth/validate` — ask the backend whether the session cookie
    /// still identifies a user. Success carries no payload.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; callers treat every variant as "not authenticated".
    pub async fn validate_session(&self, session: &SessionCookie) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.url("/api/auth/validate"))
            .header(COOKIE, session.as_header_value())
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        expect_success(response).await
    }

    /// `POST /api/auth/login` — exchange email/password for the session
    /// cookie and bearer token the backend sets via `Set-Cookie`.
    ///
    /// # Errors
    ///
    /// Non-2xx responses come back as [`ApiError::Unauthorized`] or
    /// [`ApiError::Server`]; the login form shows one generic
    /// invalid-credentials message for either.
    pub async fn login(&self, request: &LoginRequest) -> Result<Credentials, ApiError> {
        tracing::debug!(email = %request.email, "logging in");
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(read_failure(response).await);
        }

        let headers: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        Ok(credentials_from_set_cookie(headers))
    }

    /// `POST /api/auth/register` — create an account. Success carries no
    /// payload; failures surface the backend's own error text.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; [`ApiError::Server`] carries the backend's message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        expect_success(response).await
    }

    /// `GET /api/route` — all persisted routes visible to the session.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; 401/403 means the list view shows "access denied".
    pub async fn fetch_routes(&self, session: &SessionCookie) -> Result<Vec<RouteResponse>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/route"))
            .header(COOKIE, session.as_header_value())
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        read_json(response).await
    }

    /// `GET /api/route/{id}` — one persisted route with its deliveries.
    /// Delivery order is whatever the backend sent; the detail view sorts.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; 401/403 means the detail view redirects to login.
    pub async fn fetch_route(&self, session: &SessionCookie, id: i64) -> Result<RouteResponse, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/route/{id}")))
            .header(COOKIE, session.as_header_value())
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        read_json(response).await
    }

    /// `POST /api/route/optimize?startIndex=0` — submit the full stop batch
    /// and get it back reordered. The bearer token rides in the
    /// `Authorization` header, not a cookie.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] on 401/403 (local stop list must be kept),
    /// otherwise any [`ApiError`].
    pub async fn optimize_route(&self, token: &BearerToken, stops: &[Stop]) -> Result<Vec<Stop>, ApiError> {
        tracing::debug!(stops = stops.len(), "requesting route optimization");
        let response = self
            .http
            .post(self.url("/api/route/optimize"))
            .query(&[("startIndex", OPTIMIZE_START_INDEX)])
            .bearer_auth(token.expose())
            .json(&stops)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        read_json(response).await
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

async fn read_failure(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(status, body)
}

async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(read_failure(response).await)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(read_failure(response).await);
    }
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

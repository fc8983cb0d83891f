//! End-to-end tests driving `ApiClient` and the view state machines against
//! an in-process mock of the Orbi backend on an ephemeral port.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use orbi_client::net::api::{ApiClient, BearerToken, SessionCookie};
use orbi_client::net::error::ApiError;
use orbi_client::net::types::{LoginRequest, RegisterRequest, Stop};
use orbi_client::state::auth::{GuardOutcome, run_session_guard};
use orbi_client::state::draft::{DraftError, DraftRoute};
use orbi_client::state::routes::{
    ACCESS_DENIED_MESSAGE, RouteDetailOutcome, RoutesState, settle_route_detail,
};

const VALID_SESSION: &str = "JSESSIONID=valid-session";
const VALID_TOKEN: &str = "valid-jwt";
const DRIVER: &str = "00dc0d5e-7163-4b1f-ba2b-cef85ac7c639";

// =============================================================================
// MOCK BACKEND
// =============================================================================

#[derive(Clone, Default)]
struct MockState {
    optimize_calls: Arc<AtomicUsize>,
    optimize_body: Arc<Mutex<Option<Value>>>,
}

fn session_ok(headers: &HeaderMap) -> bool {
    headers.get(COOKIE).and_then(|v| v.to_str().ok()) == Some(VALID_SESSION)
}

async fn validate(headers: HeaderMap) -> StatusCode {
    if session_ok(&headers) {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some("ana@example.com") && password == Some("secret") {
        (
            AppendHeaders([
                (SET_COOKIE, "JSESSIONID=valid-session; Path=/; HttpOnly"),
                (SET_COOKIE, "token=valid-jwt; Path=/"),
            ]),
            "ok",
        )
            .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body.get("email").and_then(Value::as_str) == Some("taken@example.com") {
        return (StatusCode::CONFLICT, "email already registered").into_response();
    }
    StatusCode::OK.into_response()
}

async fn route_list(headers: HeaderMap) -> Response {
    if !session_ok(&headers) {
        return StatusCode::FORBIDDEN.into_response();
    }
    Json(json!([
        { "id": 1, "driverId": null, "driverName": "Carlos", "deliveries": [] },
        { "id": 2, "driverId": DRIVER, "driverName": "Marina", "deliveries": [] }
    ]))
    .into_response()
}

async fn route_detail(Path(id): Path<i64>, headers: HeaderMap) -> Response {
    if !session_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != 7 {
        return (StatusCode::NOT_FOUND, "route not found").into_response();
    }
    Json(json!({
        "id": 7,
        "driverId": DRIVER,
        "driverName": "Carlos",
        "deliveries": [
            {
                "id": 21, "order": 2, "status": "IN_TRANSIT",
                "recipientName": "Bruno", "dropoffAddress": "Rua B, 2",
                "packageDetails": ""
            },
            {
                "id": 20, "order": 1, "status": "DELIVERED",
                "recipientName": "Ana", "dropoffAddress": "Rua A, 1",
                "packageDetails": "fragile"
            }
        ]
    }))
    .into_response()
}

async fn optimize(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(stops): Json<Vec<Value>>,
) -> Response {
    if params.get("startIndex").map(String::as_str) != Some("0") {
        return (StatusCode::BAD_REQUEST, "missing startIndex").into_response();
    }
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if auth != Some("Bearer valid-jwt") {
        return (StatusCode::FORBIDDEN, "bad token").into_response();
    }
    if stops
        .iter()
        .any(|stop| stop.get("address").and_then(Value::as_str) == Some("explode"))
    {
        return (StatusCode::INTERNAL_SERVER_ERROR, "optimizer blew up").into_response();
    }
    state.optimize_calls.fetch_add(1, Ordering::SeqCst);
    *state.optimize_body.lock().unwrap() = Some(Value::Array(stops.clone()));
    let reversed: Vec<Value> = stops.into_iter().rev().collect();
    Json(reversed).into_response()
}

async fn spawn_mock() -> (ApiClient, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/api/auth/validate", get(validate))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/route", get(route_list))
        .route("/api/route/{id}", get(route_detail))
        .route("/api/route/optimize", post(optimize))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (ApiClient::new(format!("http://{addr}")).unwrap(), state)
}

fn stop(address: &str) -> Stop {
    Stop {
        address: address.to_owned(),
        latitude: -23.55,
        longitude: -46.63,
        recipient_name: "Ana".to_owned(),
        recipient_phone: "11999990000".to_owned(),
        recipient_email: "ana@example.com".to_owned(),
        package_details: String::new(),
        driver_id: DRIVER.to_owned(),
    }
}

fn session() -> SessionCookie {
    SessionCookie::new(VALID_SESSION)
}

fn token() -> BearerToken {
    BearerToken::new(VALID_TOKEN)
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn login_harvests_both_credentials() {
    let (api, _) = spawn_mock().await;
    let request = LoginRequest {
        email: "ana@example.com".to_owned(),
        password: "secret".to_owned(),
    };
    let credentials = api.login(&request).await.unwrap();
    assert_eq!(
        credentials.session.as_ref().map(SessionCookie::as_header_value),
        Some(VALID_SESSION)
    );
    assert_eq!(credentials.token.as_ref().map(BearerToken::expose), Some(VALID_TOKEN));
}

#[tokio::test]
async fn login_rejection_is_unauthorized() {
    let (api, _) = spawn_mock().await;
    let request = LoginRequest {
        email: "ana@example.com".to_owned(),
        password: "wrong".to_owned(),
    };
    let error = api.login(&request).await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized { status: 401 }));
}

#[tokio::test]
async fn register_surfaces_backend_error_text() {
    let (api, _) = spawn_mock().await;
    let request = RegisterRequest {
        name: "Ana".to_owned(),
        email: "taken@example.com".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
        phone_number: "11999990000".to_owned(),
    };
    let error = api.register(&request).await.unwrap_err();
    match error {
        ApiError::Server { status, body } => {
            assert_eq!(status, 409);
            assert_eq!(body, "email already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn guard_allows_valid_session() {
    let (api, _) = spawn_mock().await;
    let session = session();
    let outcome = run_session_guard(&api, Some(&session)).await;
    assert_eq!(outcome, GuardOutcome::Render);
}

#[tokio::test]
async fn guard_redirects_on_forbidden_session() {
    let (api, _) = spawn_mock().await;
    let session = SessionCookie::new("JSESSIONID=stale");
    let outcome = run_session_guard(&api, Some(&session)).await;
    assert_eq!(outcome, GuardOutcome::RedirectToLogin);
}

#[tokio::test]
async fn guard_redirects_on_network_failure() {
    // No server behind this port.
    let api = ApiClient::new("http://127.0.0.1:1").unwrap();
    let session = session();
    let outcome = run_session_guard(&api, Some(&session)).await;
    assert_eq!(outcome, GuardOutcome::RedirectToLogin);
}

// =============================================================================
// READ SIDE
// =============================================================================

#[tokio::test]
async fn route_list_loads_into_state() {
    let (api, _) = spawn_mock().await;
    let mut state = RoutesState::default();
    state.begin_load();
    state.settle(api.fetch_routes(&session()).await);
    assert!(state.error.is_none());
    assert_eq!(state.routes.len(), 2);
    assert_eq!(state.routes[0].id, 1);
}

#[tokio::test]
async fn route_list_access_denied_message() {
    let (api, _) = spawn_mock().await;
    let mut state = RoutesState::default();
    state.begin_load();
    state.settle(api.fetch_routes(&SessionCookie::new("JSESSIONID=stale")).await);
    assert_eq!(state.error.as_deref(), Some(ACCESS_DENIED_MESSAGE));
}

#[tokio::test]
async fn route_detail_arrives_sorted() {
    let (api, _) = spawn_mock().await;
    let outcome = settle_route_detail(api.fetch_route(&session(), 7).await);
    let RouteDetailOutcome::Loaded(route) = outcome else {
        panic!("expected Loaded, got {outcome:?}");
    };
    let orders: Vec<i64> = route.deliveries.iter().map(|d| d.order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert_eq!(route.deliveries[0].recipient_name, "Ana");
}

#[tokio::test]
async fn route_detail_unauthorized_redirects() {
    let (api, _) = spawn_mock().await;
    let outcome = settle_route_detail(api.fetch_route(&SessionCookie::new("JSESSIONID=stale"), 7).await);
    assert_eq!(outcome, RouteDetailOutcome::RedirectToLogin);
}

// =============================================================================
// OPTIMIZE
// =============================================================================

#[tokio::test]
async fn optimize_round_trip_replaces_local_list() {
    let (api, mock) = spawn_mock().await;
    let mut draft = DraftRoute::new();
    draft.add_stop(stop("A")).unwrap();
    draft.add_stop(stop("B")).unwrap();

    let token = token();
    let snapshot = draft.begin_optimize(Some(&token)).unwrap();
    match api.optimize_route(&token, &snapshot).await {
        Ok(reordered) => draft.complete_optimize(reordered),
        Err(error) => panic!("optimize failed: {error}"),
    }

    let addresses: Vec<&str> = draft.stops().iter().map(|s| s.address.as_str()).collect();
    assert_eq!(addresses, vec!["B", "A"]);
    assert!(!draft.is_pending());

    // Exactly one POST, carrying the full batch serialized camelCase.
    assert_eq!(mock.optimize_calls.load(Ordering::SeqCst), 1);
    let posted = mock.optimize_body.lock().unwrap().clone().unwrap();
    assert_eq!(posted, serde_json::to_value(&snapshot).unwrap());
}

#[tokio::test]
async fn optimize_unauthorized_keeps_stops() {
    let (api, mock) = spawn_mock().await;
    let mut draft = DraftRoute::new();
    draft.add_stop(stop("A")).unwrap();
    draft.add_stop(stop("B")).unwrap();
    let before = draft.stops().to_vec();

    let bad_token = BearerToken::new("expired");
    let snapshot = draft.begin_optimize(Some(&bad_token)).unwrap();
    let error = api.optimize_route(&bad_token, &snapshot).await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized { status: 403 }));
    draft.fail_optimize();

    assert_eq!(draft.stops(), before);
    assert_eq!(mock.optimize_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn optimize_server_error_carries_body() {
    let (api, _) = spawn_mock().await;
    let token = token();
    let stops = vec![stop("explode"), stop("B")];
    let error = api.optimize_route(&token, &stops).await.unwrap_err();
    match error {
        ApiError::Server { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "optimizer blew up");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn short_list_never_reaches_the_network() {
    let (_, mock) = spawn_mock().await;
    let mut draft = DraftRoute::new();
    draft.add_stop(stop("A")).unwrap();

    let token = token();
    let error = draft.begin_optimize(Some(&token)).unwrap_err();
    assert_eq!(error, DraftError::NotEnoughStops);
    assert_eq!(error.to_string(), "add at least 2 stops");
    assert_eq!(mock.optimize_calls.load(Ordering::SeqCst), 0);
}

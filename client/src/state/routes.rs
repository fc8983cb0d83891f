//! Read-side state for the route list and route-detail timeline.
//!
//! The two views disagree on what 401/403 means — the list shows an
//! access-denied message in place, the detail page redirects to login — so
//! each gets its own settlement path.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::error::{ApiError, ErrorCategory};
use crate::net::types::RouteResponse;

pub const ACCESS_DENIED_MESSAGE: &str = "access denied, log in again";
pub const LOAD_FAILED_MESSAGE: &str = "could not load routes";
pub const DETAIL_FAILED_MESSAGE: &str = "could not load the route";

/// Route-list load state for the home view.
#[derive(Clone, Debug, Default)]
pub struct RoutesState {
    pub routes: Vec<RouteResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl RoutesState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle a list fetch. Unauthorized shows the access-denied line;
    /// everything else collapses to one generic failure message.
    pub fn settle(&mut self, result: Result<Vec<RouteResponse>, ApiError>) {
        self.loading = false;
        match result {
            Ok(routes) => {
                self.routes = routes;
                self.error = None;
            }
            Err(error) => {
                tracing::debug!(%error, "route list load failed");
                self.error = Some(match error.category() {
                    ErrorCategory::Unauthorized => ACCESS_DENIED_MESSAGE.to_owned(),
                    ErrorCategory::Server | ErrorCategory::Network => LOAD_FAILED_MESSAGE.to_owned(),
                });
            }
        }
    }
}

/// Outcome of a route-detail fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteDetailOutcome {
    /// Route loaded, deliveries already sorted for the timeline.
    Loaded(RouteResponse),
    /// 401/403 — the detail view redirects instead of messaging.
    RedirectToLogin,
    Failed(String),
}

/// Settle a detail fetch, sorting deliveries by `order` before the view
/// ever sees them.
pub fn settle_route_detail(result: Result<RouteResponse, ApiError>) -> RouteDetailOutcome {
    match result {
        Ok(mut route) => {
            route.sort_deliveries();
            RouteDetailOutcome::Loaded(route)
        }
        Err(error) if error.is_unauthorized() => RouteDetailOutcome::RedirectToLogin,
        Err(error) => {
            tracing::debug!(%error, "route detail load failed");
            RouteDetailOutcome::Failed(DETAIL_FAILED_MESSAGE.to_owned())
        }
    }
}

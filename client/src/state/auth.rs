//! Session-guard state for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected view issues exactly one credentialed validate call when it
//! mounts and renders nothing but a loading indicator until that call
//! settles. Any failure — bad session, server fault, timeout, network — is
//! treated as "not authenticated" and redirects to [`LOGIN_PATH`]. No retry,
//! no backoff.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::{ApiClient, SessionCookie};

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Guard progress for one mount of a protected view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardStatus {
    /// The validate call has not settled; render only a loading indicator.
    #[default]
    Checking,
    /// The session checked out; protected content may render.
    Allowed,
    /// The session is invalid; render nothing, redirect to login.
    Denied,
}

/// Final decision of one guard run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    RedirectToLogin,
}

/// Guard state owned by one protected view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardState {
    pub status: GuardStatus,
}

impl GuardState {
    /// Record the outcome of the single validate call. Only the first
    /// settlement counts; a settled guard never re-checks for that mount.
    pub fn settle(&mut self, outcome: GuardOutcome) {
        if self.status != GuardStatus::Checking {
            return;
        }
        self.status = match outcome {
            GuardOutcome::Render => GuardStatus::Allowed,
            GuardOutcome::RedirectToLogin => GuardStatus::Denied,
        };
    }

    /// Whether protected children may render.
    pub fn renders_children(&self) -> bool {
        self.status == GuardStatus::Allowed
    }

    /// Redirect target, present exactly when the guard denied.
    pub fn redirect_target(&self) -> Option<&'static str> {
        (self.status == GuardStatus::Denied).then_some(LOGIN_PATH)
    }
}

/// Run the guard check: one validate call, no retry. A missing session
/// cookie short-circuits to a redirect without touching the network.
pub async fn run_session_guard(api: &ApiClient, session: Option<&SessionCookie>) -> GuardOutcome {
    let Some(session) = session else {
        return GuardOutcome::RedirectToLogin;
    };
    match api.validate_session(session).await {
        Ok(()) => GuardOutcome::Render,
        Err(error) => {
            tracing::debug!(%error, "session validation failed");
            GuardOutcome::RedirectToLogin
        }
    }
}

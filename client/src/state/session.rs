//! Login and registration flow state.
//!
//! Local form checks run before any network call; backend failures map to
//! the messages the original pages showed (one generic line for login,
//! backend text for registration).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::error::ApiError;
use crate::net::types::{LoginRequest, RegisterRequest};

/// Generic message for any failed login, regardless of backend detail.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// Local validation failures raised before any network call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("enter email and password")]
    MissingCredentials,
    #[error("fill in all required fields")]
    MissingFields,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Check a login form before submitting it.
///
/// # Errors
///
/// [`FormError::MissingCredentials`] when either field is blank.
pub fn validate_login(request: &LoginRequest) -> Result<(), FormError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(FormError::MissingCredentials);
    }
    Ok(())
}

/// Check a registration form before submitting it. The password-match check
/// happens here, client-side, exactly once.
///
/// # Errors
///
/// [`FormError::MissingFields`] when a required field is blank,
/// [`FormError::PasswordMismatch`] when the two passwords differ.
pub fn validate_register(request: &RegisterRequest) -> Result<(), FormError> {
    let required = [
        request.name.trim(),
        request.email.trim(),
        request.password.as_str(),
        request.confirm_password.as_str(),
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(FormError::MissingFields);
    }
    if request.password != request.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

/// Message for a failed login submission. Always the same generic line so
/// the form leaks nothing about which half was wrong.
pub fn login_failure_message(_error: &ApiError) -> &'static str {
    INVALID_CREDENTIALS_MESSAGE
}

/// Message for a failed registration, surfacing backend text when present.
pub fn register_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Server { body, .. } if !body.trim().is_empty() => body.clone(),
        other => other.to_string(),
    }
}

/// One in-flight auth submission. The busy flag gates re-submission the way
/// the original forms disabled their buttons.
#[derive(Clone, Debug, Default)]
pub struct SessionFlow {
    pub busy: bool,
    pub error: Option<String>,
}

impl SessionFlow {
    /// Try to start a submission; `false` means one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    /// Record a terminal failure and allow re-submission.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.error = Some(message.into());
    }

    /// Record success.
    pub fn finish(&mut self) {
        self.busy = false;
        self.error = None;
    }
}

use super::*;

// =============================================================
// GuardState
// =============================================================

#[test]
fn guard_defaults_to_checking() {
    let state = GuardState::default();
    assert_eq!(state.status, GuardStatus::Checking);
    assert!(!state.renders_children());
    assert!(state.redirect_target().is_none());
}

#[test]
fn settle_render_allows_children() {
    let mut state = GuardState::default();
    state.settle(GuardOutcome::Render);
    assert_eq!(state.status, GuardStatus::Allowed);
    assert!(state.renders_children());
    assert!(state.redirect_target().is_none());
}

#[test]
fn settle_redirect_denies_and_targets_login() {
    let mut state = GuardState::default();
    state.settle(GuardOutcome::RedirectToLogin);
    assert_eq!(state.status, GuardStatus::Denied);
    assert!(!state.renders_children());
    assert_eq!(state.redirect_target(), Some("/login"));
}

#[test]
fn settle_is_single_shot_per_mount() {
    let mut state = GuardState::default();
    state.settle(GuardOutcome::RedirectToLogin);
    state.settle(GuardOutcome::Render);
    assert_eq!(state.status, GuardStatus::Denied);
}

// =============================================================
// run_session_guard
// =============================================================

#[tokio::test]
async fn missing_session_redirects_without_network() {
    // Unroutable base URL: reaching the network would hang or error loudly.
    let api = ApiClient::new("http://192.0.2.1:9").unwrap();
    let outcome = run_session_guard(&api, None).await;
    assert_eq!(outcome, GuardOutcome::RedirectToLogin);
}

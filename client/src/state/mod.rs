//! View-facing state machines: session guard, login/registration flow,
//! draft stop list, and read-side route state.

pub mod auth;
pub mod draft;
pub mod routes;
pub mod session;
